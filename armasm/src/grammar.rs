//! The ordered form list and the matcher that picks the first form whose
//! mnemonic pattern matches, then the first operand shape that matches
//! (`SPEC_FULL.md` §4.2/§4.4). Each "form" here is a branch of an ordered
//! if-let chain rather than a data table, matching the teacher's own
//! hand-rolled recursive-descent parser style.

use crate::{
    cond::{COND_TABLE, Cond},
    instr::{DataOp, MatchedInstr, ParsedInstr, TransferKind, TransferSize},
    parse::TailParser,
    registers::Register,
};

/// Why a source line failed to match any form.
pub enum MatchError {
    /// No form's mnemonic pattern accepted the mnemonic token.
    NoSuchOpcode,
    /// A form's mnemonic pattern matched, but no operand shape did.
    NoSuchData,
}

/// Matches one already-normalized `(mnemonic, tail)` pair against the
/// ordered form list.
pub fn match_line(mnemonic: &str, tail: &str) -> Result<MatchedInstr, MatchError> {
    if let Some((cond, (), s)) = match_mnemonic(&[("mov", ()), ("mvn", ())], true, true, mnemonic) {
        let mut p = TailParser::new(tail);
        let dest = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op2 = p.parse_data_operand2().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        let op = if mnemonic.starts_with("mov") { DataOp::Mov } else { DataOp::Mvn };
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::Data {
                op,
                set_condition_codes: s,
                dest,
                op1: Register::R0,
                op2,
            },
        });
    }

    const TERNARY_A: [(&str, DataOp); 6] = [
        ("add", DataOp::Add),
        ("adc", DataOp::Adc),
        ("sub", DataOp::Sub),
        ("rsb", DataOp::Rsb),
        ("sbc", DataOp::Sbc),
        ("rsc", DataOp::Rsc),
    ];
    const TERNARY_B: [(&str, DataOp); 4] = [
        ("and", DataOp::And),
        ("eor", DataOp::Eor),
        ("orr", DataOp::Orr),
        ("bic", DataOp::Bic),
    ];
    for group in [&TERNARY_A[..], &TERNARY_B[..]] {
        if let Some((cond, op, s)) = match_mnemonic(group, true, true, mnemonic) {
            let mut p = TailParser::new(tail);
            let dest = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
            p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
            let op1 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
            p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
            let op2 = p.parse_data_operand2().map_err(|_| MatchError::NoSuchData)?;
            p.finish().map_err(|_| MatchError::NoSuchData)?;
            return Ok(MatchedInstr {
                cond,
                instr: ParsedInstr::Data {
                    op,
                    set_condition_codes: s,
                    dest,
                    op1,
                    op2,
                },
            });
        }
    }

    if let Some((cond, op, _)) = match_mnemonic(
        &[
            ("cmp", DataOp::Cmp),
            ("cmn", DataOp::Cmn),
            ("tst", DataOp::Tst),
            ("teq", DataOp::Teq),
        ],
        true,
        false,
        mnemonic,
    ) {
        let mut p = TailParser::new(tail);
        let dest = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op2 = p.parse_data_operand2().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::Data {
                op,
                set_condition_codes: false,
                dest,
                op1: Register::R0,
                op2,
            },
        });
    }

    if let Some((cond, (), s)) = match_mnemonic(&[("mul", ())], true, true, mnemonic) {
        let mut p = TailParser::new(tail);
        let dest = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op1 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op2 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::Multiply {
                accumulate: false,
                set_condition_codes: s,
                dest,
                op1,
                op2,
                addend: Register::R0,
            },
        });
    }

    if let Some((cond, (), s)) = match_mnemonic(&[("mla", ())], true, true, mnemonic) {
        let mut p = TailParser::new(tail);
        let dest = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op1 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op2 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let addend = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::Multiply {
                accumulate: true,
                set_condition_codes: s,
                dest,
                op1,
                op2,
                addend,
            },
        });
    }

    if let Some((cond, (signed, accumulate), s)) = match_mnemonic(
        &[
            ("umull", (false, false)),
            ("umlal", (false, true)),
            ("smull", (true, false)),
            ("smlal", (true, true)),
        ],
        true,
        true,
        mnemonic,
    ) {
        let mut p = TailParser::new(tail);
        let dest_lo = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let dest_hi = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op1 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let op2 = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::MultiplyLong {
                signed,
                accumulate,
                set_condition_codes: s,
                dest_hi,
                dest_lo,
                op1,
                op2,
            },
        });
    }

    if let Some((cond, (), _)) = match_mnemonic(&[("bx", ())], true, false, mnemonic) {
        let mut p = TailParser::new(tail);
        let target = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::BranchExchange { target },
        });
    }

    if let Some((cond, link, _)) =
        match_mnemonic(&[("b", false), ("bl", true)], true, false, mnemonic)
    {
        let mut p = TailParser::new(tail);
        let offset = p.parse_immediate().map_err(|_| MatchError::NoSuchData)? as i64;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::Branch { link, offset },
        });
    }

    if let Some((cond, (kind, size), _)) = match_mnemonic(
        &[
            ("ldrb", (TransferKind::Load, TransferSize::Byte)),
            ("strb", (TransferKind::Store, TransferSize::Byte)),
            ("ldr", (TransferKind::Load, TransferSize::Word)),
            ("str", (TransferKind::Store, TransferSize::Word)),
        ],
        true,
        false,
        mnemonic,
    ) {
        let mut p = TailParser::new(tail);
        let data = p.parse_register().map_err(|_| MatchError::NoSuchData)?;
        p.eat_comma().map_err(|_| MatchError::NoSuchData)?;
        let mode = p.parse_addr_mode2().map_err(|_| MatchError::NoSuchData)?;
        p.finish().map_err(|_| MatchError::NoSuchData)?;
        return Ok(MatchedInstr {
            cond,
            instr: ParsedInstr::SingleTransfer { kind, size, data, mode },
        });
    }

    if let Some((cond, (), _)) = match_mnemonic(&[("nop", ())], true, false, mnemonic) {
        if tail.is_empty() {
            return Ok(MatchedInstr { cond, instr: ParsedInstr::Nop });
        }
        return Err(MatchError::NoSuchData);
    }

    Err(MatchError::NoSuchOpcode)
}

/// Strips the longest matching base mnemonic from `token`, then checks that
/// what remains is a valid optional condition suffix followed by an optional
/// `s` flag (in that order), consuming the whole token.
fn match_mnemonic<'a, T: Copy>(
    bases: &'a [(&str, T)],
    allow_cond: bool,
    allow_s: bool,
    token: &str,
) -> Option<(Cond, T, bool)> {
    for (base, payload) in bases {
        if let Some(rest) = token.strip_prefix(base) {
            if let Some((cond, s)) = match_suffix(rest, allow_cond, allow_s) {
                return Some((cond, *payload, s));
            }
        }
    }
    None
}

/// `(cond)?(s)?$`, anchored at the end: tries a two-letter condition code
/// first (since the cond group is tried before the `s` group in the
/// reference grammar's `opcode(cond)?(s)?` pattern), then an optional `s`.
fn match_suffix(remainder: &str, allow_cond: bool, allow_s: bool) -> Option<(Cond, bool)> {
    if allow_cond {
        for (code, cond) in COND_TABLE {
            if let Some(rest) = remainder.strip_prefix(code) {
                if rest.is_empty() {
                    return Some((cond, false));
                }
                if allow_s && rest == "s" {
                    return Some((cond, true));
                }
            }
        }
    }
    if remainder.is_empty() {
        return Some((Cond::Al, false));
    }
    if allow_s && remainder == "s" {
        return Some((Cond::Al, true));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_plain_mnemonic_as_always() {
        let m = match_line("mov", "r0, r1").ok().unwrap();
        assert_eq!(m.cond, Cond::Al);
    }

    #[test]
    fn matches_condition_suffix() {
        let m = match_line("addeq", "r3, r4, #1").ok().unwrap();
        assert_eq!(m.cond, Cond::Eq);
    }

    #[test]
    fn matches_condition_and_s_suffix() {
        let m = match_line("addeqs", "r3, r4, #1").ok().unwrap();
        assert_eq!(m.cond, Cond::Eq);
        match m.instr {
            ParsedInstr::Data { set_condition_codes, .. } => assert!(set_condition_codes),
            _ => panic!("expected data-processing instruction"),
        }
    }

    #[test]
    fn disambiguates_b_and_bl() {
        let b = match_line("b", "#0").ok().unwrap();
        match b.instr {
            ParsedInstr::Branch { link, .. } => assert!(!link),
            _ => panic!(),
        }
        let bl = match_line("bl", "#0").ok().unwrap();
        match bl.instr {
            ParsedInstr::Branch { link, .. } => assert!(link),
            _ => panic!(),
        }
    }

    #[test]
    fn comparison_mnemonics_reject_s_suffix() {
        assert!(matches!(match_line("cmps", "r0, r1"), Err(MatchError::NoSuchOpcode)));
    }

    #[test]
    fn nop_requires_empty_tail() {
        assert!(match_line("nop", "").is_ok());
        assert!(matches!(match_line("nop", "r0"), Err(MatchError::NoSuchData)));
    }

    #[test]
    fn unknown_mnemonic_is_no_such_opcode() {
        assert!(matches!(match_line("frobnicate", "r0"), Err(MatchError::NoSuchOpcode)));
    }

    #[test]
    fn malformed_operands_are_no_such_data() {
        assert!(matches!(match_line("mov", "r0"), Err(MatchError::NoSuchData)));
    }
}
