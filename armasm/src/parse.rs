//! A small recursive-descent parser for operand tails, replacing the
//! reference grammar's per-shape regular expressions (`SPEC_FULL.md` §9).
//!
//! Every `parse_*` method either consumes its shape and returns `Ok`, or
//! leaves `self.remaining` untouched and returns `Err(())` so the caller can
//! try the next alternative. Full-tail matches are enforced by the caller
//! checking that `self.remaining` is empty once a shape has been parsed.

use crate::{
    operand::{AddrMode2, AddrOffset2, DataOperand2, IndexMode, ShiftAmount, ShiftKind, Sign},
    registers::Register,
};

pub type PResult<T> = Result<T, ()>;

pub struct TailParser<'a> {
    remaining: &'a str,
}

impl<'a> TailParser<'a> {
    pub fn new(tail: &'a str) -> Self {
        TailParser { remaining: tail }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn checkpoint(&self) -> &'a str {
        self.remaining
    }

    fn restore(&mut self, checkpoint: &'a str) {
        self.remaining = checkpoint;
    }

    fn skip_ws(&mut self) {
        self.remaining = self.remaining.trim_start();
    }

    fn eat(&mut self, literal: &str) -> bool {
        self.skip_ws();
        if let Some(rest) = self.remaining.strip_prefix(literal) {
            self.remaining = rest;
            true
        } else {
            false
        }
    }

    pub fn eat_comma(&mut self) -> PResult<()> {
        if self.eat(",") { Ok(()) } else { Err(()) }
    }

    /// Parses a bare register, e.g. `r0`.
    pub fn parse_register(&mut self) -> PResult<Register> {
        self.skip_ws();
        let start = self.remaining;
        let end = start
            .find(|c: char| !(c.is_ascii_alphanumeric()))
            .unwrap_or(start.len());
        let (token, rest) = start.split_at(end);
        match Register::parse(token) {
            Some(reg) => {
                self.remaining = rest;
                Ok(reg)
            }
            None => Err(()),
        }
    }

    /// Parses `#<decimal>`.
    pub fn parse_immediate(&mut self) -> PResult<u32> {
        self.skip_ws();
        let rest = self.remaining.strip_prefix('#').ok_or(())?;
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(());
        }
        let (digits, tail) = rest.split_at(end);
        let value: u32 = digits.parse().map_err(|_| ())?;
        self.remaining = tail;
        Ok(value)
    }

    /// Parses an optional `+`/`-` sign; absence means positive.
    pub fn parse_sign(&mut self) -> Sign {
        self.skip_ws();
        if self.eat("-") {
            Sign::Negative
        } else {
            self.eat("+");
            Sign::Positive
        }
    }

    fn parse_shift_kind(&mut self) -> PResult<ShiftKind> {
        self.skip_ws();
        for (literal, kind) in [
            ("lsl", ShiftKind::Lsl),
            ("lsr", ShiftKind::Lsr),
            ("asr", ShiftKind::Asr),
            ("ror", ShiftKind::Ror),
        ] {
            if self.eat(literal) {
                return Ok(kind);
            }
        }
        Err(())
    }

    /// Parses the operand-2 alternation: a register optionally followed by
    /// `, <shift> <amount>` or `, rrx`, or else a bare immediate.
    pub fn parse_data_operand2(&mut self) -> PResult<DataOperand2> {
        let checkpoint = self.checkpoint();
        if let Ok(reg) = self.parse_register() {
            let after_reg = self.checkpoint();
            if self.eat_comma().is_ok() {
                self.skip_ws();
                if self.eat("rrx") {
                    return Ok(DataOperand2::Rrx(reg));
                }
                if let Ok(kind) = self.parse_shift_kind() {
                    self.skip_ws();
                    if let Ok(amount_reg) = self.parse_register() {
                        return Ok(DataOperand2::Shifted(
                            reg,
                            kind,
                            ShiftAmount::Register(amount_reg),
                        ));
                    }
                    if let Ok(amount) = self.parse_immediate() {
                        return Ok(DataOperand2::Shifted(
                            reg,
                            kind,
                            ShiftAmount::Immediate(amount),
                        ));
                    }
                    self.restore(checkpoint);
                    return Err(());
                }
            }
            self.restore(after_reg);
            return Ok(DataOperand2::Register(reg));
        }
        self.restore(checkpoint);
        if let Ok(imm) = self.parse_immediate() {
            return Ok(DataOperand2::Immediate(imm));
        }
        self.restore(checkpoint);
        Err(())
    }

    /// Parses one of the 14 addressing-mode-2 shapes.
    pub fn parse_addr_mode2(&mut self) -> PResult<AddrMode2> {
        self.skip_ws();
        if !self.eat("[") {
            return Err(());
        }
        let base = self.parse_register()?;
        self.skip_ws();
        if self.eat("]") {
            // Post-indexed: `[Rn], <offset>`
            self.eat_comma()?;
            let sign = self.parse_sign();
            let offset = self.parse_addr_offset2()?;
            return Ok(AddrMode2 {
                base,
                sign,
                offset,
                index: IndexMode::Post,
            });
        }
        // Pre-indexed: `[Rn, <offset>]{!}`
        self.eat_comma()?;
        let sign = self.parse_sign();
        let offset = self.parse_addr_offset2()?;
        self.skip_ws();
        if !self.eat("]") {
            return Err(());
        }
        let writeback = self.eat("!");
        Ok(AddrMode2 {
            base,
            sign,
            offset,
            index: IndexMode::Pre { writeback },
        })
    }

    /// Parses the offset portion shared by pre- and post-indexed addressing
    /// mode 2: an immediate, a bare register, a register shifted by an
    /// immediate (never a register-specified shift amount, matching the
    /// reference grammar), or a register RRX'd.
    fn parse_addr_offset2(&mut self) -> PResult<AddrOffset2> {
        let checkpoint = self.checkpoint();
        if let Ok(imm) = self.parse_immediate() {
            return Ok(AddrOffset2::Immediate(imm));
        }
        self.restore(checkpoint);
        let reg = self.parse_register()?;
        let after_reg = self.checkpoint();
        if self.eat_comma().is_ok() {
            self.skip_ws();
            if self.eat("rrx") {
                return Ok(AddrOffset2::Rrx(reg));
            }
            if let Ok(kind) = self.parse_shift_kind() {
                self.skip_ws();
                if let Ok(amount) = self.parse_immediate() {
                    return Ok(AddrOffset2::Shifted(reg, kind, amount));
                }
            }
            self.restore(after_reg);
        }
        Ok(AddrOffset2::Register(reg))
    }

    pub fn finish(&self) -> PResult<()> {
        if self.remaining.trim().is_empty() {
            Ok(())
        } else {
            Err(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_op2(tail: &str) -> DataOperand2 {
        let mut p = TailParser::new(tail);
        let op = p.parse_data_operand2().expect("operand2 should parse");
        p.finish().expect("operand2 should consume whole tail");
        op
    }

    #[test]
    fn parses_bare_register() {
        assert!(matches!(parse_op2("r1"), DataOperand2::Register(Register::R1)));
    }

    #[test]
    fn parses_immediate() {
        assert!(matches!(parse_op2("#17"), DataOperand2::Immediate(17)));
    }

    #[test]
    fn parses_shifted_register_immediate_amount() {
        match parse_op2("r0, lsl #2") {
            DataOperand2::Shifted(Register::R0, ShiftKind::Lsl, ShiftAmount::Immediate(2)) => {}
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn parses_shifted_register_register_amount() {
        match parse_op2("r0, ror r5") {
            DataOperand2::Shifted(Register::R0, ShiftKind::Ror, ShiftAmount::Register(Register::R5)) => {}
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn parses_rrx() {
        assert!(matches!(parse_op2("r3, rrx"), DataOperand2::Rrx(Register::R3)));
    }

    #[test]
    fn parses_pre_indexed_immediate_with_writeback() {
        let mut p = TailParser::new("[r0, #4]!");
        let mode = p.parse_addr_mode2().unwrap();
        assert!(matches!(mode.offset, AddrOffset2::Immediate(4)));
        assert!(matches!(mode.index, IndexMode::Pre { writeback: true }));
    }

    #[test]
    fn parses_post_indexed_register_negative() {
        let mut p = TailParser::new("[r0], -r1");
        let mode = p.parse_addr_mode2().unwrap();
        assert_eq!(mode.sign, Sign::Negative);
        assert!(matches!(mode.offset, AddrOffset2::Register(Register::R1)));
        assert!(matches!(mode.index, IndexMode::Post));
    }

    #[test]
    fn parses_pre_indexed_shifted_register() {
        let mut p = TailParser::new("[r2, r3, lsl #2]");
        let mode = p.parse_addr_mode2().unwrap();
        assert!(matches!(mode.offset, AddrOffset2::Shifted(Register::R3, ShiftKind::Lsl, 2)));
    }
}
