//! Single data transfer (`LDR`/`STR`/`LDRB`/`STRB`):
//! `cond|011|P|U|B|W|L|Rn|Rd|addr_mode2`.
//!
//! The reference implementation's `enc_sdt` never sets the `I` bit (bit 25)
//! even when the offset is a register rather than an immediate, so a
//! register or shifted-register offset is written into the low 12 bits
//! using the same field layout a data-processing `operand2` would use,
//! under an instruction word that looks like an immediate-offset transfer.
//! This port preserves that quirk rather than silently fixing it
//! (`SPEC_FULL.md` §9).

use super::{EncodeError, Encoded, encode_register, mask_field};
use crate::{
    instr::{TransferKind, TransferSize},
    operand::{AddrMode2, AddrOffset2, IndexMode},
    registers::Register,
};

pub fn encode(
    cond: u32,
    kind: TransferKind,
    size: TransferSize,
    data: Register,
    mode: &AddrMode2,
) -> Result<Encoded, EncodeError> {
    let mut word = cond << 28 | 0b011 << 25;
    let mut warnings = Vec::new();

    match mode.index {
        IndexMode::Pre { writeback } => {
            word |= 1 << 24;
            if writeback {
                word |= 1 << 21;
            }
        }
        IndexMode::Post => {}
    }
    if mode.sign.is_positive() {
        word |= 1 << 23;
    }
    if matches!(size, TransferSize::Byte) {
        word |= 1 << 22;
    }
    if matches!(kind, TransferKind::Load) {
        word |= 1 << 20;
    }

    let (rn, probs) = encode_register(mode.base);
    word |= rn << 16;
    warnings.extend(probs);

    let (rd, probs) = encode_register(data);
    word |= rd << 12;
    warnings.extend(probs);

    let (offset_bits, offset_warnings) = encode_offset(mode.offset);
    word |= offset_bits;
    warnings.extend(offset_warnings);

    Ok(Encoded { word, warnings })
}

fn encode_offset(offset: AddrOffset2) -> (u32, Vec<super::EncodeWarning>) {
    match offset {
        AddrOffset2::Immediate(value) => {
            let (masked, warning) = mask_field(value, 12, "offset");
            (masked, warning.into_iter().collect())
        }
        AddrOffset2::Register(reg) => {
            let (rm, warnings) = encode_register(reg);
            (rm, warnings)
        }
        AddrOffset2::Rrx(reg) => {
            let (rm, warnings) = encode_register(reg);
            (0b11 << 5 | rm, warnings)
        }
        AddrOffset2::Shifted(reg, kind, amount) => {
            let (rm, mut warnings) = encode_register(reg);
            let (amount, warning) = mask_field(amount, 5, "shift amount");
            warnings.extend(warning);
            (amount << 7 | kind.encode() << 5 | rm, warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Sign;

    #[test]
    fn pre_indexed_immediate_never_sets_i_bit() {
        let mode = AddrMode2 {
            base: Register::R0,
            sign: Sign::Positive,
            offset: AddrOffset2::Immediate(4),
            index: IndexMode::Pre { writeback: false },
        };
        let word = encode(0b1110, TransferKind::Load, TransferSize::Word, Register::R1, &mode)
            .unwrap()
            .word;
        assert_eq!(word & (1 << 25), 0);
        assert_eq!(word & 0xFFF, 4);
    }

    #[test]
    fn register_offset_still_leaves_i_bit_clear() {
        let mode = AddrMode2 {
            base: Register::R0,
            sign: Sign::Negative,
            offset: AddrOffset2::Register(Register::R2),
            index: IndexMode::Post,
        };
        let word = encode(0b1110, TransferKind::Store, TransferSize::Byte, Register::R1, &mode)
            .unwrap()
            .word;
        assert_eq!(word & (1 << 25), 0);
        assert_eq!(word & 0xFFF, 2);
    }
}
