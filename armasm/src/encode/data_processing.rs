//! Data-processing instructions: `cond|00|I|opcode|S|Rn|Rd|operand2`.

use super::{EncodeError, Encoded, encode_register, mask_field};
use crate::{
    instr::DataOp,
    operand::{DataOperand2, ShiftAmount},
    registers::Register,
};

pub fn encode(
    cond: u32,
    op: DataOp,
    set_condition_codes: bool,
    dest: Register,
    op1: Register,
    op2: DataOperand2,
) -> Result<Encoded, EncodeError> {
    let mut word = cond << 28 | op.encode() << 21;
    let mut warnings = Vec::new();

    if set_condition_codes {
        word |= 1 << 20;
    }

    if !op.is_unary() && !op.is_comparison() {
        let (rn, probs) = encode_register(op1);
        word |= rn << 16;
        warnings.extend(probs);
    }
    let (rd, probs) = encode_register(dest);
    word |= rd << 12;
    warnings.extend(probs);

    let (operand2_bits, is_immediate, op2_warnings) = encode_operand2(op2);
    if is_immediate {
        word |= 1 << 25;
    }
    word |= operand2_bits;
    warnings.extend(op2_warnings);

    Ok(Encoded { word, warnings })
}

/// Returns the 12-bit `operand2` field, whether it is the immediate form
/// (`I` bit), and any range-check warnings.
fn encode_operand2(op2: DataOperand2) -> (u32, bool, Vec<super::EncodeWarning>) {
    match op2 {
        DataOperand2::Immediate(value) => {
            // No ARM rotated-immediate encoding: the 12-bit field is the raw
            // value, masked, per `SPEC_FULL.md` §9.
            let (masked, warning) = mask_field(value, 12, "immediate constant");
            (masked, true, warning.into_iter().collect())
        }
        DataOperand2::Register(reg) => {
            let (rm, warnings) = encode_register(reg);
            (rm, false, warnings)
        }
        DataOperand2::Rrx(reg) => {
            let (rm, warnings) = encode_register(reg);
            let bits = 0b11 << 5 | rm;
            (bits, false, warnings)
        }
        DataOperand2::Shifted(reg, kind, ShiftAmount::Immediate(amount)) => {
            let (rm, mut warnings) = encode_register(reg);
            let (amount, warning) = mask_field(amount, 5, "shift amount");
            warnings.extend(warning);
            let bits = amount << 7 | kind.encode() << 5 | rm;
            (bits, false, warnings)
        }
        DataOperand2::Shifted(reg, kind, ShiftAmount::Register(shift_reg)) => {
            let (rm, mut warnings) = encode_register(reg);
            let (rs, rs_warnings) = encode_register(shift_reg);
            warnings.extend(rs_warnings);
            let bits = rs << 8 | kind.encode() << 5 | 1 << 4 | rm;
            (bits, false, warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::Cond;

    fn run(op: DataOp, s: bool, dest: Register, op1: Register, op2: DataOperand2) -> u32 {
        encode(Cond::Al.encode(), op, s, dest, op1, op2).unwrap().word
    }

    #[test]
    fn mov_register_to_register() {
        assert_eq!(
            run(DataOp::Mov, false, Register::R0, Register::R0, DataOperand2::Register(Register::R1)),
            0xE1A00001
        );
    }

    #[test]
    fn add_register_register_register() {
        assert_eq!(
            run(DataOp::Add, false, Register::R3, Register::R4, DataOperand2::Register(Register::R5)),
            0xE0843005
        );
    }

    #[test]
    fn sub_with_lsl_immediate_shift() {
        assert_eq!(
            run(
                DataOp::Sub,
                false,
                Register::R0,
                Register::R0,
                DataOperand2::Shifted(Register::R0, crate::operand::ShiftKind::Lsl, ShiftAmount::Immediate(2)),
            ),
            0xE0400100
        );
    }

    #[test]
    fn immediate_operand_sets_i_bit_and_raw_field() {
        let word = encode(
            crate::cond::Cond::Eq.encode(),
            DataOp::Add,
            false,
            Register::R3,
            Register::R4,
            DataOperand2::Immediate(1),
        )
        .unwrap()
        .word;
        assert_eq!(word, 0x02843001);
    }

    #[test]
    fn oversized_immediate_is_masked_with_a_warning() {
        let result = encode(Cond::Al.encode(), DataOp::Mov, false, Register::R0, Register::R0, DataOperand2::Immediate(0x1234)).unwrap();
        assert_eq!(result.word & 0xFFF, 0x234);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn r14_operand_warns_but_still_encodes() {
        let result = encode(Cond::Al.encode(), DataOp::Mov, false, Register::R0, Register::R0, DataOperand2::Register(Register::R14)).unwrap();
        assert_eq!(result.word & 0xF, 14);
        assert_eq!(result.warnings.len(), 1);
    }
}
