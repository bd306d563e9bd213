//! Long multiply/multiply-accumulate: `cond|00001|U|A|S|RdHi|RdLo|Rs|1001|Rm`.

use super::{Encoded, encode_register};
use crate::registers::Register;

pub fn encode(
    cond: u32,
    signed: bool,
    accumulate: bool,
    set_condition_codes: bool,
    dest_hi: Register,
    dest_lo: Register,
    op1: Register,
    op2: Register,
) -> Encoded {
    let mut word = cond << 28 | 0b1 << 23 | 0b1001 << 4;
    let mut warnings = Vec::new();

    if !signed {
        word |= 1 << 22;
    }
    if accumulate {
        word |= 1 << 21;
    }
    if set_condition_codes {
        word |= 1 << 20;
    }

    let (rdhi, probs) = encode_register(dest_hi);
    word |= rdhi << 16;
    warnings.extend(probs);

    let (rdlo, probs) = encode_register(dest_lo);
    word |= rdlo << 12;
    warnings.extend(probs);

    let (rs, probs) = encode_register(op2);
    word |= rs << 8;
    warnings.extend(probs);

    let (rm, probs) = encode_register(op1);
    word |= rm;
    warnings.extend(probs);

    Encoded { word, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umull_sets_u_bit_for_unsigned() {
        let word = encode(0b1110, false, false, false, Register::R1, Register::R0, Register::R2, Register::R3).word;
        assert_eq!(word & (1 << 22), 1 << 22);
        assert_eq!(word & (1 << 23), 1 << 23);
    }

    #[test]
    fn smlal_clears_u_bit_and_sets_accumulate() {
        let word = encode(0b1110, true, true, false, Register::R1, Register::R0, Register::R2, Register::R3).word;
        assert_eq!(word & (1 << 22), 0);
        assert_eq!(word & (1 << 21), 1 << 21);
    }
}
