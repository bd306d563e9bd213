//! Multiply and multiply-accumulate: `cond|000000|A|S|Rd|Rn|Rs|1001|Rm`.

use super::{Encoded, encode_register};
use crate::registers::Register;

pub fn encode(
    cond: u32,
    accumulate: bool,
    set_condition_codes: bool,
    dest: Register,
    op1: Register,
    op2: Register,
    addend: Register,
) -> Encoded {
    let mut word = cond << 28 | 0b1001 << 4;
    let mut warnings = Vec::new();

    if accumulate {
        word |= 1 << 21;
    }
    if set_condition_codes {
        word |= 1 << 20;
    }

    let (rd, probs) = encode_register(dest);
    word |= rd << 16;
    warnings.extend(probs);

    if accumulate {
        let (rn, probs) = encode_register(addend);
        word |= rn << 12;
        warnings.extend(probs);
    }

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
    fn mul_encodes_rd_rs_rm() {
        let word = encode(0b1110, false, false, Register::R0, Register::R1, Register::R2, Register::R0).word;
        assert_eq!(word, 0xE0000291);
    }

    #[test]
    fn mla_sets_accumulate_bit_and_rn_field() {
        let word = encode(0b1110, true, false, Register::R0, Register::R1, Register::R2, Register::R3).word;
        assert_eq!(word, 0xE0203291);
    }
}
