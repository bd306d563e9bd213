//! Branch and exchange: `cond|0x12FFF1|Rn`.

use super::{EncodeError, Encoded, encode_register};
use crate::registers::Register;

pub fn encode(cond: u32, target: Register) -> Result<Encoded, EncodeError> {
    let (rn, warnings) = encode_register(target);
    let word = cond << 28 | 0x12FFF1 << 4 | rn;
    Ok(Encoded { word, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bx_r14() {
        assert_eq!(encode(0b1110, Register::R14).unwrap().word, 0xE12FFF1E);
    }
}
