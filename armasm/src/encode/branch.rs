//! Branch and branch-with-link: `cond|101|L|offset24`.
//!
//! The offset is the literal decimal operand written in source, not a label
//! reference, and not scaled or PC-adjusted, per `SPEC_FULL.md` §9.

use super::{EncodeError, Encoded, mask_field};

pub fn encode(cond: u32, link: bool, offset: i64) -> Result<Encoded, EncodeError> {
    let mut word = cond << 28 | 0b101 << 25;
    if link {
        word |= 1 << 24;
    }
    let (field, warning) = mask_field(offset as u32, 24, "branch offset");
    word |= field;
    Ok(Encoded { word, warnings: warning.into_iter().collect() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b_zero() {
        assert_eq!(encode(0b1110, false, 0).unwrap().word, 0xEA000000);
    }

    #[test]
    fn bl_zero() {
        assert_eq!(encode(0b1110, true, 0).unwrap().word, 0xEB000000);
    }
}
