//! `nop` has no canonical ARMv5 encoding; the reference implementation emits
//! `mov r0, r0` under the current condition instead.

pub fn encode(cond: u32) -> u32 {
    cond << 28 | 0x320F000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_is_mov_r0_r0() {
        assert_eq!(encode(0b1110), 0xE320F000);
    }
}
