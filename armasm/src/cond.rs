//! The 15 condition codes a mnemonic may be suffixed with, plus `al`.

use std::fmt::Display;

use num_derive::FromPrimitive;
use serde_repr::Serialize_repr;

/// A condition under which an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, Serialize_repr)]
#[repr(u8)]
pub enum Cond {
    Eq,
    Ne,
    Cs,
    Cc,
    Mi,
    Pl,
    Vs,
    Vc,
    Hi,
    Ls,
    Ge,
    Lt,
    Gt,
    Le,
    Al,
}

/// The condition table (`cond_t`), in the fixed order used by the grammar's
/// longest-suffix matching: each entry is the two-letter mnemonic suffix and
/// the condition it denotes.
pub const COND_TABLE: [(&str, Cond); 14] = [
    ("eq", Cond::Eq),
    ("ne", Cond::Ne),
    ("cs", Cond::Cs),
    ("cc", Cond::Cc),
    ("mi", Cond::Mi),
    ("pl", Cond::Pl),
    ("vs", Cond::Vs),
    ("vc", Cond::Vc),
    ("hi", Cond::Hi),
    ("ls", Cond::Ls),
    ("ge", Cond::Ge),
    ("lt", Cond::Lt),
    ("gt", Cond::Gt),
    ("le", Cond::Le),
];

impl Cond {
    /// The 4-bit field this condition encodes to (bits 31..28).
    pub fn encode(self) -> u32 {
        self as u32
    }
}

impl Display for Cond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cond::Al => Ok(()),
            _ => {
                let (name, _) = COND_TABLE[*self as usize];
                write!(f, "{name}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_to_match_bit_patterns() {
        for (i, (_, cond)) in COND_TABLE.iter().enumerate() {
            assert_eq!(*cond as usize, i);
        }
    }

    #[test]
    fn al_has_highest_encoding() {
        assert_eq!(Cond::Al.encode(), 0b1110);
    }
}
