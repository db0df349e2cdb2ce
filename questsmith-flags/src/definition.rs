use serde::{Deserialize, Serialize};
use std::fmt;

/// A named flag and the bit it occupies.
///
/// A value of zero marks the "none" sentinel; every other value is a single
/// power of two. The invariant is checked by [`crate::FlagUniverse`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagDefinition {
    pub name: String,
    pub value: u64,
}

impl FlagDefinition {
    /// Creates a definition without validating the value.
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns true for the zero-valued "none" sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.value == 0
    }

    /// Returns true if `packed` has this flag's bit set.
    #[must_use]
    pub const fn is_set_in(&self, packed: u64) -> bool {
        has_flag(packed, self.value)
    }
}

impl fmt::Display for FlagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.name, self.value)
    }
}

/// Membership test on a packed integer: `(value & flag) != 0`.
#[must_use]
pub const fn has_flag(value: u64, flag: u64) -> bool {
    value & flag != 0
}
