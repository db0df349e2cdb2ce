//! Bit-flag model for Questsmith records.
//!
//! Records carry boolean attributes (item flags, usable-from statuses, valid
//! targets) packed into a single integer. This crate defines:
//! - [`FlagDefinition`]: a named bit (or the zero "none" sentinel)
//! - [`FlagUniverse`]: the validated, ordered set of definitions for a schema
//! - [`FlagSet`]: the flags selected in one edit session
//!
//! A `FlagSet` knows nothing about universes until it is decoded from an
//! integer; checked toggling goes through [`FlagUniverse::toggle`].

mod definition;
mod set;
mod universe;

pub use definition::{FlagDefinition, has_flag};
pub use set::FlagSet;
pub use universe::FlagUniverse;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, FlagError>;

/// Errors raised while building universes or toggling/decoding flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error("flag '{flag}' is not defined in universe '{universe}'")]
    UnknownFlag { universe: String, flag: String },

    #[error("value {value:#x} has bits {uncovered:#x} not covered by universe '{universe}'")]
    UncoveredBits {
        universe: String,
        value: u64,
        uncovered: u64,
    },

    #[error("invalid flag universe '{universe}': {reason}")]
    InvalidUniverse { universe: String, reason: String },
}
