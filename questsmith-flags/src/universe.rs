//! Validated flag universes.
//!
//! A universe is the full, ordered list of flags a schema knows about. It is
//! what turns a stored integer back into a [`FlagSet`] and what callers check
//! toggles against.

use crate::{FlagDefinition, FlagError, FlagSet, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The ordered, validated set of flags for one schema.
///
/// Invariants:
/// - names are non-empty and unique
/// - values are pairwise distinct powers of two
/// - a zero-valued sentinel may appear, but only at index 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUniverse", into = "RawUniverse")]
pub struct FlagUniverse {
    name: String,
    flags: Vec<FlagDefinition>,
}

#[derive(Serialize, Deserialize)]
struct RawUniverse {
    name: String,
    flags: Vec<FlagDefinition>,
}

impl TryFrom<RawUniverse> for FlagUniverse {
    type Error = FlagError;

    fn try_from(raw: RawUniverse) -> Result<Self> {
        Self::new(raw.name, raw.flags)
    }
}

impl From<FlagUniverse> for RawUniverse {
    fn from(universe: FlagUniverse) -> Self {
        Self {
            name: universe.name,
            flags: universe.flags,
        }
    }
}

impl FlagUniverse {
    /// Builds a universe from explicit definitions, validating every invariant.
    pub fn new(name: impl Into<String>, flags: Vec<FlagDefinition>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| FlagError::InvalidUniverse {
            universe: name.clone(),
            reason,
        };

        let mut names = HashSet::new();
        let mut seen_bits = 0u64;
        for (index, flag) in flags.iter().enumerate() {
            if flag.name.is_empty() {
                return Err(invalid(format!("flag at index {index} has an empty name")));
            }
            if !names.insert(flag.name.as_str()) {
                return Err(invalid(format!("duplicate flag name '{}'", flag.name)));
            }
            if flag.is_sentinel() {
                if index != 0 {
                    return Err(invalid(format!(
                        "sentinel '{}' must be the first flag, found at index {index}",
                        flag.name
                    )));
                }
                continue;
            }
            if !flag.value.is_power_of_two() {
                return Err(invalid(format!(
                    "'{}' has value {} which is not a power of two",
                    flag.name, flag.value
                )));
            }
            if seen_bits & flag.value != 0 {
                return Err(invalid(format!(
                    "'{}' reuses bit {:#x}",
                    flag.name, flag.value
                )));
            }
            seen_bits |= flag.value;
        }

        Ok(Self { name, flags })
    }

    /// Builds a universe by shifting each flag's index into a bit.
    ///
    /// The first name becomes the zero sentinel; the name at index `i > 0`
    /// gets the value `1 << i`.
    pub fn from_names<S: AsRef<str>>(name: impl Into<String>, names: &[S]) -> Result<Self> {
        let name = name.into();
        if names.len() > u64::BITS as usize {
            return Err(FlagError::InvalidUniverse {
                reason: format!("{} names do not fit in 64 bits", names.len()),
                universe: name,
            });
        }

        let flags = names
            .iter()
            .enumerate()
            .map(|(index, flag)| {
                let value = if index == 0 { 0 } else { 1u64 << index };
                FlagDefinition::new(flag.as_ref(), value)
            })
            .collect();
        Self::new(name, flags)
    }

    /// The universe's name (e.g. "item", "status").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a flag by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagDefinition> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Iterates the flags in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDefinition> {
        self.flags.iter()
    }

    /// Number of definitions, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if the universe defines no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Bitwise OR of every defined flag.
    #[must_use]
    pub fn mask(&self) -> u64 {
        self.flags.iter().fold(0, |acc, f| acc | f.value)
    }

    /// Bits of `value` that no flag in this universe covers.
    #[must_use]
    pub fn uncovered_bits(&self, value: u64) -> u64 {
        value & !self.mask()
    }

    /// Toggles the named flag in `set`, rejecting names outside the universe.
    ///
    /// Returns whether the flag is selected after the toggle.
    pub fn toggle(&self, set: &mut FlagSet, name: &str) -> Result<bool> {
        let flag = self.get(name).ok_or_else(|| FlagError::UnknownFlag {
            universe: self.name.clone(),
            flag: name.to_string(),
        })?;
        Ok(set.toggle(flag))
    }

    /// Packs the named flags into an integer, rejecting unknown names.
    pub fn encode<S: AsRef<str>>(&self, names: &[S]) -> Result<u64> {
        let mut set = FlagSet::new();
        for name in names {
            let flag = self.get(name.as_ref()).ok_or_else(|| FlagError::UnknownFlag {
                universe: self.name.clone(),
                flag: name.as_ref().to_string(),
            })?;
            if !set.is_set(flag) {
                set.toggle(flag);
            }
        }
        Ok(set.to_integer())
    }

    /// Decodes a stored integer, dropping bits this universe does not cover.
    ///
    /// Dropped bits usually mean the record was written under an older
    /// schema; they are logged and lost.
    pub fn decode(&self, value: u64) -> FlagSet {
        let uncovered = self.uncovered_bits(value);
        if uncovered != 0 {
            warn!(
                "Dropping bits {:#x} of {:#x}: not covered by universe '{}'",
                uncovered, value, self.name
            );
        }
        let set = FlagSet::from_integer(value, &self.flags);
        debug!("Decoded {:#x} in '{}' as {:?}", value, self.name, set.names());
        set
    }

    /// Decodes a stored integer, failing if any bit is not covered.
    pub fn decode_strict(&self, value: u64) -> Result<FlagSet> {
        let uncovered = self.uncovered_bits(value);
        if uncovered != 0 {
            return Err(FlagError::UncoveredBits {
                universe: self.name.clone(),
                value,
                uncovered,
            });
        }
        Ok(FlagSet::from_integer(value, &self.flags))
    }
}

impl<'a> IntoIterator for &'a FlagUniverse {
    type Item = &'a FlagDefinition;
    type IntoIter = std::slice::Iter<'a, FlagDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
