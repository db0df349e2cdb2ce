//! The flags selected while editing one record.

use crate::FlagDefinition;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered selection of flags owned by a single edit session.
///
/// Iteration follows selection order (or universe order after decoding), but
/// equality is set equality: two sets with the same members compare equal
/// regardless of the order they were toggled in.
///
/// Deserializing rebuilds the set through [`FromIterator`], so duplicate
/// entries collapse and zero sentinels are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FlagDefinition>", into = "Vec<FlagDefinition>")]
pub struct FlagSet {
    members: Vec<FlagDefinition>,
}

impl FlagSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection from a packed integer.
    ///
    /// Each flag of `universe` whose bit is set in `value` becomes a member,
    /// in `universe` order. Bits that no flag covers are dropped silently;
    /// use [`crate::FlagUniverse::decode`] to have them reported.
    pub fn from_integer<'a, I>(value: u64, universe: I) -> Self
    where
        I: IntoIterator<Item = &'a FlagDefinition>,
    {
        let members = universe
            .into_iter()
            .filter(|flag| flag.is_set_in(value))
            .cloned()
            .collect();
        Self { members }
    }

    /// Flips membership of `flag` and returns whether it is now selected.
    ///
    /// The zero sentinel occupies no bit and is never added.
    pub fn toggle(&mut self, flag: &FlagDefinition) -> bool {
        if flag.is_sentinel() {
            debug!("Ignoring toggle of sentinel flag {}", flag.name);
            return false;
        }

        if let Some(pos) = self.members.iter().position(|m| m == flag) {
            self.members.remove(pos);
            debug!("Flag {} cleared", flag.name);
            false
        } else {
            self.members.push(flag.clone());
            debug!("Flag {} set", flag.name);
            true
        }
    }

    /// Returns true if `flag` is currently selected.
    #[must_use]
    pub fn is_set(&self, flag: &FlagDefinition) -> bool {
        self.members.contains(flag)
    }

    /// Packs the selection into a single integer (0 when empty).
    #[must_use]
    pub fn to_integer(&self) -> u64 {
        self.members.iter().fold(0, |acc, flag| acc | flag.value)
    }

    /// Returns the number of selected flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates the selected flags in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDefinition> {
        self.members.iter()
    }

    /// Names of the selected flags in selection order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|f| f.name.as_str()).collect()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

impl PartialEq for FlagSet {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|m| other.members.contains(m))
    }
}

impl Eq for FlagSet {}

impl<'a> FromIterator<&'a FlagDefinition> for FlagSet {
    fn from_iter<I: IntoIterator<Item = &'a FlagDefinition>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            if !set.is_set(flag) {
                set.toggle(flag);
            }
        }
        set
    }
}

impl From<Vec<FlagDefinition>> for FlagSet {
    fn from(members: Vec<FlagDefinition>) -> Self {
        members.iter().collect()
    }
}

impl From<FlagSet> for Vec<FlagDefinition> {
    fn from(set: FlagSet) -> Self {
        set.members
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a FlagDefinition;
    type IntoIter = std::slice::Iter<'a, FlagDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
