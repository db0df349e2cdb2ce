//! Form schemas: fields, kind-gated groups and flag universes.

use crate::{FormError, Result};
use questsmith_flags::FlagUniverse;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Key under which a submitted record carries the selected kind.
pub(crate) const KIND_KEY: &str = "kind";
/// Key under which a submitted record carries the packed flag integers.
pub(crate) const FLAGS_KEY: &str = "flags";

/// Discriminant selecting a record subtype (e.g. armour = 0, weapon = 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(pub i64);

impl From<i64> for Kind {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation rules for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldSpec {
    /// An optional field with no numeric bounds.
    pub fn optional(id: &str) -> Self {
        Self {
            id: id.into(),
            required: false,
            min: None,
            max: None,
        }
    }

    /// A field that must hold a non-empty value when enabled.
    pub fn required(id: &str) -> Self {
        Self {
            required: true,
            ..Self::optional(id)
        }
    }

    /// Constrains a numeric field to `min..=max`.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// A named cluster of fields that is live only for certain kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub id: String,
    pub fields: Vec<String>,
    /// Kinds that activate this group.
    pub kinds: Vec<Kind>,
    /// Allows this group's kinds to coincide with another group's.
    #[serde(default)]
    pub overlapping: bool,
}

impl FieldGroup {
    pub fn new(id: &str, fields: &[&str], kinds: &[i64]) -> Self {
        Self {
            id: id.into(),
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            kinds: kinds.iter().copied().map(Kind).collect(),
            overlapping: false,
        }
    }

    /// Marks the group as intentionally sharing kinds with other groups.
    #[must_use]
    pub fn overlapping(mut self) -> Self {
        self.overlapping = true;
        self
    }

    /// Returns true if `kind` activates this group.
    pub fn matches(&self, kind: Kind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// The complete description of one record editor.
///
/// Fields not listed in any group are always enabled; grouped fields are
/// enabled only while their group is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub groups: Vec<FieldGroup>,
    #[serde(default)]
    pub universes: Vec<FlagUniverse>,
}

impl FormSchema {
    /// Parses and validates a schema from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let schema: Self = toml::from_str(s)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Checks the schema's structural invariants.
    pub fn validate(&self) -> Result<()> {
        let mut field_ids = HashSet::new();
        for field in &self.fields {
            if field.id.is_empty() {
                return Err(FormError::SchemaInvalid("field id is required".into()));
            }
            if field.id == KIND_KEY || field.id == FLAGS_KEY {
                return Err(FormError::SchemaInvalid(format!(
                    "field id '{}' is reserved for submitted records",
                    field.id
                )));
            }
            if !field_ids.insert(field.id.as_str()) {
                return Err(FormError::SchemaInvalid(format!(
                    "duplicate field '{}'",
                    field.id
                )));
            }
            if let (Some(min), Some(max)) = (field.min, field.max) {
                if min > max {
                    return Err(FormError::SchemaInvalid(format!(
                        "field '{}' has min {min} greater than max {max}",
                        field.id
                    )));
                }
            }
        }

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id.as_str()) {
                return Err(FormError::SchemaInvalid(format!(
                    "duplicate group '{}'",
                    group.id
                )));
            }
            if let Some(missing) = group.fields.iter().find(|f| !field_ids.contains(f.as_str())) {
                return Err(FormError::SchemaInvalid(format!(
                    "group '{}' references undeclared field '{missing}'",
                    group.id
                )));
            }
        }

        // Non-overlapping groups must not share a kind, otherwise two
        // "primary" sections could be live at once.
        for (i, a) in self.groups.iter().enumerate() {
            for b in &self.groups[i + 1..] {
                if a.overlapping || b.overlapping {
                    continue;
                }
                if let Some(kind) = a.kinds.iter().find(|&k| b.kinds.contains(k)) {
                    return Err(FormError::SchemaInvalid(format!(
                        "groups '{}' and '{}' both activate on kind {kind}",
                        a.id, b.id
                    )));
                }
            }
        }

        let mut universe_names = HashSet::new();
        for universe in &self.universes {
            if !universe_names.insert(universe.name()) {
                return Err(FormError::SchemaInvalid(format!(
                    "duplicate flag universe '{}'",
                    universe.name()
                )));
            }
        }

        Ok(())
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn universe(&self, name: &str) -> Option<&FlagUniverse> {
        self.universes.iter().find(|u| u.name() == name)
    }

    /// Every field that belongs to at least one group.
    pub fn gated_fields(&self) -> BTreeSet<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter().map(String::as_str))
            .collect()
    }

    /// Fields that are enabled regardless of kind, in declaration order.
    pub fn ungated_fields(&self) -> Vec<&str> {
        let gated = self.gated_fields();
        self.fields
            .iter()
            .map(|f| f.id.as_str())
            .filter(|id| !gated.contains(id))
            .collect()
    }
}
