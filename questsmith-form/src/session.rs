//! One in-progress record edit.
//!
//! A session owns everything the editor mutates: the selected kind, the
//! values typed into each field, and one flag selection per universe. It is
//! created when the editor opens and dropped when the editor closes or the
//! record is handed off.

use crate::schema::{FLAGS_KEY, KIND_KEY};
use crate::{
    FieldSpec, FieldViolation, FormError, FormSchema, Kind, Result, TypeGatedForm,
    ValidationErrors,
};
use questsmith_flags::FlagSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifies an edit session in logs.
/// Uses UUID v7 so ids sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editing state for a single record.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    form: TypeGatedForm,
    values: BTreeMap<String, Value>,
    flags: BTreeMap<String, FlagSet>,
}

impl EditSession {
    /// Opens a session with no kind, no values and empty flag sets.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let flags = schema
            .universes
            .iter()
            .map(|u| (u.name().to_string(), FlagSet::new()))
            .collect();
        let id = SessionId::new();
        debug!("Opened edit session {}", id);
        Self {
            id,
            form: TypeGatedForm::new(schema),
            values: BTreeMap::new(),
            flags,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn schema(&self) -> &FormSchema {
        self.form.schema()
    }

    pub fn form(&self) -> &TypeGatedForm {
        &self.form
    }

    pub fn kind(&self) -> Option<Kind> {
        self.form.kind()
    }

    /// Selects the record's kind; `None` is ignored.
    pub fn set_kind(&mut self, kind: Option<Kind>) {
        self.form.set_kind(kind);
    }

    /// Stores a field value. Disabled fields may be written too; their
    /// values simply stay dormant until the field is enabled again.
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        if self.schema().field(field).is_none() {
            return Err(FormError::UnknownField(field.to_string()));
        }
        self.values.insert(field.to_string(), value.into());
        Ok(())
    }

    /// The stored value of a field, enabled or not.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// The stored value of a field only while the field is enabled.
    pub fn enabled_value(&self, field: &str) -> Option<&Value> {
        if self.form.is_field_enabled(field) {
            self.values.get(field)
        } else {
            None
        }
    }

    pub fn clear_value(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    /// Toggles a flag in the named universe.
    ///
    /// Returns whether the flag is selected afterwards.
    pub fn toggle_flag(&mut self, universe: &str, flag: &str) -> Result<bool> {
        let definitions = self
            .form
            .schema()
            .universe(universe)
            .ok_or_else(|| FormError::UnknownUniverse(universe.to_string()))?;
        let set = self
            .flags
            .get_mut(universe)
            .ok_or_else(|| FormError::UnknownUniverse(universe.to_string()))?;
        Ok(definitions.toggle(set, flag)?)
    }

    pub fn flags(&self, universe: &str) -> Option<&FlagSet> {
        self.flags.get(universe)
    }

    /// Replaces a universe's selection with the flags packed in `value`.
    ///
    /// Bits the universe does not define are dropped.
    pub fn load_flags(&mut self, universe: &str, value: u64) -> Result<()> {
        let decoded = self
            .form
            .schema()
            .universe(universe)
            .ok_or_else(|| FormError::UnknownUniverse(universe.to_string()))?
            .decode(value);
        self.flags.insert(universe.to_string(), decoded);
        Ok(())
    }

    /// The packed integer for a universe (0 if nothing is selected).
    pub fn flag_value(&self, universe: &str) -> Result<u64> {
        self.flags
            .get(universe)
            .map(FlagSet::to_integer)
            .ok_or_else(|| FormError::UnknownUniverse(universe.to_string()))
    }

    /// Checks every enabled field against its rules.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let enabled: BTreeSet<&str> = self.form.enabled_fields().into_iter().collect();
        let violations: Vec<FieldViolation> = self
            .schema()
            .fields
            .iter()
            .filter(|spec| enabled.contains(spec.id.as_str()))
            .filter_map(|spec| check_field(spec, self.values.get(&spec.id)))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            debug!("Session {} has {} invalid fields", self.id, violations.len());
            Err(ValidationErrors { violations })
        }
    }

    /// Validates and assembles the record handed to the API client.
    ///
    /// The object holds every enabled field that has a value, the selected
    /// `kind` (when one is set) and a `flags` object mapping each universe
    /// name to its packed integer.
    pub fn submit(&self) -> Result<Value> {
        self.validate()?;

        let mut record = Map::new();
        for field in self.form.enabled_fields() {
            match self.values.get(field) {
                Some(v) if !v.is_null() => {
                    record.insert(field.to_string(), v.clone());
                }
                _ => {}
            }
        }
        if let Some(kind) = self.kind() {
            record.insert(KIND_KEY.into(), Value::from(kind.0));
        }
        let flags: Map<String, Value> = self
            .flags
            .iter()
            .map(|(name, set)| (name.clone(), Value::from(set.to_integer())))
            .collect();
        record.insert(FLAGS_KEY.into(), Value::Object(flags));

        info!(
            "Session {} submitted {} fields (kind={:?})",
            self.id,
            record.len() - 1,
            self.kind()
        );
        Ok(Value::Object(record))
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn check_field(spec: &FieldSpec, value: Option<&Value>) -> Option<FieldViolation> {
    let field = spec.id.clone();
    if is_blank(value) {
        return spec.required.then_some(FieldViolation::Missing { field });
    }
    if spec.min.is_none() && spec.max.is_none() {
        return None;
    }

    let Some(actual) = value.and_then(as_number) else {
        return Some(FieldViolation::NotANumber { field });
    };
    if let Some(min) = spec.min.filter(|&min| actual < min) {
        return Some(FieldViolation::BelowMinimum { field, min, actual });
    }
    if let Some(max) = spec.max.filter(|&max| actual > max) {
        return Some(FieldViolation::AboveMaximum { field, max, actual });
    }
    None
}
