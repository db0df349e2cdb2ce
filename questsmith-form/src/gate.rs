//! Tracks which field groups are live for the selected kind.

use crate::{FormSchema, Kind};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Active/inactive state of a schema's field groups.
///
/// Only activation is tracked here. Values typed into a group that later
/// goes inactive are kept by the owner (see [`crate::EditSession`]) and come
/// back when the group is re-activated.
#[derive(Debug, Clone)]
pub struct TypeGatedForm {
    schema: Arc<FormSchema>,
    kind: Option<Kind>,
    active: Vec<bool>,
}

impl TypeGatedForm {
    /// Creates a form with no kind selected and every group inactive.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let active = vec![false; schema.groups.len()];
        Self {
            schema,
            kind: None,
            active,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The last kind that was selected, if any.
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// Selects a kind and recomputes the active groups.
    ///
    /// `None` leaves the previous selection untouched. A kind that no group
    /// matches is valid and leaves every group inactive.
    pub fn set_kind(&mut self, kind: Option<Kind>) {
        let Some(kind) = kind else {
            debug!("Ignoring empty kind selection, keeping {:?}", self.kind);
            return;
        };

        self.kind = Some(kind);
        self.active.iter_mut().for_each(|a| *a = false);

        let mut primary_taken = false;
        for (i, group) in self.schema.groups.iter().enumerate() {
            if !group.matches(kind) {
                continue;
            }
            if !group.overlapping {
                if primary_taken {
                    continue;
                }
                primary_taken = true;
            }
            self.active[i] = true;
        }

        let active = self.active_groups();
        if active.is_empty() {
            debug!("Kind {} has no specialised section", kind);
        } else {
            debug!("Kind {} activates {:?}", kind, active);
        }
    }

    pub fn is_group_active(&self, group: &str) -> bool {
        self.schema
            .groups
            .iter()
            .zip(&self.active)
            .any(|(g, &on)| on && g.id == group)
    }

    /// Ids of the active groups in schema order.
    pub fn active_groups(&self) -> Vec<&str> {
        self.schema
            .groups
            .iter()
            .zip(&self.active)
            .filter(|(_, on)| **on)
            .map(|(g, _)| g.id.as_str())
            .collect()
    }

    /// Union of the fields of every active group.
    pub fn active_fields(&self) -> BTreeSet<&str> {
        self.schema
            .groups
            .iter()
            .zip(&self.active)
            .filter(|(_, on)| **on)
            .flat_map(|(g, _)| g.fields.iter().map(String::as_str))
            .collect()
    }

    /// Fields that may be validated and submitted right now: every ungated
    /// field plus the active groups' fields, in declaration order.
    pub fn enabled_fields(&self) -> Vec<&str> {
        let gated = self.schema.gated_fields();
        let active = self.active_fields();
        self.schema
            .fields
            .iter()
            .map(|f| f.id.as_str())
            .filter(|id| !gated.contains(id) || active.contains(id))
            .collect()
    }

    pub fn is_field_enabled(&self, field: &str) -> bool {
        if self.schema.field(field).is_none() {
            return false;
        }
        !self.schema.gated_fields().contains(field) || self.active_fields().contains(field)
    }
}
