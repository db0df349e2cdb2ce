//! Kind-gated forms for Questsmith records.
//!
//! A record's *kind* (armour, weapon, book, ...) decides which specialised
//! field groups are live. This crate holds:
//! - [`Kind`]: the integer discriminant chosen by the user
//! - [`FormSchema`]: fields, kind-gated [`FieldGroup`]s and flag universes
//! - [`TypeGatedForm`]: tracks which groups are active for the current kind
//! - [`EditSession`]: one in-progress record: values, kind, flags, submit
//!
//! Schemas are plain data and can be loaded from TOML.

mod error;
mod gate;
mod schema;
mod session;

pub use error::{FieldViolation, FormError, Result, ValidationErrors};
pub use gate::TypeGatedForm;
pub use schema::{FieldGroup, FieldSpec, FormSchema, Kind};
pub use session::{EditSession, SessionId};
