//! Error types for the form crate.

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, FormError>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("flag error: {0}")]
    Flag(#[from] questsmith_flags::FlagError),

    #[error("schema validation error: {0}")]
    SchemaInvalid(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown flag universe: {0}")]
    UnknownUniverse(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

/// A single rule broken by a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldViolation {
    Missing { field: String },
    NotANumber { field: String },
    BelowMinimum { field: String, min: f64, actual: f64 },
    AboveMaximum { field: String, max: f64, actual: f64 },
}

impl FieldViolation {
    /// The offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::NotANumber { field } => write!(f, "{field} must be a number"),
            Self::BelowMinimum { field, min, actual } => {
                write!(f, "{field} is {actual}, below the minimum of {min}")
            }
            Self::AboveMaximum { field, max, actual } => {
                write!(f, "{field} is {actual}, above the maximum of {max}")
            }
        }
    }
}

/// Every violation found while validating a session, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Returns true if nothing was violated.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Names of the fields that failed, matching the order of `violations`.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.violations.iter().map(FieldViolation::field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
