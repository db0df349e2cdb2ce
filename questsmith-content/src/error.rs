//! Error types for the content crate.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("form error: {0}")]
    Form(#[from] questsmith_form::FormError),

    #[error("no item type selected")]
    MissingItemType,

    #[error("unknown item kind: {0}")]
    UnknownItemKind(i64),

    #[error("page {index} does not exist (book has {len} pages)")]
    PageOutOfRange { index: usize, len: usize },

    #[error("effect {index} does not exist ({len} effects)")]
    EffectOutOfRange { index: usize, len: usize },

    #[error("container cannot be opened, so it cannot be left open")]
    ContainerCannotOpen,

    #[error("container cannot be locked, so it cannot be left locked")]
    ContainerCannotLock,

    #[error("invalid choice for {field}: {value}")]
    InvalidChoice { field: String, value: String },

    #[error("invalid effect: {0}")]
    InvalidEffect(String),
}
