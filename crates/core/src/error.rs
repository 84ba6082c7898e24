//! Domain error model.

use thiserror::Error;

use crate::id::{ItemId, Tag};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Read-style catalog queries report absence through zero values instead of
/// errors; these variants cover parsing, strict lookups and audits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A monetary string could not be parsed.
    #[error("invalid money: {0}")]
    InvalidMoney(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No item is stored under the requested id.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No item carries the requested tag.
    #[error("tag not found: {0}")]
    TagNotFound(Tag),

    /// A catalog invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_money(msg: impl Into<String>) -> Self {
        Self::InvalidMoney(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn item_not_found(id: ItemId) -> Self {
        Self::ItemNotFound(id)
    }

    pub fn tag_not_found(tag: Tag) -> Self {
        Self::TagNotFound(tag)
    }
}
