//! Catalog domain module.
//!
//! An in-memory item catalog with two indexes kept in lockstep: items by id,
//! and per-tag price-ordered collections of the items carrying each tag.
//! Pure domain logic (no IO, no storage).

pub mod catalog;
pub mod item;
pub mod shared;

pub use catalog::{Catalog, InsertOutcome};
pub use item::{Item, ItemSnapshot};
pub use shared::SharedCatalog;

pub use pricetag_core::{DomainError, DomainResult, ItemId, Money, Tag};
