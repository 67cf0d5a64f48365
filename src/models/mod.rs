//! Data models for forage.
//!
//! This module contains the core data structures used throughout the system.

mod item;
mod lifespan;

pub use item::{Amount, Attributes, DocumentId, Item, ItemKind};
pub use lifespan::{DurationUnit, LifespanTable, ShelfLife};
