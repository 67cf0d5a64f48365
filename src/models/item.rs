//! Item types and identifiers.

use super::LifespanTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new document ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type tag for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A single food or ingredient.
    Ingredient,
    /// A prepared meal composed of ingredients.
    Recipe,
}

impl ItemKind {
    /// Returns the kind as the string used in stored documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingredient => "Ingredient",
            Self::Recipe => "Recipe",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantity on hand. Descriptive only; never consumed by the expiration
/// logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// Quantity magnitude (may be fractional, e.g. 0.5 pound).
    pub value: f64,
    /// Free-text quantity unit ("count", "pound", "fluid ounce", ...).
    /// Unrelated to shelf-life units.
    pub unit: String,
}

impl Amount {
    /// Creates an amount.
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Descriptive state flags attached to some items. Not consumed by the
/// expiration logic.
///
/// The common flags are typed; anything else in the source data's attribute
/// bag ("genuine", ...) survives round trips through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Whether the packaging is still sealed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealed: Option<bool>,
    /// Whether the item has been cooked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooked: Option<bool>,
    /// Whether the item can safely be refrozen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refreeze: Option<bool>,
    /// Whether the item wants low-humidity storage.
    #[serde(default, rename = "lowHumidity", skip_serializing_if = "Option::is_none")]
    pub low_humidity: Option<bool>,
    /// Any other descriptive flags.
    #[serde(flatten)]
    pub extra: std::collections::BTreeMap<String, serde_json::Value>,
}

/// A food item or meal.
///
/// Constructed fully in memory from catalog data, enriched once by the
/// expiration deriver (`store_in` / `expiration_date`), and handed off for
/// one-shot bulk insertion. Field names follow the stored document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name ("Apples", "Bacon").
    pub name: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Quantity on hand.
    pub amount: Amount,
    /// Descriptive state flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Free-text annotation ("Cold cut").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Per-environment shelf lives, in document order.
    pub lifespan: LifespanTable,
    /// Reference timestamp. Items are seeded in one shot, so this is both
    /// the created and updated time. Catalog files may omit it; the seeding
    /// flow stamps the batch reference time over whatever is here.
    #[serde(default = "unix_epoch")]
    pub updated: DateTime<Utc>,
    /// Chosen storage environment. `None` until enrichment.
    #[serde(
        default,
        rename = "storeIn",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_in: Option<String>,
    /// Absolute expiration timestamp. `None` until enrichment.
    #[serde(
        default,
        rename = "expirationDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

impl Item {
    /// Returns whether the item has been enriched with derived fields.
    #[must_use]
    pub const fn is_enriched(&self) -> bool {
        self.store_in.is_some() && self.expiration_date.is_some()
    }
}
