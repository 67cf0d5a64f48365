//! Shelf-life types: duration units, per-environment entries, and the
//! ordered lifespan table.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unit of a shelf-life duration.
///
/// Source data spells units inconsistently ("week" and "weeks" both occur),
/// so parsing accepts the plural form of each unit. Anything else is
/// rejected outright rather than silently treated as days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    /// A single day.
    Day,
    /// Seven days.
    Week,
    /// Thirty days.
    Month,
    /// Three hundred sixty-five days.
    Year,
}

impl DurationUnit {
    /// Returns the canonical singular spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Returns the fixed day-count multiplier for this unit.
    #[must_use]
    pub const fn days_multiplier(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Day),
            "week" | "weeks" => Ok(Self::Week),
            "month" | "months" => Ok(Self::Month),
            "year" | "years" => Ok(Self::Year),
            other => Err(crate::Error::InvalidInput(format!(
                "unrecognized shelf-life unit '{other}'"
            ))),
        }
    }
}

impl Serialize for DurationUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DurationUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One storage environment's durability figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLife {
    /// Duration magnitude. Always integral in the source data.
    pub value: u32,
    /// Duration unit.
    pub unit: DurationUnit,
    /// Free-text annotation ("Store in a ziplock bag..."). Not used in
    /// any computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ShelfLife {
    /// Creates a shelf life without a comment.
    #[must_use]
    pub const fn new(value: u32, unit: DurationUnit) -> Self {
        Self {
            value,
            unit,
            comment: None,
        }
    }

    /// Normalizes this duration to a day count using the fixed multipliers.
    #[must_use]
    pub const fn in_days(&self) -> u32 {
        self.value * self.unit.days_multiplier()
    }
}

/// Mapping from storage environment name to its shelf life, in document
/// order.
///
/// The environment-selection fold is order-sensitive, so entries are kept
/// as an ordered sequence rather than a hash map. Deserializing from a
/// JSON object preserves the object's key order; duplicate keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifespanTable(Vec<(String, ShelfLife)>);

impl LifespanTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a table from entries, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns an error if two entries share an environment name.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ShelfLife)>,
    ) -> crate::Result<Self> {
        let mut table = Self::new();
        for (environment, shelf_life) in entries {
            table.insert(environment, shelf_life)?;
        }
        Ok(table)
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is already present.
    pub fn insert(&mut self, environment: String, shelf_life: ShelfLife) -> crate::Result<()> {
        if self.contains(&environment) {
            return Err(crate::Error::InvalidInput(format!(
                "duplicate storage environment '{environment}'"
            )));
        }
        self.0.push((environment, shelf_life));
        Ok(())
    }

    /// Looks up an environment's shelf life.
    #[must_use]
    pub fn get(&self, environment: &str) -> Option<&ShelfLife> {
        self.0
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, shelf_life)| shelf_life)
    }

    /// Returns whether the environment is present.
    #[must_use]
    pub fn contains(&self, environment: &str) -> bool {
        self.0.iter().any(|(name, _)| name == environment)
    }

    /// Returns the number of environments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table has no environments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShelfLife)> {
        self.0
            .iter()
            .map(|(name, shelf_life)| (name.as_str(), shelf_life))
    }

    /// Returns the environment names in document order.
    #[must_use]
    pub fn environments(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for LifespanTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (environment, shelf_life) in &self.0 {
            map.serialize_entry(environment, shelf_life)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LifespanTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = LifespanTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of storage environment to shelf life")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = LifespanTable::new();
                while let Some((environment, shelf_life)) =
                    access.next_entry::<String, ShelfLife>()?
                {
                    table
                        .insert(environment, shelf_life)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("day", 1)]
    #[test_case("days", 1)]
    #[test_case("week", 7)]
    #[test_case("weeks", 7)]
    #[test_case("month", 30)]
    #[test_case("months", 30)]
    #[test_case("year", 365)]
    #[test_case("years", 365)]
    fn test_unit_multipliers(spelling: &str, multiplier: u32) {
        let unit: DurationUnit = spelling.parse().unwrap();
        assert_eq!(unit.days_multiplier(), multiplier);
    }

    #[test]
    fn test_unit_rejects_unknown_spellings() {
        for bad in ["fortnight", "dayz", "", "d", "fluid ounce"] {
            assert!(bad.parse::<DurationUnit>().is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_shelf_life_in_days() {
        assert_eq!(ShelfLife::new(5, DurationUnit::Week).in_days(), 35);
        assert_eq!(ShelfLife::new(3, DurationUnit::Year).in_days(), 1095);
        assert_eq!(ShelfLife::new(0, DurationUnit::Month).in_days(), 0);
    }

    #[test]
    fn test_table_preserves_document_order() {
        let json = r#"{
            "pantry": {"value": 3, "unit": "day"},
            "refrigerator": {"value": 9, "unit": "day"},
            "freezer": {"value": 8, "unit": "month"}
        }"#;
        let table: LifespanTable = serde_json::from_str(json).unwrap();
        assert_eq!(
            table.environments(),
            vec!["pantry", "refrigerator", "freezer"]
        );
    }

    #[test]
    fn test_table_rejects_duplicate_environment() {
        let mut table = LifespanTable::new();
        table
            .insert("pantry".to_string(), ShelfLife::new(3, DurationUnit::Day))
            .unwrap();
        let result = table.insert("pantry".to_string(), ShelfLife::new(1, DurationUnit::Week));
        assert!(result.is_err());
    }

    #[test]
    fn test_table_deserialize_rejects_unknown_unit() {
        let json = r#"{"pantry": {"value": 3, "unit": "fortnight"}}"#;
        let result: Result<LifespanTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_serialize_round_trip_keeps_order() {
        let table = LifespanTable::from_entries([
            (
                "refrigerator".to_string(),
                ShelfLife::new(2, DurationUnit::Week),
            ),
            ("pantry".to_string(), ShelfLife::new(3, DurationUnit::Day)),
        ])
        .unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let back: LifespanTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.environments(), vec!["refrigerator", "pantry"]);
        assert_eq!(back, table);
    }

    #[test]
    fn test_comment_is_optional_and_preserved() {
        let json = r#"{
            "refrigerator": {
                "comment": "Store in a ziplock bag with paper towels",
                "value": 9,
                "unit": "day"
            }
        }"#;
        let table: LifespanTable = serde_json::from_str(json).unwrap();
        let entry = table.get("refrigerator").unwrap();
        assert_eq!(entry.value, 9);
        assert!(entry.comment.as_deref().unwrap().contains("ziplock"));
    }
}
