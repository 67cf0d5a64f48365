//! Item catalogs.
//!
//! A catalog is a JSON array of items without derived fields; the seeding
//! flow enriches and stamps them. A built-in catalog ships with the binary,
//! and the same shape can be loaded from a user-supplied file.

use crate::models::Item;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// The built-in catalog, embedded at compile time.
const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Parses the built-in catalog.
///
/// # Errors
///
/// Returns an error if the embedded data is malformed; covered by tests, so
/// effectively unreachable in a release build.
pub fn builtin() -> Result<Vec<Item>> {
    parse(BUILTIN_CATALOG).map_err(|err| {
        Error::InvalidInput(format!("built-in catalog: {err}"))
    })
}

/// Loads a catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any item is malformed.
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_catalog_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    let items = parse(&contents)
        .map_err(|err| Error::InvalidInput(format!("{}: {err}", path.display())))?;
    debug!(path = %path.display(), items = items.len(), "loaded catalog file");
    Ok(items)
}

/// Parses a JSON catalog, reporting the index of the first bad item.
///
/// Items are deserialized from the raw text of each array element rather
/// than through `serde_json::Value`, whose map type would reorder lifespan
/// keys and corrupt the order-sensitive environment selection.
fn parse(contents: &str) -> std::result::Result<Vec<Item>, String> {
    let raw: Vec<&serde_json::value::RawValue> =
        serde_json::from_str(contents).map_err(|e| format!("not a JSON array: {e}"))?;

    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let item: Item = serde_json::from_str(value.get())
            .map_err(|e| format!("item at index {index}: {e}"))?;
        items.push(item);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationUnit;

    #[test]
    fn test_builtin_catalog_parses() {
        let items = builtin().unwrap();
        assert!(items.len() >= 10);
        for item in &items {
            assert!(!item.name.is_empty());
            assert!(!item.lifespan.is_empty(), "{} has no lifespan", item.name);
            assert!(!item.is_enriched());
        }
    }

    #[test]
    fn test_builtin_catalog_covers_every_unit() {
        let items = builtin().unwrap();
        for unit in [
            DurationUnit::Day,
            DurationUnit::Week,
            DurationUnit::Month,
            DurationUnit::Year,
        ] {
            assert!(
                items
                    .iter()
                    .flat_map(|item| item.lifespan.iter())
                    .any(|(_, shelf_life)| shelf_life.unit == unit),
                "no {unit} entry in the built-in catalog"
            );
        }
    }

    #[test]
    fn test_builtin_catalog_has_zero_day_items() {
        let items = builtin().unwrap();
        let salt = items.iter().find(|item| item.name == "Kosher Salt").unwrap();
        assert_eq!(salt.lifespan.get("pantry").unwrap().in_days(), 0);
    }

    #[test]
    fn test_builtin_catalog_keeps_extra_attributes() {
        let items = builtin().unwrap();
        let syrup = items.iter().find(|item| item.name == "Maple Syrup").unwrap();
        let attributes = syrup.attributes.as_ref().unwrap();
        assert_eq!(attributes.sealed, Some(true));
        assert_eq!(
            attributes.extra.get("genuine"),
            Some(&serde_json::Value::Bool(true))
        );
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();

        let items = from_file(&path).unwrap();
        assert_eq!(items, builtin().unwrap());
    }

    #[test]
    fn test_from_file_reports_bad_item_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Apples", "type": "Ingredient",
                 "amount": {"value": 5, "unit": "count"},
                 "lifespan": {"refrigerator": {"value": 1, "unit": "week"}}},
                {"name": "Mystery", "type": "Ingredient",
                 "amount": {"value": 1, "unit": "count"},
                 "lifespan": {"pantry": {"value": 3, "unit": "fortnight"}}}
            ]"#,
        )
        .unwrap();

        let err = from_file(&path).unwrap_err();
        assert!(format!("{err}").contains("index 1"));
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = from_file("/nonexistent/catalog.json");
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
