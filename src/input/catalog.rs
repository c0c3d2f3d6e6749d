//! Translation catalog input definitions.
//!
//! A catalog is one JSON file per `{page}/{language}` holding a nested
//! string tree. Catalogs are salsa inputs so repeated renders of the same
//! page reuse the flattened key table.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Salsa input representing one loaded translation catalog.
#[salsa::input(debug)]
pub struct Catalog {
    /// Page the catalog belongs to (its directory name, e.g. "Queues").
    #[returns(ref)]
    pub page: String,

    pub language: String,

    #[returns(ref)]
    pub file_path: String,

    /// Raw JSON text after BOM stripping and `"strings"` unwrapping.
    /// Kept so request-supplied base strings can be merged in later.
    #[returns(ref)]
    pub json_text: String,

    /// Flattened key map: every leaf under both its full dotted path and
    /// its final path segment (first write wins for the short form).
    #[returns(ref)]
    pub keys: HashMap<String, String>,
}

/// Strips a UTF-8 byte-order mark. Some catalogs in the wild start with one.
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Extracts the string tree from a parsed catalog document.
///
/// A catalog may either be a bare nested tree or wrap it in a top-level
/// `"strings"` member; both shapes occur in production data.
#[must_use]
pub fn string_tree(document: Value) -> Value {
    match document {
        Value::Object(mut map) => {
            map.remove("strings").unwrap_or(Value::Object(map))
        }
        other => other,
    }
}

/// Recursively merges `overlay` into `base`. Later values win on leaf
/// collisions; nested objects merge member-wise.
pub fn merge_trees(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_trees(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Flattens a nested string tree into a single-level map.
///
/// Every leaf is inserted under its full dotted path, and additionally under
/// its final path segment unless that short key is already taken. Arrays
/// flatten with `[index]` segments. Non-string leaves are stringified.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use admin_fragment_renderer::input::catalog::flatten_tree;
///
/// let tree = json!({
///     "roles": {
///         "title": "Roles Management"
///     }
/// });
///
/// let flat = flatten_tree(&tree, ".");
/// assert_eq!(flat.get("roles.title"), Some(&"Roles Management".to_string()));
/// assert_eq!(flat.get("title"), Some(&"Roles Management".to_string()));
/// ```
#[must_use]
pub fn flatten_tree(tree: &Value, separator: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_value(tree, separator, None, &mut result);
    result
}

fn flatten_value(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_value(child, separator, Some(&full_key), result);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_value(child, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                insert_leaf(key, s.clone(), separator, result);
            }
        }
        _ => {
            if let Some(key) = prefix {
                insert_leaf(key, value.to_string(), separator, result);
            }
        }
    }
}

fn insert_leaf(key: &str, value: String, separator: &str, result: &mut HashMap<String, String>) {
    let short = key.rsplit(separator).next().unwrap_or(key).to_string();
    if short != key && !result.contains_key(&short) {
        result.insert(short, value.clone());
    }
    // Full paths are unique within a tree, so this never loses a leaf.
    result.insert(key.to_string(), value);
}

/// Parses catalog text and returns its string tree.
///
/// # Errors
/// Returns the JSON parse error; callers treat that as an absent catalog.
pub fn parse_catalog_text(text: &str) -> Result<Value, serde_json::Error> {
    let document: Value = serde_json::from_str(strip_bom(text))?;
    Ok(string_tree(document))
}

/// Merges request-supplied base strings with a catalog's tree and flattens
/// the result. The catalog wins on leaf collisions.
#[must_use]
pub fn merge_and_flatten(
    base_strings: &Value,
    catalog_text: &str,
    separator: &str,
) -> HashMap<String, String> {
    let mut merged = if base_strings.is_object() {
        base_strings.clone()
    } else {
        Value::Object(serde_json::Map::new())
    };
    match parse_catalog_text(catalog_text) {
        Ok(tree) => merge_trees(&mut merged, tree),
        Err(e) => tracing::warn!("Ignoring malformed catalog text: {e}"),
    }
    flatten_tree(&merged, separator)
}

/// Loads a catalog file and creates a `Catalog` input.
///
/// # Errors
/// Returns an error if the file cannot be read or its JSON is malformed;
/// both are treated as an absent catalog by the indexer.
pub async fn load_catalog_file(
    db: &dyn crate::db::UiDatabase,
    page: &str,
    language: &str,
    file_path: &Path,
    separator: &str,
) -> Result<Catalog, CatalogError> {
    let content = tokio::fs::read_to_string(file_path).await?;
    let tree = parse_catalog_text(&content)?;
    let keys = flatten_tree(&tree, separator);

    Ok(Catalog::new(
        db,
        page.to_string(),
        language.to_string(),
        file_path.to_string_lossy().to_string(),
        tree.to_string(),
        keys,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_flatten_tree_simple() {
        let tree = json!({
            "hello": "Hello",
            "goodbye": "Goodbye"
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_tree_nested_adds_short_keys() {
        let tree = json!({
            "roles": {
                "title": "Roles Management",
                "btn_new": "Add New Role"
            }
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("roles.title"), some(eq(&"Roles Management".to_string())));
        expect_that!(result.get("title"), some(eq(&"Roles Management".to_string())));
        expect_that!(result.get("btn_new"), some(eq(&"Add New Role".to_string())));
    }

    #[googletest::test]
    fn test_flatten_tree_short_key_first_write_wins() {
        // BTreeMap iteration order: "alpha" before "beta".
        let tree = json!({
            "alpha": { "label": "First" },
            "beta": { "label": "Second" }
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("alpha.label"), some(eq(&"First".to_string())));
        expect_that!(result.get("beta.label"), some(eq(&"Second".to_string())));
        expect_that!(result.get("label"), some(eq(&"First".to_string())));
    }

    #[googletest::test]
    fn test_flatten_tree_full_path_wins_over_short_alias() {
        let tree = json!({
            "alpha": { "title": "Nested" },
            "title": "Top level"
        });

        let result = flatten_tree(&tree, ".");

        // The top-level leaf owns its exact key even when a nested leaf
        // aliased to it first.
        expect_that!(result.get("title"), some(eq(&"Top level".to_string())));
        expect_that!(result.get("alpha.title"), some(eq(&"Nested".to_string())));
    }

    #[googletest::test]
    fn test_flatten_tree_deep_nesting() {
        let tree = json!({
            "a": { "b": { "c": "Deep value" } }
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("a.b.c"), some(eq(&"Deep value".to_string())));
        expect_that!(result.get("c"), some(eq(&"Deep value".to_string())));
    }

    #[googletest::test]
    fn test_flatten_tree_non_string_values() {
        let tree = json!({
            "count": 42,
            "enabled": true
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("count"), some(eq(&"42".to_string())));
        expect_that!(result.get("enabled"), some(eq(&"true".to_string())));
    }

    #[googletest::test]
    fn test_flatten_tree_with_array() {
        let tree = json!({
            "menu": { "items": ["item1", "item2"] }
        });

        let result = flatten_tree(&tree, ".");

        expect_that!(result.get("menu.items[0]"), some(eq(&"item1".to_string())));
        expect_that!(result.get("menu.items[1]"), some(eq(&"item2".to_string())));
    }

    #[rstest]
    #[case("\u{feff}{\"a\": 1}", "{\"a\": 1}")]
    #[case("{\"a\": 1}", "{\"a\": 1}")]
    fn test_strip_bom(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_bom(input), expected);
    }

    #[googletest::test]
    fn test_string_tree_unwraps_strings_member() {
        let document = json!({ "strings": { "title": "Hello" } });

        let tree = string_tree(document);

        expect_that!(tree, eq(&json!({ "title": "Hello" })));
    }

    #[googletest::test]
    fn test_string_tree_keeps_bare_tree() {
        let document = json!({ "title": "Hello" });

        let tree = string_tree(document);

        expect_that!(tree, eq(&json!({ "title": "Hello" })));
    }

    #[googletest::test]
    fn test_merge_trees_catalog_wins_on_leaves() {
        let mut base = json!({
            "roles": { "title": "Old", "keep": "Kept" }
        });

        merge_trees(&mut base, json!({ "roles": { "title": "New" } }));

        expect_that!(base, eq(&json!({ "roles": { "title": "New", "keep": "Kept" } })));
    }

    #[googletest::test]
    fn test_merge_and_flatten_ignores_malformed_catalog() {
        let base = json!({ "title": "Fallback" });

        let result = merge_and_flatten(&base, "not json at all", ".");

        expect_that!(result.get("title"), some(eq(&"Fallback".to_string())));
    }

    #[googletest::test]
    fn test_merge_and_flatten_combines_both_sources() {
        let base = json!({ "common": { "loading": "Loading..." } });
        let catalog = r#"{ "strings": { "roles": { "title": "Roles" } } }"#;

        let result = merge_and_flatten(&base, catalog, ".");

        expect_that!(result.get("common.loading"), some(eq(&"Loading...".to_string())));
        expect_that!(result.get("roles.title"), some(eq(&"Roles".to_string())));
    }

    #[googletest::test]
    fn test_load_catalog_file_round_trip() {
        use crate::db::UiDatabaseImpl;

        let db = UiDatabaseImpl::default();
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        std::fs::write(&path, r#"{"strings": {"queues": {"title": "Queues"}}}"#).unwrap();

        let catalog = tokio_test::block_on(load_catalog_file(&db, "Queues", "en", &path, "."))
            .unwrap();

        assert_eq!(catalog.page(&db), &"Queues".to_string());
        assert_eq!(catalog.language(&db), "en".to_string());
        assert_eq!(catalog.keys(&db).get("queues.title"), Some(&"Queues".to_string()));
    }

    #[googletest::test]
    fn test_load_catalog_file_malformed_json() {
        use crate::db::UiDatabaseImpl;

        let db = UiDatabaseImpl::default();
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        std::fs::write(&path, "{ broken").unwrap();

        let result = tokio_test::block_on(load_catalog_file(&db, "Queues", "en", &path, "."));

        assert_that!(result, err(anything()));
    }
}
