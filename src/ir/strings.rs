//! Flattened string table with fallback lookup.

use std::collections::HashMap;

/// Per-request view over a flattened translation map.
///
/// Lookup order mirrors the original templates: full dotted key, then the
/// key's final segment, then the caller-supplied default, then the final
/// segment itself. Empty values count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    map: HashMap<String, String>,
    separator: String,
}

impl StringTable {
    #[must_use]
    pub fn new(map: HashMap<String, String>, separator: impl Into<String>) -> Self {
        Self { map, separator: separator.into() }
    }

    #[must_use]
    pub fn empty(separator: impl Into<String>) -> Self {
        Self { map: HashMap::new(), separator: separator.into() }
    }

    fn short_segment<'a>(&self, key: &'a str) -> &'a str {
        key.rsplit(self.separator.as_str()).next().unwrap_or(key)
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Resolves a key, returning `default` (or the key's final segment when
    /// `default` is empty) if neither the full nor the short key matches.
    #[must_use]
    pub fn lookup(&self, key: &str, default: &str) -> String {
        if let Some(value) = self.non_empty(key) {
            return value.to_string();
        }
        let short = self.short_segment(key);
        if let Some(value) = self.non_empty(short) {
            return value.to_string();
        }
        if default.is_empty() { short.to_string() } else { default.to_string() }
    }

    /// Underlying flattened map, e.g. for the client bootstrap blob.
    #[must_use]
    pub const fn flat(&self) -> &HashMap<String, String> {
        &self.map
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn table(entries: &[(&str, &str)]) -> StringTable {
        let map: HashMap<String, String> =
            entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        StringTable::new(map, ".")
    }

    #[googletest::test]
    fn lookup_prefers_full_key() {
        let table = table(&[("roles.title", "Full"), ("title", "Short")]);

        expect_that!(table.lookup("roles.title", "Default"), eq("Full"));
    }

    #[googletest::test]
    fn lookup_falls_back_to_short_key() {
        let table = table(&[("title", "Short")]);

        expect_that!(table.lookup("roles.title", "Default"), eq("Short"));
    }

    #[googletest::test]
    fn lookup_falls_back_to_default() {
        let table = table(&[]);

        expect_that!(table.lookup("roles.title", "Roles Management"), eq("Roles Management"));
    }

    #[googletest::test]
    fn lookup_without_default_returns_final_segment() {
        let table = table(&[]);

        expect_that!(table.lookup("roles.btn_new", ""), eq("btn_new"));
    }

    #[rstest]
    #[case("roles.title")]
    #[case("title")]
    fn lookup_treats_empty_value_as_missing(#[case] key: &str) {
        let table = table(&[(key, "")]);

        assert_that!(table.lookup("roles.title", "Default"), eq("Default"));
    }

    #[googletest::test]
    fn every_flattened_leaf_resolves_to_its_value() {
        let tree = serde_json::json!({
            "roles": {
                "title": "Roles Management",
                "form": { "btn_save": "Save" }
            }
        });
        let flat = crate::input::catalog::flatten_tree(&tree, ".");
        let table = StringTable::new(flat, ".");

        expect_that!(table.lookup("roles.title", ""), eq("Roles Management"));
        expect_that!(table.lookup("roles.form.btn_save", ""), eq("Save"));
    }
}
