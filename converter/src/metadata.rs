//! Display metadata for product categories.
//!
//! Known categories get their name and description from a [`CategoryTable`];
//! anything else falls back to a title-cased id and an empty description.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MetadataError;

/// Name and description shown for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Lookup table from category id to display metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(IndexMap<String, CategoryInfo>);

static BUILTIN: Lazy<CategoryTable> = Lazy::new(|| {
    let mut table = CategoryTable::default();
    table.insert(
        "prive_ceremonial",
        CategoryInfo::new(
            "Couture e Cerimonia",
            "Exquisite pieces for special occasions and refined experiences",
        ),
    );
    table.insert(
        "collections",
        CategoryInfo::new(
            "Collezioni",
            "Curated seasonal collections showcasing contemporary Italian elegance",
        ),
    );
    table.insert(
        "kids",
        CategoryInfo::new("Kids", "Ricami e texture che raccontano un'eleganza autentica"),
    );
    table
});

static WORD_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\-\s]+").expect("valid separator pattern"));

impl CategoryTable {
    /// The categories of the live site.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load a table from a JSON object `{"<id>": {"name": ..., "description": ...}}`.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, id: impl Into<String>, info: CategoryInfo) {
        self.0.insert(id.into(), info);
    }

    pub fn get(&self, id: &str) -> Option<&CategoryInfo> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Metadata for `id`, with the title-case fallback for unknown ids.
    pub fn resolve(&self, id: &str) -> CategoryInfo {
        self.get(id)
            .cloned()
            .unwrap_or_else(|| CategoryInfo::new(title_case(id), ""))
    }
}

/// `prive_ceremonial` → `Prive Ceremonial`.
///
/// Underscores, hyphens and whitespace separate words; each word gets an
/// uppercase first letter and lowercase rest.
pub fn title_case(id: &str) -> String {
    WORD_SEPARATORS
        .split(id.trim())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories() {
        let table = CategoryTable::builtin();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("kids").name, "Kids");
        assert_eq!(table.resolve("prive_ceremonial").name, "Couture e Cerimonia");
        assert!(!table.resolve("collections").description.is_empty());
    }

    #[test]
    fn test_unknown_category_fallback() {
        let table = CategoryTable::default();
        let info = table.resolve("prive_ceremonial");
        assert_eq!(info.name, "Prive Ceremonial");
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("kids"), "Kids");
        assert_eq!(title_case("new-ARRIVALS"), "New Arrivals");
        assert_eq!(title_case("  summer  sale "), "Summer Sale");
        assert_eq!(title_case("àbiti_da_sposa"), "Àbiti Da Sposa");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_custom_table_from_json() {
        let table = CategoryTable::from_json(
            r#"{"bridal": {"name": "Sposa", "description": "Abiti da sposa"}, "men": {"name": "Uomo"}}"#,
        )
        .unwrap();

        assert_eq!(table.resolve("bridal").description, "Abiti da sposa");
        assert_eq!(table.resolve("men").description, "");
        assert_eq!(table.resolve("kids").name, "Kids");
    }

    #[test]
    fn test_invalid_table_json() {
        let err = CategoryTable::from_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("Invalid category table"));
    }
}
