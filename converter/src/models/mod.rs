//! Domain models for the conversion pipeline.
//!
//! - [`Record`] - one raw CSV row, with its source line
//! - [`Product`] / [`Prices`] - normalized catalog item
//! - [`Category`] / [`ProductCatalog`] - the products document
//! - [`PageItem`] / [`PagesDocument`] - the page-content document
//!
//! Field order in the structs is the field order in the written JSON.

use indexmap::IndexMap;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::transform::grouper::{item_count, Groups};

// =============================================================================
// Record
// =============================================================================

/// One source row: header name → raw cell text, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line in the source file
    pub line: usize,
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: IndexMap::new(),
        }
    }

    pub fn from_pairs<K, V>(line: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new(line);
        for (k, v) in pairs {
            record.insert(k, v);
        }
        record
    }

    /// Set a field, replacing an earlier value for the same column.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw value, `None` when the column does not exist.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Raw value, `""` when the column does not exist.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// True when the column exists and is not blank.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// =============================================================================
// Products
// =============================================================================

/// Integer prices of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    pub standard: i64,
    pub minimum: i64,
    pub maximum: i64,
}

/// A normalized catalog product.
///
/// Optional text fields are `None` only when the empty-field policy omits
/// them; with the default policy they hold `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Primary image first, then the non-blank secondary images
    pub gallery: Vec<String>,
    pub prices: Prices,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(rename = "madeTo", default, skip_serializing_if = "Option::is_none")]
    pub made_to: Option<String>,
}

/// A category bucket with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub products: Vec<Product>,
}

/// The products document: `{"categories": {<id>: Category}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub categories: IndexMap<String, Category>,
}

impl ProductCatalog {
    pub fn product_count(&self) -> usize {
        self.categories.values().map(|c| c.products.len()).sum()
    }
}

// =============================================================================
// Page content
// =============================================================================

/// A normalized block of static page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub order_position: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Content types of one page, each an ordered list of items.
pub type PageContent = Groups<PageItem>;

/// The page-content document: `{<page_id>: {<content_type>: [PageItem]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagesDocument(pub IndexMap<String, PageContent>);

impl PagesDocument {
    pub fn pages(&self) -> &IndexMap<String, PageContent> {
        &self.0
    }

    pub fn item_count(&self) -> usize {
        self.0.values().map(item_count).sum()
    }
}
