//! JSON Schema validation of generated documents.
//!
//! Both document kinds have a draft 7 schema embedded at compile time from
//! the `schemas/` directory:
//!
//! - `products.schema.json` - `{"categories": {<id>: {name, description, products}}}`
//! - `pages.schema.json` - `{<page_id>: {<content_type>: [item]}}`
//!
//! Besides the schema check, [`summarize`] produces the per-group counts
//! printed after a conversion.
//!
//! ```rust,ignore
//! use atelier_data::validation::{validate_document, DocumentKind};
//!
//! let doc: serde_json::Value = serde_json::from_str(&text)?;
//! if let Err(errors) = validate_document(DocumentKind::Pages, &doc) {
//!     for e in errors { eprintln!("{}", e); }
//! }
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

static PRODUCTS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/products.schema.json"))
        .expect("Invalid embedded products schema")
});

static PAGES_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/pages.schema.json"))
        .expect("Invalid embedded pages schema")
});

/// Which document a JSON file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKind {
    Products,
    Pages,
}

impl DocumentKind {
    pub fn schema(&self) -> &'static Value {
        match self {
            DocumentKind::Products => &PRODUCTS_SCHEMA,
            DocumentKind::Pages => &PAGES_SCHEMA,
        }
    }
}

/// Validate data against a schema.
///
/// Returns every violation message, or `Ok(())`.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a document against the schema of its kind.
pub fn validate_document(kind: DocumentKind, data: &Value) -> Result<(), Vec<String>> {
    validate(kind.schema(), data)
}

/// Item counts of one top-level group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    /// Content types on the page (pages only)
    pub sections: Option<usize>,
    pub items: usize,
}

/// Per-group counts, sorted by group key.
///
/// Works on the parsed JSON so it can report on files written earlier.
pub fn summarize(kind: DocumentKind, data: &Value) -> Vec<GroupSummary> {
    let array_len = |v: &Value| v.as_array().map_or(0, Vec::len);

    match kind {
        DocumentKind::Products => data
            .get("categories")
            .and_then(Value::as_object)
            .map(|categories| {
                categories
                    .iter()
                    .map(|(key, category)| GroupSummary {
                        key: key.clone(),
                        sections: None,
                        items: category.get("products").map_or(0, array_len),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        DocumentKind::Pages => data
            .as_object()
            .map(|pages| {
                pages
                    .iter()
                    .map(|(key, content)| {
                        let types = content.as_object();
                        GroupSummary {
                            key: key.clone(),
                            sections: Some(types.map_or(0, |t| t.len())),
                            items: types.map_or(0, |t| t.values().map(array_len).sum()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}
