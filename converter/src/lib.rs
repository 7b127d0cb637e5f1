//! # atelier-data - spreadsheet exports to site JSON
//!
//! Converts the CSV exports of the product and page-content sheets into
//! the nested JSON documents the static site loads.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  JSON file  │
//! │ (UTF8/1252) │     │  (auto-enc) │     │  (grouped)  │     │  (atomic)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atelier_data::{convert_products, ProductOptions};
//! use std::path::Path;
//!
//! let summary = convert_products(
//!     Path::new("products-template.csv"),
//!     Path::new("products.json"),
//!     &ProductOptions::default(),
//! )?;
//! println!("Wrote {} products", summary.items_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`logs`] - Console progress log
//! - [`models`] - Records, items and documents
//! - [`parser`] - CSV reading with auto-detection
//! - [`transform`] - Normalization, grouping, pipeline
//! - [`metadata`] - Category display names
//! - [`output`] - Deterministic JSON rendering and atomic writes
//! - [`validation`] - Schema checks of written documents

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod metadata;
pub mod transform;

// Output
pub mod output;
pub mod validation;

pub use transform::pipeline;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, MetadataError, OutputError, PipelineError, RowError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Category, PageItem, PagesDocument, Prices, Product, ProductCatalog, Record};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_bytes_auto, parse_file_auto, parse_str, ParseResult};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use metadata::{title_case, CategoryInfo, CategoryTable};
pub use transform::{
    transform_pages, transform_products, EmptyListPolicy, OptionalFieldPolicy, Groups,
    PageReport, ProductReport, SkippedRow, ValidationPolicy,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_pages, convert_products, validate_file, ConversionSummary, PageOptions,
    ProductOptions, DEFAULT_PAGES_INPUT, DEFAULT_PAGES_OUTPUT,
};

// =============================================================================
// Re-exports - Output & Validation
// =============================================================================

pub use output::{render, write_document};
pub use validation::{validate_document, DocumentKind, GroupSummary};
