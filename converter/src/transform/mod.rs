//! Transformation module.
//!
//! - Normalize: per-field coercions and the row policies
//! - Grouper: insertion-ordered grouping and stable ordering
//! - Products / Pages: the two document kinds
//! - Pipeline: file-level conversion

pub mod grouper;
pub mod normalize;
pub mod pages;
pub mod pipeline;
pub mod products;

pub use grouper::{group_by, item_count, sort_stable_by_order, Groups};
pub use normalize::{EmptyListPolicy, OptionalFieldPolicy, SkippedRow, ValidationPolicy};
pub use pages::{normalize_page_item, transform_pages, PageReport};
pub use pipeline::*;
pub use products::{assemble_catalog, normalize_product, transform_products, ProductReport};
