//! Product catalog: rows → products grouped by category.
//!
//! ```text
//! id,name,category,...,prices_standard,colors        {"categories": {
//! 1,Dress,kids,...,100,"red, blue"          →          "kids": {"name": "Kids", "description": ...,
//!                                                               "products": [{...}]}}}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::grouper::{group_by, Groups};
use super::normalize::{
    build_gallery, optional_text, parse_int, require, settle, split_list, EmptyListPolicy,
    OptionalFieldPolicy, SkippedRow, ValidationPolicy,
};
use crate::error::RowResult;
use crate::metadata::CategoryTable;
use crate::models::{Category, Prices, Product, ProductCatalog, Record};

/// Columns of the products sheet, in export order.
pub const PRODUCT_COLUMNS: [&str; 15] = [
    "id",
    "name",
    "category",
    "description",
    "image",
    "image_2",
    "image_3",
    "video_url",
    "prices_standard",
    "prices_minimum",
    "prices_maximum",
    "colors",
    "sizes",
    "fabric",
    "madeTo",
];

const REQUIRED: [&str; 3] = ["id", "name", "image"];

const SECONDARY_IMAGES: [&str; 2] = ["image_2", "image_3"];

/// Options for the products conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOptions {
    #[serde(default)]
    pub validation: ValidationPolicy,
    #[serde(default)]
    pub empty_fields: OptionalFieldPolicy,
    #[serde(default)]
    pub empty_lists: EmptyListPolicy,
    /// Category display metadata
    #[serde(default = "CategoryTable::builtin")]
    pub categories: CategoryTable,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Lenient,
            empty_fields: OptionalFieldPolicy::Keep,
            empty_lists: EmptyListPolicy::Empty,
            categories: CategoryTable::builtin(),
        }
    }
}

/// Outcome of a products transform.
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub catalog: ProductCatalog,
    /// Rows left out under the lenient policy
    pub skipped: Vec<SkippedRow>,
    pub rows_read: usize,
}

/// Normalize one products row.
pub fn normalize_product(record: &Record, options: &ProductOptions) -> RowResult<Product> {
    require(record, &REQUIRED)?;

    let id = record.text("id");
    let prices = Prices {
        standard: parse_int(record, "prices_standard", id)?,
        minimum: parse_int(record, "prices_minimum", id)?,
        maximum: parse_int(record, "prices_maximum", id)?,
    };
    let text = |field: &str| optional_text(record.get(field), options.empty_fields);

    Ok(Product {
        id: id.to_string(),
        name: record.text("name").to_string(),
        category: record.text("category").to_string(),
        description: text("description"),
        image: record.text("image").to_string(),
        image_2: text("image_2"),
        image_3: text("image_3"),
        video_url: text("video_url"),
        gallery: build_gallery(record, "image", &SECONDARY_IMAGES),
        prices,
        colors: split_list(record.text("colors"), options.empty_lists),
        sizes: split_list(record.text("sizes"), options.empty_lists),
        fabric: text("fabric"),
        made_to: text("madeTo"),
    })
}

/// Transform product rows into the catalog document.
///
/// Fails only under [`ValidationPolicy::Strict`], on the first bad row.
pub fn transform_products(records: &[Record], options: &ProductOptions) -> RowResult<ProductReport> {
    let mut skipped = Vec::new();
    let mut products = Vec::with_capacity(records.len());

    for record in records {
        let result = normalize_product(record, options);
        if let Some(product) = settle(result, options.validation, record, "id", &mut skipped)? {
            products.push(product);
        }
    }

    let groups = group_by(products, |p| p.category.clone());

    Ok(ProductReport {
        catalog: assemble_catalog(groups, &options.categories),
        skipped,
        rows_read: records.len(),
    })
}

/// Attach category metadata to grouped products.
pub fn assemble_catalog(groups: Groups<Product>, table: &CategoryTable) -> ProductCatalog {
    let categories: IndexMap<String, Category> = groups
        .into_iter()
        .map(|(id, products)| {
            let info = table.resolve(&id);
            let category = Category {
                name: info.name,
                description: info.description,
                products,
            };
            (id, category)
        })
        .collect();
    ProductCatalog { categories }
}
