//! File-level conversion: read CSV → transform → write JSON.
//!
//! ```rust,ignore
//! use atelier_data::pipeline::{convert_products, ProductOptions};
//! use std::path::Path;
//!
//! let summary = convert_products(
//!     Path::new("products-template.csv"),
//!     Path::new("products.json"),
//!     &ProductOptions::default(),
//! )?;
//! println!("{} products", summary.items_written);
//! ```
//!
//! Failure semantics: a missing input is reported as
//! [`PipelineError::InputNotFound`]; any error before the final rename
//! leaves the output path untouched.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::grouper::item_count;
use super::normalize::SkippedRow;
use super::pages::{transform_pages, PAGE_COLUMNS};
use super::products::{transform_products, PRODUCT_COLUMNS};
use crate::error::{CsvError, PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{PagesDocument, ProductCatalog};
use crate::output::write_document;
use crate::parser::{parse_file_auto, ParseResult};
use crate::validation::{summarize, validate_document, DocumentKind, GroupSummary};

pub use super::pages::{PageOptions, DEFAULT_PAGES_INPUT, DEFAULT_PAGES_OUTPUT};
pub use super::products::ProductOptions;

/// What a conversion did.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: String,
    pub delimiter: char,
    pub rows_read: usize,
    pub items_written: usize,
    /// Per-group counts, in document order
    pub groups: Vec<GroupSummary>,
    pub skipped: Vec<SkippedRow>,
    pub bytes_written: usize,
}

/// Convert the products CSV at `input` into the catalog JSON at `output`.
pub fn convert_products(
    input: &Path,
    output: &Path,
    options: &ProductOptions,
) -> PipelineResult<ConversionSummary> {
    check_paths(input, output)?;
    let parsed = read_input(input)?;
    report_missing_columns(&parsed.headers, &PRODUCT_COLUMNS);

    log_info("⚙️  Normalizing products...");
    let report = transform_products(&parsed.records, options)?;
    report_skipped(&report.skipped);

    let bytes_written = write_document(&report.catalog, output)?;
    let groups = catalog_summary(&report.catalog);

    log_success(format!("Converted {} to {}", input.display(), output.display()));
    log_info(format!("📊 Total products: {}", report.catalog.product_count()));
    log_info(format!(
        "📁 Categories: {}",
        report
            .catalog
            .categories
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    ));

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        rows_read: report.rows_read,
        items_written: report.catalog.product_count(),
        groups,
        skipped: report.skipped,
        bytes_written,
    })
}

/// Convert the page-content CSV at `input` into the JSON at `output`,
/// then read the written file back and validate it.
pub fn convert_pages(
    input: &Path,
    output: &Path,
    options: &PageOptions,
) -> PipelineResult<ConversionSummary> {
    check_paths(input, output)?;
    let parsed = read_input(input)?;
    report_missing_columns(&parsed.headers, &PAGE_COLUMNS);

    log_info("⚙️  Grouping page content...");
    let report = transform_pages(&parsed.records, options)?;
    report_skipped(&report.skipped);

    let bytes_written = write_document(&report.document, output)?;
    let groups = pages_summary(&report.document);

    log_success(format!("Converted {} to {}", input.display(), output.display()));
    log_info(format!("📊 Generated content for {} pages", groups.len()));
    for group in &groups {
        log_info_indent(format!("📄 {}: {} content items", group.key, group.items), 1);
    }

    validate_file(output, DocumentKind::Pages)?;

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        rows_read: report.rows_read,
        items_written: report.document.item_count(),
        groups,
        skipped: report.skipped,
        bytes_written,
    })
}

/// Check a written document against its schema and report its groups.
pub fn validate_file(path: &Path, kind: DocumentKind) -> PipelineResult<Vec<GroupSummary>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PipelineError::InputNotFound(path.to_path_buf()),
        _ => PipelineError::Io(e),
    })?;
    let data: Value = serde_json::from_str(&content)?;

    log_info("🔍 Content validation:");
    validate_document(kind, &data).map_err(|errors| PipelineError::Validation { errors })?;
    log_success("Valid JSON structure");

    let groups = summarize(kind, &data);
    log_info(format!("📄 Total groups: {}", groups.len()));
    for group in &groups {
        match group.sections {
            Some(sections) => log_info_indent(
                format!("{}: {} content types, {} items", group.key, sections, group.items),
                1,
            ),
            None => log_info_indent(format!("{}: {} items", group.key, group.items), 1),
        }
    }

    Ok(groups)
}

/// Parse the input CSV, mapping a missing file to `InputNotFound`.
pub fn read_input(input: &Path) -> PipelineResult<ParseResult> {
    log_info(format!("📖 Reading {}", input.display()));

    let parsed = parse_file_auto(input).map_err(|e| match e {
        CsvError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
            PipelineError::InputNotFound(input.to_path_buf())
        }
        other => PipelineError::Csv(other),
    })?;

    log_info_indent(format!("Encoding: {}", parsed.encoding), 1);
    log_info_indent(format!("Delimiter: '{}'", format_delimiter(parsed.delimiter)), 1);
    log_info_indent(format!("Columns: {}", parsed.headers.join(", ")), 1);
    log_success(format!("Read {} rows", parsed.records.len()));
    if parsed.records.is_empty() {
        log_warning("No data rows; the document will be empty");
    }

    Ok(parsed)
}

fn check_paths(input: &Path, output: &Path) -> PipelineResult<()> {
    if input == output {
        return Err(PipelineError::Usage(format!(
            "input and output are the same file ({})",
            input.display()
        )));
    }
    Ok(())
}

/// Expected columns that the header row lacks, in expected order.
pub fn missing_columns<'a>(headers: &[String], expected: &[&'a str]) -> Vec<&'a str> {
    if headers.is_empty() {
        return Vec::new();
    }
    expected
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == column))
        .collect()
}

fn report_missing_columns(headers: &[String], expected: &[&str]) {
    let missing = missing_columns(headers, expected);
    if !missing.is_empty() {
        log_warning(format!("Missing columns (read as empty): {}", missing.join(", ")));
    }
}

fn report_skipped(skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    log_warning(format!("{} rows skipped", skipped.len()));
    for skip in skipped {
        log_info_indent(format!("⚠️ Skipping row {} ({}): {}", skip.line, skip.id, skip.reason), 1);
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn catalog_summary(catalog: &ProductCatalog) -> Vec<GroupSummary> {
    catalog
        .categories
        .iter()
        .map(|(key, category)| GroupSummary {
            key: key.to_string(),
            sections: None,
            items: category.products.len(),
        })
        .collect()
}

fn pages_summary(document: &PagesDocument) -> Vec<GroupSummary> {
    document
        .pages()
        .iter()
        .map(|(key, content)| GroupSummary {
            key: key.to_string(),
            sections: Some(content.len()),
            items: item_count(content),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::normalize::ValidationPolicy;
    use std::fs;

    const PRODUCTS_CSV: &str = "\
id,name,category,description,image,image_2,image_3,video_url,prices_standard,prices_minimum,prices_maximum,colors,sizes,fabric,madeTo
1,Dress,kids,Ricamato a mano,a.jpg,,b.jpg,,100,80,150,\"red, blue\",\"S, M\",cotone,misura
2,Abito da sera,prive_ceremonial,,e.jpg,e2.jpg,,,1200,,,nero,42,seta,
3,Broken,kids,,x.jpg,,,,cento,,,,,,
";

    const PAGES_CSV: &str = "\
page_id,content_type,section_id,title,subtitle,description,image_url,image_alt,order_position,is_active
about,hero,hero-1,Chi siamo,,,about.jpg,Atelier,1,true
about,values,v-2,Qualità,,,,,2,
about,values,v-1,Artigianato,,,,,1,TRUE
home,hero,home-hero,Benvenuti,,,,,,false
";

    #[test]
    fn test_convert_products_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.csv");
        let output = dir.path().join("products.json");
        fs::write(&input, PRODUCTS_CSV).unwrap();

        let summary = convert_products(&input, &output, &ProductOptions::default()).unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.items_written, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].id, "3");
        assert_eq!(summary.groups[0].key, "kids");
        assert_eq!(summary.groups[1].key, "prive_ceremonial");

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["categories"]["kids"]["name"], "Kids");
        assert_eq!(written["categories"]["prive_ceremonial"]["name"], "Couture e Cerimonia");
        assert_eq!(written["categories"]["prive_ceremonial"]["products"][0]["prices"]["minimum"], 0);
        assert!(validate_file(&output, DocumentKind::Products).is_ok());
    }

    #[test]
    fn test_strict_products_leave_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.csv");
        let output = dir.path().join("products.json");
        fs::write(&input, PRODUCTS_CSV).unwrap();

        let options = ProductOptions {
            validation: ValidationPolicy::Strict,
            ..ProductOptions::default()
        };
        let err = convert_products(&input, &output, &options).unwrap_err();

        assert!(matches!(err, PipelineError::Row(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.csv");
        let output = dir.path().join("out.json");

        let err = convert_products(&input, &output, &ProductOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(ref p) if p == &input));
        assert!(!output.exists());
    }

    #[test]
    fn test_header_only_input_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.csv");
        let output = dir.path().join("products.json");
        fs::write(&input, PRODUCTS_CSV.lines().next().unwrap()).unwrap();

        let summary = convert_products(&input, &output, &ProductOptions::default()).unwrap();

        assert_eq!(summary.items_written, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "{\n  \"categories\": {}\n}\n");
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let path = Path::new("products.csv");
        let err = convert_products(path, path, &ProductOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Usage(_)));
    }

    #[test]
    fn test_convert_pages_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(DEFAULT_PAGES_INPUT);
        let output = dir.path().join(DEFAULT_PAGES_OUTPUT);
        fs::write(&input, PAGES_CSV).unwrap();

        let summary = convert_pages(&input, &output, &PageOptions::default()).unwrap();

        assert_eq!(summary.items_written, 4);
        assert_eq!(summary.groups[0].key, "about");
        assert_eq!(summary.groups[0].sections, Some(2));
        assert_eq!(summary.groups[0].items, 3);

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["about"]["values"][0]["section_id"], "v-1");
        assert_eq!(written["about"]["values"][1]["title"], "Qualità");
        assert_eq!(written["about"]["values"][1]["is_active"], true);
        assert_eq!(written["home"]["hero"][0]["is_active"], false);
        assert!(written["home"]["hero"][0].get("subtitle").is_none());
    }

    #[test]
    fn test_validate_file_rejects_bad_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        fs::write(&path, r#"{"about": {"hero": [{"title": "no type"}]}}"#).unwrap();

        let err = validate_file(&path, DocumentKind::Pages).unwrap_err();
        assert!(matches!(err, PipelineError::Validation { .. }));
    }

    #[test]
    fn test_validate_file_rejects_non_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            validate_file(&path, DocumentKind::Pages).unwrap_err(),
            PipelineError::Json(_)
        ));
    }

    #[test]
    fn test_missing_columns() {
        let headers: Vec<String> = ["id", "name", "image", "colors"].iter().map(|h| h.to_string()).collect();
        let missing = missing_columns(&headers, &PRODUCT_COLUMNS);

        assert_eq!(missing.len(), 11);
        assert_eq!(missing[0], "category");
        assert!(!missing.contains(&"colors"));
        assert!(missing_columns(&[], &PAGE_COLUMNS).is_empty());
    }
}
