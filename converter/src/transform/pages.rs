//! Static page content: rows → page → content type → ordered items.
//!
//! ```text
//! page_id,content_type,...,order_position       {"about": {
//! about,hero,...,1                        →        "hero":    [{...}],
//! about,gallery,...,2                              "gallery": [{...}, {...}]}}
//! about,gallery,...,1
//! ```
//!
//! Items inside a content type are sorted by `order_position` (stable).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::grouper::sort_stable_by_order;
use super::normalize::{
    optional_text, parse_flag, parse_order, require, settle, OptionalFieldPolicy, SkippedRow,
    ValidationPolicy,
};
use crate::error::RowResult;
use crate::models::{PageContent, PageItem, PagesDocument, Record};

/// Columns of the pages sheet, in export order.
pub const PAGE_COLUMNS: [&str; 10] = [
    "page_id",
    "content_type",
    "section_id",
    "title",
    "subtitle",
    "description",
    "image_url",
    "image_alt",
    "order_position",
    "is_active",
];

const REQUIRED: [&str; 2] = ["page_id", "content_type"];

/// Default source file of the pages conversion.
pub const DEFAULT_PAGES_INPUT: &str = "pages-content-template.csv";

/// Default output file of the pages conversion.
pub const DEFAULT_PAGES_OUTPUT: &str = "pages-content.json";

/// Options for the page-content conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOptions {
    #[serde(default)]
    pub validation: ValidationPolicy,
    #[serde(default = "default_page_fields")]
    pub empty_fields: OptionalFieldPolicy,
}

fn default_page_fields() -> OptionalFieldPolicy {
    OptionalFieldPolicy::Omit
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Lenient,
            empty_fields: default_page_fields(),
        }
    }
}

/// Outcome of a pages transform.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub document: PagesDocument,
    pub skipped: Vec<SkippedRow>,
    pub rows_read: usize,
}

/// Normalize one pages row.
pub fn normalize_page_item(record: &Record, options: &PageOptions) -> RowResult<PageItem> {
    require(record, &REQUIRED)?;

    let text = |field: &str| optional_text(record.get(field), options.empty_fields);

    Ok(PageItem {
        section_id: text("section_id"),
        content_type: record.text("content_type").to_string(),
        title: text("title"),
        subtitle: text("subtitle"),
        description: text("description"),
        image_url: text("image_url"),
        image_alt: text("image_alt"),
        order_position: parse_order(record.get("order_position")),
        is_active: parse_flag(record.get("is_active")),
    })
}

/// Transform page rows into the page-content document.
///
/// Fails only under [`ValidationPolicy::Strict`], on the first bad row.
pub fn transform_pages(records: &[Record], options: &PageOptions) -> RowResult<PageReport> {
    let mut skipped = Vec::new();
    let mut pages: IndexMap<String, PageContent> = IndexMap::new();

    for record in records {
        let result = normalize_page_item(record, options);
        if let Some(item) = settle(result, options.validation, record, "section_id", &mut skipped)? {
            pages
                .entry(record.text("page_id").to_string())
                .or_default()
                .entry(item.content_type.clone())
                .or_default()
                .push(item);
        }
    }

    for page in pages.values_mut() {
        for items in page.values_mut() {
            sort_stable_by_order(items, |item| item.order_position);
        }
    }

    Ok(PageReport {
        document: PagesDocument(pages),
        skipped,
        rows_read: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;
    use crate::parser::parse_str;
    use serde_json::json;

    const HEADER: &str =
        "page_id,content_type,section_id,title,subtitle,description,image_url,image_alt,order_position,is_active";

    fn rows(body: &str) -> Vec<Record> {
        parse_str(&format!("{}\n{}", HEADER, body), ',').unwrap().1
    }

    #[test]
    fn test_two_level_grouping() {
        let records = rows(
            "about,hero,h1,Chi siamo,,,hero.jpg,Atelier,1,TRUE\n\
             home,hero,h2,Benvenuti,,,,,1,true\n\
             about,gallery,g1,,,,g1.jpg,,1,true",
        );
        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        let pages = report.document.pages();

        assert_eq!(pages.keys().map(String::as_str).collect::<Vec<_>>(), vec!["about", "home"]);
        let about = &pages["about"];
        assert_eq!(about.keys().map(String::as_str).collect::<Vec<_>>(), vec!["hero", "gallery"]);
        assert_eq!(report.document.item_count(), 3);
    }

    #[test]
    fn test_sorted_by_order_position_stable() {
        let records = rows(
            "about,gallery,c,,,,,,3,true\n\
             about,gallery,a,,,,,,1,true\n\
             about,gallery,x,,,,,,,true\n\
             about,gallery,b,,,,,,1,true\n\
             about,gallery,y,,,,,,n/a,true",
        );
        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        let gallery = report.document.pages().get("about").unwrap().get("gallery").unwrap();

        let sections: Vec<&str> = gallery.iter().map(|i| i.section_id.as_deref().unwrap()).collect();
        assert_eq!(sections, vec!["x", "y", "a", "b", "c"]);
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let records = parse_str("page_id,content_type,title\nabout,hero,Ciao", ',').unwrap().1;
        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        let hero = &report.document.pages().get("about").unwrap().get("hero").unwrap()[0];

        assert!(hero.is_active);
    }

    #[test]
    fn test_is_active_values() {
        let records = rows(
            "p,t,a,,,,,,1,false\n\
             p,t,b,,,,,,2,\n\
             p,t,c,,,,,,3,FALSE\n\
             p,t,d,,,,,,4,True\n\
             p,t,e,,,,,,5,no\n\
             p,t,f,,,,,,6,0\n\
             p,t,g,,,,,,7,inactive",
        );
        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        let items = &report.document.pages()["p"]["t"];

        let flags: Vec<bool> = items.iter().map(|i| i.is_active).collect();
        assert_eq!(flags, vec![false, true, false, true, false, false, false]);
    }

    #[test]
    fn test_empty_fields_omitted_by_default() {
        let records = rows("about,hero,h1,Chi siamo,,,,,0,true");
        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        let value = serde_json::to_value(&report.document).unwrap();

        assert_eq!(
            value,
            json!({"about": {"hero": [{
                "section_id": "h1",
                "content_type": "hero",
                "title": "Chi siamo",
                "order_position": 0,
                "is_active": true
            }]}})
        );
    }

    #[test]
    fn test_keep_policy_writes_empty_strings() {
        let records = rows("about,hero,h1,,,,,,2,true");
        let options = PageOptions {
            empty_fields: OptionalFieldPolicy::Keep,
            ..PageOptions::default()
        };
        let report = transform_pages(&records, &options).unwrap();
        let value = serde_json::to_value(&report.document).unwrap();
        let hero = &value["about"]["hero"][0];

        assert_eq!(hero["subtitle"], "");
        assert_eq!(hero["image_alt"], "");
        assert_eq!(hero["order_position"], 2);
    }

    #[test]
    fn test_missing_page_id_policies() {
        let records = rows(",hero,h1,,,,,,1,true\nabout,hero,h2,,,,,,1,true");

        let report = transform_pages(&records, &PageOptions::default()).unwrap();
        assert_eq!(report.document.item_count(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, "h1");

        let strict = PageOptions {
            validation: ValidationPolicy::Strict,
            ..PageOptions::default()
        };
        let err = transform_pages(&records, &strict).unwrap_err();
        assert_eq!(
            err,
            RowError::MissingField {
                line: 2,
                field: "page_id".into()
            }
        );
    }

    #[test]
    fn test_no_rows_gives_empty_document() {
        let report = transform_pages(&rows(""), &PageOptions::default()).unwrap();
        assert_eq!(serde_json::to_string(&report.document).unwrap(), "{}");
    }
}
