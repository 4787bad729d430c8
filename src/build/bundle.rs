use crate::document::Document;
use crate::extract::{ColumnGroup, Fallback, Role, TableExtractor, TableSignature};
use crate::source::{first_available, PageSource};
use crate::types::{Bundle, BundleItem};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Heading text that marks a bundle section
pub const SECTION_KEYWORDS: &[&str] = &["バンドル", "Bundle", "室"];

pub const BUNDLE_SIGNATURE: TableSignature = TableSignature {
    domain: "bundle",
    min_width: 2,
    groups: &[
        ColumnGroup {
            role: Role::Name,
            keywords: &["名称", "バンドル", "Name"],
            required: false,
            fallback: Fallback::Position(0),
        },
        ColumnGroup {
            role: Role::Items,
            keywords: &["必要", "アイテム", "要求", "Items"],
            required: false,
            fallback: Fallback::Absent,
        },
        ColumnGroup {
            role: Role::Reward,
            keywords: &["報酬", "Reward"],
            required: false,
            fallback: Fallback::Absent,
        },
    ],
};

static ITEM_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[、,・/]|\s+and\s+|\s+or\s+").unwrap());

/// Split a "required items" cell into trimmed, non-empty item mentions
pub fn split_item_mentions(text: &str) -> Vec<&str> {
    ITEM_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_bundle_section(heading: &str) -> bool {
    !heading.is_empty() && SECTION_KEYWORDS.iter().any(|k| heading.contains(k))
}

pub fn bundles_from_document(doc: &Document) -> (Vec<Bundle>, Vec<BundleItem>) {
    let mut bundles = Vec::new();
    let mut members = Vec::new();
    let extractor = TableExtractor::new(&BUNDLE_SIGNATURE);

    for section in doc.sections.iter().filter(|s| is_bundle_section(&s.heading)) {
        let rows = extractor.extract_tables(&section.tables);
        debug!(room = %section.heading, rows = rows.len(), "bundle section");

        for row in rows {
            let name = row.name();
            bundles.push(Bundle {
                room: section.heading.clone(),
                name_primary: name.to_string(),
                reward_desc: row.get(Role::Reward).map(str::to_string),
            });

            if let Some(items) = row.get(Role::Items) {
                members.extend(
                    split_item_mentions(items)
                        .into_iter()
                        .map(|mention| BundleItem::new(name, mention)),
                );
            }
        }
    }

    (bundles, members)
}

pub fn build_bundles(
    source: &mut dyn PageSource,
    candidates: &[String],
) -> (Vec<Bundle>, Vec<BundleItem>) {
    let Some((path, doc)) = first_available(source, candidates) else {
        warn!("no bundle page available");
        return (Vec::new(), Vec::new());
    };

    let (bundles, members) = bundles_from_document(&doc);
    info!(path = %path, bundles = bundles.len(), members = members.len(), "bundles built");
    (bundles, members)
}
