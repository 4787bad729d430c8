use crate::decode::{key_from_name, season_mask_from_text, time_range_from_text, weather_mask_from_text};
use crate::document::Document;
use crate::extract::{ColumnGroup, Fallback, Role, TableExtractor, TableSignature};
use crate::source::{first_available, PageSource};
use crate::types::{Fish, Item, ItemKind, SeasonMask};
use tracing::{info, warn};

pub const FISH_SIGNATURE: TableSignature = TableSignature {
    domain: "fish",
    min_width: 3,
    groups: &[
        ColumnGroup {
            role: Role::Name,
            keywords: &["魚", "名称", "名前"],
            required: true,
            fallback: Fallback::Position(0),
        },
        ColumnGroup {
            role: Role::Season,
            keywords: &["季節"],
            required: false,
            fallback: Fallback::Position(1),
        },
        ColumnGroup {
            role: Role::Weather,
            keywords: &["天気"],
            required: false,
            fallback: Fallback::Position(2),
        },
        ColumnGroup {
            role: Role::Time,
            keywords: &["時間"],
            required: true,
            fallback: Fallback::Position(3),
        },
        ColumnGroup {
            role: Role::Location,
            keywords: &["場所"],
            required: false,
            fallback: Fallback::ByWidth { min_width: 4, wide: 4, narrow: 3 },
        },
    ],
};

/// Fish rows of one page, with one item per row
pub fn fish_from_document(doc: &Document) -> (Vec<Item>, Vec<Fish>) {
    let mut items = Vec::new();
    let mut fish = Vec::new();

    for row in TableExtractor::new(&FISH_SIGNATURE).extract(doc) {
        let name = row.name();
        let key = key_from_name(name);
        let (time_start, time_end) = time_range_from_text(row.text(Role::Time));

        items.push(Item::new(key.clone(), name, ItemKind::Fish));
        fish.push(Fish {
            key,
            name_primary: name.to_string(),
            season_mask: season_mask_from_text(row.text(Role::Season)).or_default_to(SeasonMask::ALL),
            weather_mask: weather_mask_from_text(row.text(Role::Weather)),
            time_start,
            time_end,
            locations: row.text(Role::Location).to_string(),
        });
    }

    (items, fish)
}

/// Scrape the first fish page that loads; nothing if none does
pub fn build_fish(source: &mut dyn PageSource, candidates: &[String]) -> (Vec<Item>, Vec<Fish>) {
    let Some((path, doc)) = first_available(source, candidates) else {
        warn!("no fish page available");
        return (Vec::new(), Vec::new());
    };

    let (items, fish) = fish_from_document(&doc);
    info!(path = %path, fish = fish.len(), "fish built");
    (items, fish)
}
