use crate::config::SeasonPage;
use crate::decode::{first_integer, key_from_name};
use crate::document::Document;
use crate::extract::{ColumnGroup, Fallback, Role, TableExtractor, TableSignature};
use crate::source::PageSource;
use crate::types::{Crop, Item, ItemKind, SeasonMask};
use std::collections::HashSet;
use tracing::{info, warn};

pub const CROP_SIGNATURE: TableSignature = TableSignature {
    domain: "crop",
    min_width: 3,
    groups: &[
        ColumnGroup {
            role: Role::Name,
            keywords: &["作物", "名称", "作物名"],
            required: true,
            fallback: Fallback::Position(0),
        },
        ColumnGroup {
            role: Role::DaysToGrow,
            keywords: &["成長", "日数"],
            required: false,
            fallback: Fallback::Position(1),
        },
        ColumnGroup {
            role: Role::SeedPrice,
            keywords: &["種", "価格"],
            required: false,
            fallback: Fallback::Position(2),
        },
    ],
};

/// Crop records collected so far in a run.
///
/// Passed into and returned from each season page. A key already present is
/// never emitted again, so a crop listed on several season pages keeps the
/// season of the first page only.
#[derive(Debug, Clone, Default)]
pub struct CropAccumulator {
    seen: HashSet<String>,
    items: Vec<Item>,
    crops: Vec<Crop>,
}

impl CropAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Item>, Vec<Crop>) {
        (self.items, self.crops)
    }
}

/// Add the crops of one season page
pub fn build_season_page(
    mut acc: CropAccumulator,
    doc: &Document,
    season: SeasonMask,
) -> CropAccumulator {
    for row in TableExtractor::new(&CROP_SIGNATURE).extract(doc) {
        let name = row.name();
        let key = key_from_name(name);
        if !acc.seen.insert(key.clone()) {
            continue;
        }

        acc.items.push(Item::new(key.clone(), name, ItemKind::Crop));
        acc.crops.push(Crop {
            key,
            season_mask: season,
            seed_price: first_integer(row.text(Role::SeedPrice)),
            days_to_grow: first_integer(row.text(Role::DaysToGrow)).unwrap_or(0),
            regrow_days: None,
            avg_yield: 1.0,
        });
    }
    acc
}

/// Load every season page and collect crops. Unavailable pages are skipped.
pub fn build_crops(source: &mut dyn PageSource, pages: &[SeasonPage]) -> (Vec<Item>, Vec<Crop>) {
    let mut acc = CropAccumulator::new();

    for page in pages {
        match source.fetch(&page.path) {
            Ok(doc) => acc = build_season_page(acc, &doc, page.season),
            Err(e) => warn!(path = %page.path, error = %e, "season page unavailable"),
        }
    }

    info!(crops = acc.len(), "crops built");
    acc.into_parts()
}
