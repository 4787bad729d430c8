//! Cross-domain linking
//!
//! Merges the per-domain item mentions into one `ItemRegistry` and resolves
//! every reference to a numeric id. Registry access order is fixed: crop items,
//! fish items, crop references, fish references, then bundle memberships.

pub mod bundles;
pub mod registry;

pub use bundles::{BundleLinker, LinkedBundleItem};
pub use registry::ItemRegistry;

use crate::types::{Bundle, Crop, Dataset, Fish, Item, ItemId, ItemKind, Npc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedCrop {
    pub item_id: ItemId,
    /// Set when the crop's key was missing from the registry and the crop's own
    /// position was used as its item id instead
    pub positional_fallback: bool,
    pub crop: Crop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedFish {
    pub item_id: ItemId,
    pub fish: Fish,
}

/// The entity graph with every reference resolved, ready for emission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedDataset {
    /// Registry order; an item's id is its position + 1
    pub items: Vec<Item>,
    pub crops: Vec<LinkedCrop>,
    pub npcs: Vec<Npc>,
    pub fish: Vec<LinkedFish>,
    pub bundles: Vec<Bundle>,
    pub bundle_items: Vec<LinkedBundleItem>,
}

/// Item id for the crop at 0-based `position`.
///
/// A key missing from the registry falls back to the crop's own 1-based
/// position. That id may point at an unrelated item.
pub fn crop_item_id(registry: &ItemRegistry, key: &str, position: usize) -> (ItemId, bool) {
    match registry.id_of(key) {
        Some(id) => (id, false),
        None => (ItemId(position as u32 + 1), true),
    }
}

pub fn link(dataset: &Dataset) -> LinkedDataset {
    let mut registry = ItemRegistry::new();
    registry.submit_all(dataset.crop_items.iter().cloned());
    registry.submit_all(dataset.fish_items.iter().cloned());

    let crops = dataset
        .crops
        .iter()
        .enumerate()
        .map(|(i, crop)| {
            let (item_id, positional_fallback) = crop_item_id(&registry, &crop.key, i);
            if positional_fallback {
                warn!(key = %crop.key, item_id = item_id.0, "crop item missing, using positional id");
            }
            LinkedCrop {
                item_id,
                positional_fallback,
                crop: crop.clone(),
            }
        })
        .collect();

    let fish = dataset
        .fish
        .iter()
        .map(|f| {
            let (item_id, _) = registry.lookup_or_synthesize(&f.key, &f.name_primary, ItemKind::Fish);
            LinkedFish {
                item_id,
                fish: f.clone(),
            }
        })
        .collect();

    let bundle_items = BundleLinker::new(&dataset.bundles).link(&dataset.bundle_items, &mut registry);

    let linked = LinkedDataset {
        items: registry.into_items(),
        crops,
        npcs: dataset.npcs.clone(),
        fish,
        bundles: dataset.bundles.clone(),
        bundle_items,
    };

    info!(
        items = linked.items.len(),
        crops = linked.crops.len(),
        fish = linked.fish.len(),
        npcs = linked.npcs.len(),
        bundles = linked.bundles.len(),
        bundle_items = linked.bundle_items.len(),
        "dataset linked"
    );
    linked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BundleItem, SeasonMask, WeatherMask};

    fn crop(key: &str) -> Crop {
        Crop {
            key: key.into(),
            season_mask: SeasonMask::SPRING,
            seed_price: None,
            days_to_grow: 4,
            regrow_days: None,
            avg_yield: 1.0,
        }
    }

    fn fish(key: &str) -> Fish {
        Fish {
            key: key.into(),
            name_primary: key.to_uppercase(),
            season_mask: SeasonMask::ALL,
            weather_mask: WeatherMask::ALL,
            time_start: 0,
            time_end: 1440,
            locations: String::new(),
        }
    }

    #[test]
    fn test_link_order_and_ids() {
        let dataset = Dataset {
            crop_items: vec![
                Item::new("parsnip", "Parsnip", ItemKind::Crop),
                Item::new("eel", "Eel (crop?)", ItemKind::Crop),
            ],
            crops: vec![crop("parsnip"), crop("eel")],
            fish_items: vec![
                Item::new("eel", "Eel", ItemKind::Fish),
                Item::new("carp", "Carp", ItemKind::Fish),
            ],
            fish: vec![fish("eel"), fish("carp")],
            npcs: vec![],
            bundles: vec![Bundle {
                room: "Pantry".into(),
                name_primary: "Spring".into(),
                reward_desc: None,
            }],
            bundle_items: vec![
                BundleItem::new("Spring", "Parsnip"),
                BundleItem::new("Spring", "Sap"),
                BundleItem::new("Nowhere", "Stone"),
            ],
        };

        let linked = link(&dataset);
        let keys: Vec<_> = linked.items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["parsnip", "eel", "carp", "sap"]);
        // the crop page saw "eel" first, so the crop record wins
        assert_eq!(linked.items[1].kind, ItemKind::Crop);
        assert_eq!(linked.items[3].kind, ItemKind::Material);

        assert_eq!(linked.crops[1].item_id, ItemId(2));
        assert!(!linked.crops[1].positional_fallback);
        assert_eq!(linked.fish[0].item_id, ItemId(2));
        assert_eq!(linked.fish[1].item_id, ItemId(3));
        assert_eq!(linked.bundle_items.len(), 2);
        assert_eq!(linked.bundle_items[1].item_id, ItemId(4));
    }

    #[test]
    fn test_fish_without_item_is_synthesized() {
        let dataset = Dataset {
            fish: vec![fish("squid")],
            ..Dataset::default()
        };

        let linked = link(&dataset);
        assert_eq!(linked.items, vec![Item::new("squid", "SQUID", ItemKind::Fish)]);
        assert_eq!(linked.fish[0].item_id, ItemId(1));
    }

    #[test]
    fn test_crop_without_item_uses_position() {
        let dataset = Dataset {
            crop_items: vec![Item::new("kale", "Kale", ItemKind::Crop)],
            crops: vec![crop("kale"), crop("ghost")],
            ..Dataset::default()
        };

        let linked = link(&dataset);
        assert_eq!(linked.crops[1].item_id, ItemId(2));
        assert!(linked.crops[1].positional_fallback);
        assert_eq!(linked.items.len(), 1);
    }
}
