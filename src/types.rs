use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identity of an item in the registry (1-based, insertion order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Numeric identity of a bundle (1-based, position in the bundle list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleId(pub u32);

/// Category of an item, persisted as its lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Crop,
    Fish,
    Material,
    Npc,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Crop => "crop",
            ItemKind::Fish => "fish",
            ItemKind::Material => "material",
            ItemKind::Npc => "npc",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of seasons: spring=1, summer=2, fall=4, winter=8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonMask(pub u8);

impl SeasonMask {
    pub const NONE: SeasonMask = SeasonMask(0);
    pub const SPRING: SeasonMask = SeasonMask(1);
    pub const SUMMER: SeasonMask = SeasonMask(2);
    pub const FALL: SeasonMask = SeasonMask(4);
    pub const WINTER: SeasonMask = SeasonMask(8);
    pub const ALL: SeasonMask = SeasonMask(1 | 2 | 4 | 8);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Replace an empty mask with `default`
    pub fn or_default_to(self, default: SeasonMask) -> SeasonMask {
        if self.is_empty() {
            default
        } else {
            self
        }
    }
}

impl std::ops::BitOr for SeasonMask {
    type Output = SeasonMask;

    fn bitor(self, rhs: SeasonMask) -> SeasonMask {
        SeasonMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SeasonMask {
    fn bitor_assign(&mut self, rhs: SeasonMask) {
        self.0 |= rhs.0;
    }
}

/// Set of weather conditions: sunny=1, rain=2, storm=4, wind=8, snow=16
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherMask(pub u8);

impl WeatherMask {
    pub const NONE: WeatherMask = WeatherMask(0);
    pub const SUNNY: WeatherMask = WeatherMask(1);
    pub const RAIN: WeatherMask = WeatherMask(2);
    pub const STORM: WeatherMask = WeatherMask(4);
    pub const WIND: WeatherMask = WeatherMask(8);
    pub const SNOW: WeatherMask = WeatherMask(16);
    pub const ALL: WeatherMask = WeatherMask(1 | 2 | 4 | 8 | 16);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for WeatherMask {
    type Output = WeatherMask;

    fn bitor(self, rhs: WeatherMask) -> WeatherMask {
        WeatherMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for WeatherMask {
    fn bitor_assign(&mut self, rhs: WeatherMask) {
        self.0 |= rhs.0;
    }
}

/// A catalog entry - one row in the `item` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Slug derived from the display name, unique within the registry
    pub key: String,

    /// Display name as it appears on the source page
    pub name_primary: String,

    /// Alternate-language display name, when known
    pub name_secondary: Option<String>,

    #[serde(rename = "type")]
    pub kind: ItemKind,

    pub sell_price: Option<u32>,

    pub notes: Option<String>,
}

impl Item {
    /// Create a minimal item: every optional field absent
    pub fn new(key: impl Into<String>, name_primary: impl Into<String>, kind: ItemKind) -> Self {
        Item {
            key: key.into(),
            name_primary: name_primary.into(),
            name_secondary: None,
            kind,
            sell_price: None,
            notes: None,
        }
    }

    pub fn with_sell_price(mut self, price: u32) -> Self {
        self.sell_price = Some(price);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Key of the item this crop produces
    pub key: String,
    pub season_mask: SeasonMask,
    pub seed_price: Option<i64>,
    pub days_to_grow: i64,
    pub regrow_days: Option<i64>,
    pub avg_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    /// Key of the item this fish is
    pub key: String,
    pub name_primary: String,
    pub season_mask: SeasonMask,
    pub weather_mask: WeatherMask,
    /// Minutes of day, 0..=1440
    pub time_start: u16,
    pub time_end: u16,
    /// Location cell copied verbatim
    pub locations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub key: String,
    pub name_primary: String,
    pub name_secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Heading text of the section the bundle was listed under
    pub room: String,
    pub name_primary: String,
    pub reward_desc: Option<String>,
}

/// Membership of an item in a bundle, referenced by display names until linked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleItem {
    pub bundle_name: String,
    pub item_name: String,
    pub qty: u32,
    pub quality_req: Option<u32>,
}

impl BundleItem {
    pub fn new(bundle_name: impl Into<String>, item_name: impl Into<String>) -> Self {
        BundleItem {
            bundle_name: bundle_name.into(),
            item_name: item_name.into(),
            qty: 1,
            quality_req: None,
        }
    }
}

/// Everything the builders extracted in one run, before cross-linking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub crop_items: Vec<Item>,
    pub crops: Vec<Crop>,
    pub fish_items: Vec<Item>,
    pub fish: Vec<Fish>,
    pub npcs: Vec<Npc>,
    pub bundles: Vec<Bundle>,
    pub bundle_items: Vec<BundleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_serializes_kind_as_type() {
        let item = Item::new("parsnip", "Parsnip", ItemKind::Crop).with_sell_price(35);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "crop");
        assert_eq!(json["sell_price"], 35);
        assert!(json["notes"].is_null());
    }

    #[test]
    fn test_season_mask_default() {
        assert_eq!(SeasonMask::NONE.or_default_to(SeasonMask::ALL), SeasonMask::ALL);
        assert_eq!(SeasonMask::FALL.or_default_to(SeasonMask::ALL), SeasonMask::FALL);
        assert_eq!((SeasonMask::FALL | SeasonMask::WINTER).bits(), 12);
    }
}
