//! Per-domain entity builders
//!
//! Each builder loads its page(s) through a `PageSource`, runs the
//! `TableExtractor` with its domain signature and decodes the resolved rows
//! into typed records. A page that cannot be loaded yields no records.

pub mod bundle;
pub mod crop;
pub mod fish;
pub mod npc;

pub use bundle::{build_bundles, bundles_from_document, split_item_mentions, BUNDLE_SIGNATURE};
pub use crop::{build_crops, build_season_page, CropAccumulator, CROP_SIGNATURE};
pub use fish::{build_fish, fish_from_document, FISH_SIGNATURE};
pub use npc::{build_npcs, npcs_from_document, NPC_SIGNATURE};
