//! # Harvest - Wiki Scraper for a Game Companion Data Store
//!
//! Pulls crop, fish, villager and bundle tables out of wiki pages, links every
//! item mention into one catalog with stable numeric ids and emits an
//! idempotent SQL load script plus JSON snapshots.
//!
//! ## Modules
//!
//! - **source**: where pages come from (live wiki, saved directory, memory)
//! - **document**: parsed page tables and heading sections
//! - **extract**: header-based table classification and column plans
//! - **decode**: free-text decoders for seasons, weather, times and numbers
//! - **build**: per-domain entity builders
//! - **link**: item registry and bundle linking
//! - **sql**: load script IR, emission and database assembly
//! - **pipeline**: the whole run, from source to written outputs
//!
//! ## Quick Start
//!
//! ```rust
//! use harvest::{MemorySource, Pipeline, SourcePaths};
//!
//! let mut source = MemorySource::new().with_page(
//!     "/住人",
//!     "<table><tr><th>名前</th><th>英名</th></tr>\
//!      <tr><td>アビゲイル</td><td>Abigail</td></tr></table>",
//! );
//!
//! let output = Pipeline::new(SourcePaths::default()).run(&mut source);
//! assert_eq!(output.linked.npcs.len(), 1);
//!
//! let sql = output.script().render();
//! assert!(sql.contains("'アビゲイル'"));
//! ```

pub mod build;
pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod extract;
pub mod link;
pub mod pipeline;
pub mod snapshot;
pub mod source;
pub mod sql;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{HarvestConfig, SeasonPage, SourcePaths};
pub use document::{Document, Section, Table};
pub use error::{HarvestError, Result};
pub use extract::{Classification, ColumnPlan, Rejection, TableClassifier, TableExtractor, TableSignature};
pub use link::{link, ItemRegistry, LinkedDataset};
pub use pipeline::{HarvestOutput, Pipeline, WrittenOutputs};
pub use snapshot::SnapshotWriter;
pub use source::{DirSource, HttpSource, MemorySource, PageSource};
pub use sql::{emit, Script, ScriptParts};
pub use types::{
    Bundle, BundleId, BundleItem, Crop, Dataset, Fish, Item, ItemId, ItemKind, Npc, SeasonMask,
    WeatherMask,
};
