//! End-to-end harvest run
//!
//! Builds every domain through one `PageSource` (crops, fish, npcs, bundles,
//! in that order), links the result and writes the snapshots and load script.
//! Fetch failures only shrink the dataset; output failures are returned.

use crate::build::{build_bundles, build_crops, build_fish, build_npcs};
use crate::config::{HarvestConfig, SourcePaths};
use crate::link::{link, LinkedDataset};
use crate::snapshot::SnapshotWriter;
use crate::source::PageSource;
use crate::sql::{emit, Script};
use crate::types::Dataset;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub struct Pipeline {
    sources: SourcePaths,
}

/// What one run produced, before anything is written
#[derive(Debug, Clone, Default)]
pub struct HarvestOutput {
    pub dataset: Dataset,
    pub linked: LinkedDataset,
}

/// Files written by `HarvestOutput::write_outputs`
#[derive(Debug, Clone, Default)]
pub struct WrittenOutputs {
    pub snapshots: Vec<PathBuf>,
    pub script: PathBuf,
}

impl Pipeline {
    pub fn new(sources: SourcePaths) -> Self {
        Pipeline { sources }
    }

    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(config.sources.clone())
    }

    pub fn run(&self, source: &mut dyn PageSource) -> HarvestOutput {
        let (crop_items, crops) = build_crops(source, &self.sources.crops);
        let (fish_items, fish) = build_fish(source, &self.sources.fish);
        let npcs = build_npcs(source, &self.sources.npcs);
        let (bundles, bundle_items) = build_bundles(source, &self.sources.bundles);

        let dataset = Dataset {
            crop_items,
            crops,
            fish_items,
            fish,
            npcs,
            bundles,
            bundle_items,
        };
        let linked = link(&dataset);

        HarvestOutput { dataset, linked }
    }
}

impl HarvestOutput {
    pub fn script(&self) -> Script {
        emit(&self.linked)
    }

    /// Write the snapshots (when enabled) and the load script
    pub fn write_outputs(&self, config: &HarvestConfig) -> Result<WrittenOutputs> {
        let snapshots = if config.write_snapshots {
            SnapshotWriter::new(&config.raw_dir)?.write_dataset(&self.linked.items, &self.dataset)?
        } else {
            Vec::new()
        };

        std::fs::create_dir_all(&config.sql_dir).with_context(|| {
            format!("Failed to create SQL directory: {}", config.sql_dir.display())
        })?;
        let script = config.script_path();
        std::fs::write(&script, self.script().render())
            .with_context(|| format!("Failed to write load script: {}", script.display()))?;

        info!(
            items = self.linked.items.len(),
            crops = self.linked.crops.len(),
            fish = self.linked.fish.len(),
            npcs = self.linked.npcs.len(),
            bundles = self.linked.bundles.len(),
            bundle_items = self.linked.bundle_items.len(),
            script = %script.display(),
            "harvest written"
        );

        Ok(WrittenOutputs { snapshots, script })
    }
}
