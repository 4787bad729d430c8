use crate::types::{Dataset, Item};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILES: [&str; 6] = [
    "items.json",
    "crops.json",
    "fish.json",
    "npcs.json",
    "bundles.json",
    "bundle_items.json",
];

/// Writes one pretty-printed JSON file per domain into a directory
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot directory: {}", dir.display()))?;
        Ok(SnapshotWriter { dir })
    }

    /// Write `value` as `<dir>/<name>`; non-ASCII text is kept as is
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", name))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        Ok(path)
    }

    /// Write the registry's items and the extracted records, in `SNAPSHOT_FILES` order.
    ///
    /// Records are written as the builders produced them, so bundle memberships
    /// keep their names and unresolved references stay visible.
    pub fn write_dataset(&self, items: &[Item], dataset: &Dataset) -> Result<Vec<PathBuf>> {
        Ok(vec![
            self.write(SNAPSHOT_FILES[0], items)?,
            self.write(SNAPSHOT_FILES[1], &dataset.crops)?,
            self.write(SNAPSHOT_FILES[2], &dataset.fish)?,
            self.write(SNAPSHOT_FILES[3], &dataset.npcs)?,
            self.write(SNAPSHOT_FILES[4], &dataset.bundles)?,
            self.write(SNAPSHOT_FILES[5], &dataset.bundle_items)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BundleItem, ItemKind, Npc};
    use serde_json::Value;

    #[test]
    fn test_write_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("raw")).unwrap();

        let items = vec![Item::new("_", "かぼちゃ", ItemKind::Crop)];
        let dataset = Dataset {
            npcs: vec![Npc {
                key: "abigail".into(),
                name_primary: "アビゲイル".into(),
                name_secondary: Some("Abigail".into()),
            }],
            bundle_items: vec![BundleItem::new("No Such Bundle", "粘土")],
            ..Dataset::default()
        };

        let written = writer.write_dataset(&items, &dataset).unwrap();
        assert_eq!(written.len(), SNAPSHOT_FILES.len());

        let items = std::fs::read_to_string(dir.path().join("raw/items.json")).unwrap();
        assert!(items.contains("かぼちゃ"));
        assert!(items.contains("\n  "));

        let parsed: Value = serde_json::from_str(&items).unwrap();
        assert_eq!(parsed[0]["type"], "crop");

        let fish: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("raw/fish.json")).unwrap())
                .unwrap();
        assert_eq!(fish, Value::Array(vec![]));

        // memberships are kept by name even when their bundle never resolves
        let members: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("raw/bundle_items.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(members[0]["bundle_name"], "No Such Bundle");
        assert_eq!(members[0]["item_name"], "粘土");
    }
}
