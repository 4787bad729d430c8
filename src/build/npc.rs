use crate::decode::key_from_name;
use crate::document::Document;
use crate::extract::{ColumnGroup, Fallback, Role, TableExtractor, TableSignature};
use crate::source::{first_available, PageSource};
use crate::types::Npc;
use tracing::{info, warn};

pub const NPC_SIGNATURE: TableSignature = TableSignature {
    domain: "npc",
    min_width: 2,
    groups: &[
        ColumnGroup {
            role: Role::Name,
            keywords: &["名前", "名称"],
            required: true,
            fallback: Fallback::Position(0),
        },
        ColumnGroup {
            role: Role::SecondaryName,
            keywords: &["英名", "英語", "English"],
            required: false,
            fallback: Fallback::Absent,
        },
    ],
};

pub fn npcs_from_document(doc: &Document) -> Vec<Npc> {
    TableExtractor::new(&NPC_SIGNATURE)
        .extract(doc)
        .into_iter()
        .map(|row| Npc {
            key: key_from_name(row.name()),
            name_primary: row.name().to_string(),
            name_secondary: row.get(Role::SecondaryName).map(str::to_string),
        })
        .collect()
}

/// NPCs live in their own catalog; no items are created for them
pub fn build_npcs(source: &mut dyn PageSource, candidates: &[String]) -> Vec<Npc> {
    let Some((path, doc)) = first_available(source, candidates) else {
        warn!("no villager page available");
        return Vec::new();
    };

    let npcs = npcs_from_document(&doc);
    info!(path = %path, npcs = npcs.len(), "npcs built");
    npcs
}
