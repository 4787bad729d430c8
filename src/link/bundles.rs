use crate::decode::key_from_name;
use crate::link::registry::ItemRegistry;
use crate::types::{Bundle, BundleId, BundleItem, ItemId, ItemKind};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A bundle membership with both ends resolved to ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkedBundleItem {
    pub bundle_id: BundleId,
    pub item_id: ItemId,
    pub qty: u32,
    pub quality_req: Option<u32>,
}

/// Resolves bundle memberships by bundle name.
///
/// Bundle ids are 1-based positions in the bundle list. When two bundles share
/// a name the later one owns it.
pub struct BundleLinker {
    ids: HashMap<String, BundleId>,
}

impl BundleLinker {
    pub fn new(bundles: &[Bundle]) -> Self {
        let ids = bundles
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name_primary.clone(), BundleId(i as u32 + 1)))
            .collect();
        BundleLinker { ids }
    }

    pub fn bundle_id(&self, name: &str) -> Option<BundleId> {
        self.ids.get(name).copied()
    }

    /// Resolve every membership whose bundle exists, synthesizing missing items
    /// as materials. Memberships of unknown bundles are dropped.
    pub fn link(&self, members: &[BundleItem], registry: &mut ItemRegistry) -> Vec<LinkedBundleItem> {
        let mut linked = Vec::with_capacity(members.len());

        for member in members {
            let Some(bundle_id) = self.bundle_id(&member.bundle_name) else {
                debug!(bundle = %member.bundle_name, item = %member.item_name, "unknown bundle, link dropped");
                continue;
            };

            let key = key_from_name(&member.item_name);
            let (item_id, created) =
                registry.lookup_or_synthesize(&key, &member.item_name, ItemKind::Material);
            if created {
                debug!(key = %key, "synthesized material item");
            }

            linked.push(LinkedBundleItem {
                bundle_id,
                item_id,
                qty: member.qty,
                quality_req: member.quality_req,
            });
        }

        linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn bundle(name: &str) -> Bundle {
        Bundle {
            room: "Pantry".into(),
            name_primary: name.into(),
            reward_desc: None,
        }
    }

    #[test]
    fn test_unknown_bundle_is_dropped() {
        let bundles = vec![bundle("Spring Crops"), bundle("Fish Tank")];
        let members = vec![
            BundleItem::new("Spring Crops", "Parsnip"),
            BundleItem::new("Ghost Bundle", "Ectoplasm"),
            BundleItem::new("Fish Tank", "Carp"),
        ];

        let mut registry = ItemRegistry::new();
        registry.submit(Item::new("carp", "Carp", ItemKind::Fish));

        let linked = BundleLinker::new(&bundles).link(&members, &mut registry);
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].bundle_id, BundleId(1));
        assert_eq!(linked[0].item_id, ItemId(2));
        assert_eq!(linked[1].bundle_id, BundleId(2));
        assert_eq!(linked[1].item_id, ItemId(1));

        // the dropped link synthesized nothing
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(ItemId(2)).unwrap().kind, ItemKind::Material);
        assert!(registry.id_of("ectoplasm").is_none());
    }

    #[test]
    fn test_repeated_mentions_share_one_item() {
        let bundles = vec![bundle("A"), bundle("B")];
        let members = vec![BundleItem::new("A", "Wood"), BundleItem::new("B", "Wood")];

        let mut registry = ItemRegistry::new();
        let linked = BundleLinker::new(&bundles).link(&members, &mut registry);

        assert_eq!(registry.len(), 1);
        assert_eq!(linked[0].item_id, linked[1].item_id);
    }

    #[test]
    fn test_duplicate_bundle_names_resolve_to_last() {
        let bundles = vec![bundle("Dup"), bundle("Other"), bundle("Dup")];
        let linker = BundleLinker::new(&bundles);
        assert_eq!(linker.bundle_id("Dup"), Some(BundleId(3)));
        assert_eq!(linker.bundle_id("Other"), Some(BundleId(2)));
    }
}
