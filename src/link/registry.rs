use crate::types::{Item, ItemId, ItemKind};
use std::collections::HashMap;

/// Ordered item catalog keyed by slug.
///
/// Identity is the 1-based insertion position. Ids are handed out once and
/// never renumbered; the first item submitted under a key is kept whole and
/// later ones are discarded.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    index: HashMap<String, ItemId>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.items.len() as u32 + 1);
        self.index.insert(item.key.clone(), id);
        self.items.push(item);
        id
    }

    /// Add `item` unless its key is already registered. Returns whether it was added.
    pub fn submit(&mut self, item: Item) -> bool {
        if self.index.contains_key(&item.key) {
            return false;
        }
        self.push(item);
        true
    }

    /// Submit items in order; returns how many were new
    pub fn submit_all<I: IntoIterator<Item = Item>>(&mut self, items: I) -> usize {
        items
            .into_iter()
            .map(|item| self.submit(item))
            .filter(|added| *added)
            .count()
    }

    pub fn id_of(&self, key: &str) -> Option<ItemId> {
        self.index.get(key).copied()
    }

    /// Existing id for `key`, or a new minimal item appended with `default_kind`.
    /// The flag is `true` when the item was synthesized.
    pub fn lookup_or_synthesize(
        &mut self,
        key: &str,
        display_name: &str,
        default_kind: ItemKind,
    ) -> (ItemId, bool) {
        if let Some(id) = self.id_of(key) {
            return (id, false);
        }
        (self.push(Item::new(key, display_name, default_kind)), true)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        let idx = (id.0 as usize).checked_sub(1)?;
        self.items.get(idx)
    }

    /// Items with their ids, in identity order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u32 + 1), item))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_submission_wins() {
        let mut registry = ItemRegistry::new();
        assert!(registry.submit(Item::new("carp", "Carp", ItemKind::Crop).with_sell_price(30)));
        assert!(registry.submit(Item::new("eel", "Eel", ItemKind::Fish)));
        assert!(!registry.submit(
            Item::new("carp", "Carp (fish)", ItemKind::Fish).with_notes("from the fish page")
        ));

        assert_eq!(registry.len(), 2);
        let carp = registry.get(ItemId(1)).unwrap();
        assert_eq!(carp.name_primary, "Carp");
        assert_eq!(carp.kind, ItemKind::Crop);
        assert_eq!(carp.sell_price, Some(30));
        assert_eq!(carp.notes, None);
    }

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut registry = ItemRegistry::new();
        let added = registry.submit_all(vec![
            Item::new("a", "A", ItemKind::Crop),
            Item::new("b", "B", ItemKind::Crop),
            Item::new("a", "A again", ItemKind::Fish),
            Item::new("c", "C", ItemKind::Fish),
        ]);
        assert_eq!(added, 3);

        let (id, created) = registry.lookup_or_synthesize("wood", "Wood", ItemKind::Material);
        assert_eq!((id, created), (ItemId(4), true));
        assert_eq!(registry.lookup_or_synthesize("b", "B", ItemKind::Material), (ItemId(2), false));

        let ids: Vec<_> = registry.iter().map(|(id, item)| (id.0, item.key.as_str())).collect();
        assert_eq!(ids, [(1, "a"), (2, "b"), (3, "c"), (4, "wood")]);
        assert_eq!(registry.id_of("a"), Some(ItemId(1)));
    }

    #[test]
    fn test_synthesized_item_is_minimal() {
        let mut registry = ItemRegistry::new();
        let (id, _) = registry.lookup_or_synthesize("clay", "Clay", ItemKind::Material);
        let item = registry.get(id).unwrap();

        assert_eq!(*item, Item::new("clay", "Clay", ItemKind::Material));
        assert!(registry.get(ItemId(0)).is_none());
    }
}
