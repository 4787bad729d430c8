use crate::link::LinkedDataset;
use crate::sql::ir::{
    Script, SqlValue, Statement, BUNDLE, BUNDLE_ITEM, CROP, DELETE_ORDER, FISH, ITEM, NPC,
};
use crate::types::Item;

fn seq(i: usize) -> SqlValue {
    SqlValue::Integer(i as i64 + 1)
}

fn item_row(i: usize, item: &Item) -> Vec<SqlValue> {
    vec![
        seq(i),
        SqlValue::text(&item.key),
        SqlValue::text(&item.name_primary),
        SqlValue::opt_text(item.name_secondary.as_deref()),
        SqlValue::text(item.kind.as_str()),
        SqlValue::opt_int(item.sell_price),
        SqlValue::opt_text(item.notes.as_deref()),
    ]
}

/// Build the load script for a linked dataset.
///
/// One transaction: clear every table dependents-first, then insert items,
/// crops, npcs, fish, bundles and bundle items with sequential ids. Running the
/// script again replaces the data instead of duplicating it.
pub fn emit(linked: &LinkedDataset) -> Script {
    let mut script = Script::new();
    script.push(Statement::Begin);

    for &table in DELETE_ORDER {
        script.push(Statement::Delete { table });
    }

    for (i, item) in linked.items.iter().enumerate() {
        script.insert(ITEM, item_row(i, item));
    }

    for (i, c) in linked.crops.iter().enumerate() {
        script.insert(
            CROP,
            vec![
                seq(i),
                c.item_id.0.into(),
                c.crop.season_mask.bits().into(),
                SqlValue::opt_int(c.crop.seed_price),
                c.crop.days_to_grow.into(),
                SqlValue::opt_int(c.crop.regrow_days),
                c.crop.avg_yield.into(),
            ],
        );
    }

    for (i, npc) in linked.npcs.iter().enumerate() {
        script.insert(
            NPC,
            vec![
                seq(i),
                SqlValue::text(&npc.key),
                SqlValue::text(&npc.name_primary),
                SqlValue::opt_text(npc.name_secondary.as_deref()),
            ],
        );
    }

    for (i, f) in linked.fish.iter().enumerate() {
        script.insert(
            FISH,
            vec![
                seq(i),
                f.item_id.0.into(),
                f.fish.season_mask.bits().into(),
                f.fish.weather_mask.bits().into(),
                f.fish.time_start.into(),
                f.fish.time_end.into(),
                SqlValue::text(&f.fish.locations),
            ],
        );
    }

    for (i, b) in linked.bundles.iter().enumerate() {
        script.insert(
            BUNDLE,
            vec![
                seq(i),
                SqlValue::text(&b.room),
                SqlValue::text(&b.name_primary),
                SqlValue::opt_text(b.reward_desc.as_deref()),
            ],
        );
    }

    for bi in &linked.bundle_items {
        script.insert(
            BUNDLE_ITEM,
            vec![
                bi.bundle_id.0.into(),
                bi.item_id.0.into(),
                bi.qty.into(),
                SqlValue::opt_int(bi.quality_req),
            ],
        );
    }

    script.push(Statement::Commit);
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{link, LinkedBundleItem};
    use crate::types::{
        Bundle, BundleId, BundleItem, Crop, Dataset, ItemId, ItemKind, Npc, SeasonMask,
    };

    fn sample() -> Dataset {
        Dataset {
            crop_items: vec![Item::new("parsnip", "Parsnip", ItemKind::Crop)],
            crops: vec![Crop {
                key: "parsnip".into(),
                season_mask: SeasonMask::SPRING,
                seed_price: Some(20),
                days_to_grow: 4,
                regrow_days: None,
                avg_yield: 1.0,
            }],
            npcs: vec![Npc {
                key: "o_malley".into(),
                name_primary: "O'Malley".into(),
                name_secondary: None,
            }],
            bundles: vec![Bundle {
                room: "Pantry".into(),
                name_primary: "Spring Crops".into(),
                reward_desc: Some("Speed-Gro".into()),
            }],
            bundle_items: vec![BundleItem::new("Spring Crops", "Parsnip")],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_statement_order() {
        let script = emit(&link(&sample()));
        let lines: Vec<String> = script.statements().iter().map(ToString::to_string).collect();

        assert_eq!(lines[0], "BEGIN TRANSACTION;");
        assert_eq!(lines[1], "DELETE FROM gift_preference;");
        assert_eq!(lines[8], "DELETE FROM item;");
        assert_eq!(
            lines[9],
            "INSERT INTO item(id,key,name_ja,name_en,type,sell_price,notes) VALUES (1,'parsnip','Parsnip',NULL,'crop',NULL,NULL);"
        );
        assert_eq!(
            lines[10],
            "INSERT INTO crop(id,item_id,season_mask,seed_price,days_to_grow,regrow_days,avg_yield) VALUES (1,1,1,20,4,NULL,1.0);"
        );
        assert_eq!(
            lines[11],
            "INSERT INTO npc(id,key,name_ja,name_en) VALUES (1,'o_malley','O''Malley',NULL);"
        );
        assert_eq!(
            lines[12],
            "INSERT INTO bundle(id,room,name_ja,reward_desc) VALUES (1,'Pantry','Spring Crops','Speed-Gro');"
        );
        assert_eq!(
            lines[13],
            "INSERT INTO bundle_item(bundle_id,item_id,qty,quality_req) VALUES (1,1,1,NULL);"
        );
        assert_eq!(lines.last().unwrap(), "COMMIT;");
    }

    #[test]
    fn test_dropped_links_emit_nothing() {
        let mut linked = link(&sample());
        linked.bundle_items.push(LinkedBundleItem {
            bundle_id: BundleId(1),
            item_id: ItemId(1),
            qty: 3,
            quality_req: Some(2),
        });
        let script = emit(&linked);
        assert_eq!(script.insert_count("bundle_item"), 2);
        assert!(script.render().contains("VALUES (1,1,3,2);"));

        let mut dataset = sample();
        dataset.bundle_items.push(BundleItem::new("No Such Bundle", "Parsnip"));
        assert_eq!(emit(&link(&dataset)).insert_count("bundle_item"), 1);
    }

    #[test]
    fn test_empty_dataset_still_clears_tables() {
        let script = emit(&LinkedDataset::default());
        assert_eq!(script.statements().len(), 2 + DELETE_ORDER.len());
    }
}
