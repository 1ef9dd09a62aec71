use bevy::log::{debug, warn};

use super::host::{Container, ContainerSet, ItemFactory, LiveItem};
use super::record::{ItemRecord, LoadoutRecord, SlotGroup};

/// Why an entry (or one of its nested items) did not make it into the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InvalidAmount(i32),
    UnknownKind,
    /// Destination container full or refused the item
    Refused,
    NestedUnknownKind(String),
    NestedRefused(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub group: SlotGroup,
    pub kind: String,
    pub reason: SkipReason,
}

/// Outcome of one apply pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub placed: usize,
    pub skipped: Vec<Skipped>,
}

impl ApplyReport {
    fn skip(&mut self, group: SlotGroup, kind: &str, reason: SkipReason) {
        warn!(
            "loadout: skipped {kind} in {} container: {reason:?}",
            group.label()
        );
        self.skipped.push(Skipped {
            group,
            kind: kind.to_owned(),
            reason,
        });
    }
}

/// Rebuilds `record` into `inventory`, which the caller has already cleared.
///
/// Best effort: a bad or unplaceable entry is skipped and the rest still go in.
pub fn apply<S, F>(record: &LoadoutRecord, inventory: &mut S, factory: &F) -> ApplyReport
where
    S: ContainerSet,
    F: ItemFactory<Item = <S::Container as Container>::Item>,
{
    let mut report = ApplyReport::default();

    for group in SlotGroup::ALL {
        let Some(entries) = record.group(group) else {
            continue;
        };
        let container = inventory.container_mut(group);

        for entry in entries {
            let Some(item) = build_item(entry, factory, group, &mut report) else {
                continue;
            };
            let position = item.position();
            if container.move_into(item, position).is_err() {
                report.skip(group, &entry.kind, SkipReason::Refused);
                continue;
            }
            report.placed += 1;
        }
    }

    report
}

fn build_item<F: ItemFactory>(
    entry: &ItemRecord,
    factory: &F,
    group: SlotGroup,
    report: &mut ApplyReport,
) -> Option<F::Item> {
    if !entry.has_valid_amount() {
        report.skip(group, &entry.kind, SkipReason::InvalidAmount(entry.amount));
        return None;
    }

    let Some(mut item) = factory.create(&entry.kind, entry.amount, entry.skin) else {
        report.skip(group, &entry.kind, SkipReason::UnknownKind);
        return None;
    };
    item.set_position(entry.slot);

    if !entry.nested.is_empty() {
        match item.contents_mut() {
            Some(contents) => {
                for child_kind in &entry.nested {
                    let Some(child) = factory.create(child_kind, 1, 0) else {
                        report.skip(
                            group,
                            &entry.kind,
                            SkipReason::NestedUnknownKind(child_kind.clone()),
                        );
                        continue;
                    };
                    if contents.move_into(child, None).is_err() {
                        report.skip(
                            group,
                            &entry.kind,
                            SkipReason::NestedRefused(child_kind.clone()),
                        );
                    }
                }
            }
            None => debug!(
                "loadout: {} has no sub-container, dropping {} nested items",
                entry.kind,
                entry.nested.len()
            ),
        }
    }

    item.refill_magazine();
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::test_catalog;
    use crate::inventory::components::{BELT_CAPACITY, PlayerInventory};
    use crate::loadout::capture::capture;

    fn kinds_at(inventory: &PlayerInventory, group: SlotGroup) -> Vec<(usize, String, i32, u64)> {
        inventory
            .container(group)
            .items()
            .map(|(slot, item)| (slot, item.kind.clone(), item.amount, item.skin))
            .collect()
    }

    #[test]
    fn belt_rifle_gets_full_magazine() {
        let record: LoadoutRecord = serde_json::from_str(
            r#"{"BeltItems":[{"ItemShortName":"rifle.ak","Amount":1}]}"#,
        )
        .unwrap();
        let mut inventory = PlayerInventory::default();
        assert_eq!(inventory.belt.capacity(), BELT_CAPACITY);

        let report = apply(&record, &mut inventory, &test_catalog());
        assert_eq!(report, ApplyReport { placed: 1, skipped: vec![] });

        let (slot, rifle) = inventory.belt.items().next().unwrap();
        assert_eq!(slot, 0);
        assert_eq!((rifle.kind.as_str(), rifle.amount), ("rifle.ak", 1));
        let mag = rifle.magazine.as_ref().unwrap();
        assert_eq!(mag.contents, mag.capacity);
        assert_eq!(mag.ammo, "ammo.rifle");
    }

    #[test]
    fn capture_then_apply_round_trips() {
        let catalog = test_catalog();
        let mut source = PlayerInventory::default();
        source
            .main
            .move_into(catalog.create("wood", 900, 0).unwrap(), Some(5))
            .unwrap();
        source
            .main
            .move_into(catalog.create("ammo.rifle", 128, 0).unwrap(), Some(23))
            .unwrap();
        source
            .belt
            .move_into(catalog.create("pistol.semiauto", 1, 811).unwrap(), Some(2))
            .unwrap();
        source
            .wear
            .move_into(catalog.create("metal.facemask", 1, 0).unwrap(), Some(6))
            .unwrap();
        let mut rifle = catalog.create("rifle.ak", 1, 0).unwrap();
        rifle
            .contents_mut()
            .unwrap()
            .move_into(catalog.create("weapon.mod.holosight", 1, 0).unwrap(), None)
            .unwrap();
        source.belt.move_into(rifle, Some(0)).unwrap();

        let record = capture(&source, &[]).unwrap();
        let mut target = PlayerInventory::default();
        let report = apply(&record, &mut target, &catalog);

        assert_eq!(report.placed, 5);
        for group in SlotGroup::ALL {
            assert_eq!(kinds_at(&source, group), kinds_at(&target, group));
        }
        let mods: Vec<_> = target
            .belt
            .slot(0)
            .and_then(|rifle| rifle.contents.as_ref())
            .unwrap()
            .items()
            .map(|(_, m)| m.kind.clone())
            .collect();
        assert_eq!(mods, vec!["weapon.mod.holosight"]);
    }

    #[test]
    fn bad_entries_are_skipped_without_stopping() {
        let record = LoadoutRecord {
            main_items: Some(vec![
                ItemRecord::new("wood", 0),
                ItemRecord::new("no.such.item", 3),
                ItemRecord::new("", 1),
                ItemRecord::new("stones", 50).with_slot(4),
            ]),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());

        assert_eq!(report.placed, 1);
        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::InvalidAmount(0),
                SkipReason::UnknownKind,
                SkipReason::UnknownKind,
            ]
        );
        assert_eq!(
            kinds_at(&inventory, SlotGroup::Main),
            vec![(4, "stones".to_string(), 50, 0)]
        );
    }

    #[test]
    fn duplicate_slots_do_not_block_later_entries() {
        let record = LoadoutRecord {
            belt_items: Some(vec![
                ItemRecord::new("bandage", 2).with_slot(0),
                ItemRecord::new("syringe.medical", 1).with_slot(0),
            ]),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());

        assert_eq!(report.placed, 2);
        assert_eq!(
            kinds_at(&inventory, SlotGroup::Belt),
            vec![
                (0, "bandage".to_string(), 2, 0),
                (1, "syringe.medical".to_string(), 1, 0),
            ]
        );
    }

    #[test]
    fn nested_items_go_into_sub_container() {
        let record = LoadoutRecord {
            belt_items: Some(vec![
                ItemRecord::new("rifle.ak", 1).with_nested([
                    "weapon.mod.holosight",
                    "wood",
                    "weapon.mod.unknown",
                    "weapon.mod.flashlight",
                ]),
            ]),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());

        assert_eq!(report.placed, 1);
        assert_eq!(
            report.skipped.iter().map(|s| s.reason.clone()).collect::<Vec<_>>(),
            vec![
                SkipReason::NestedRefused("wood".into()),
                SkipReason::NestedUnknownKind("weapon.mod.unknown".into()),
            ]
        );

        let rifle = inventory.belt.slot(0).unwrap();
        let mods: Vec<_> = rifle
            .contents
            .as_ref()
            .unwrap()
            .items()
            .map(|(_, m)| m.kind.clone())
            .collect();
        assert_eq!(mods, vec!["weapon.mod.holosight", "weapon.mod.flashlight"]);
    }

    #[test]
    fn nested_entries_are_dropped_silently_without_sub_container() {
        // shape of the compiled default config: ammo has no sub-container
        let record = LoadoutRecord {
            main_items: Some(vec![
                ItemRecord::new("ammo.rifle", 74).with_nested(["weapon.mod.holosight"]),
            ]),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());
        assert_eq!(report, ApplyReport { placed: 1, skipped: vec![] });
        assert!(inventory.main.slot(0).unwrap().contents.is_none());
    }

    #[test]
    fn refused_by_destination_is_reported() {
        let record = LoadoutRecord {
            worn_items: Some(vec![
                ItemRecord::new("rifle.ak", 1),
                ItemRecord::new("hoodie", 1),
            ]),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());

        assert_eq!(report.placed, 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Refused);
        assert_eq!(report.skipped[0].group, SlotGroup::Wear);
        assert_eq!(inventory.wear.slot(0).unwrap().kind, "hoodie");
    }

    #[test]
    fn overflow_is_discarded() {
        let record = LoadoutRecord {
            belt_items: Some((0..8).map(|_| ItemRecord::new("bandage", 1)).collect()),
            ..Default::default()
        };
        let mut inventory = PlayerInventory::default();
        let report = apply(&record, &mut inventory, &test_catalog());
        assert_eq!(report.placed, BELT_CAPACITY);
        assert_eq!(report.skipped.len(), 2);
    }
}
