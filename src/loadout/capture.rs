use super::host::{Container, ContainerSet, LiveItem};
use super::record::{ItemRecord, LoadoutRecord, SlotGroup};

/// Snapshots `inventory`, leaving out every kind listed in `exclusions`.
///
/// Returns `None` when no group yields a single record. Reads only.
pub fn capture<S: ContainerSet>(inventory: &S, exclusions: &[String]) -> Option<LoadoutRecord> {
    let mut record = LoadoutRecord::default();
    for group in SlotGroup::ALL {
        let items = capture_container(
            inventory.container(group),
            group.logical_capacity(),
            exclusions,
        );
        record.set_group(group, items);
    }

    (!record.is_empty()).then_some(record)
}

fn capture_container<C: Container>(
    container: &C,
    logical_capacity: usize,
    exclusions: &[String],
) -> Option<Vec<ItemRecord>> {
    let scan = container.capacity().min(logical_capacity);
    let items: Vec<ItemRecord> = (0..scan)
        .filter_map(|slot| container.slot(slot).map(|item| (slot, item)))
        .filter(|(_, item)| !exclusions.iter().any(|kind| kind == item.kind()))
        .filter_map(|(slot, item)| record_item(item, slot))
        .collect();

    (!items.is_empty()).then_some(items)
}

fn record_item<I: LiveItem>(item: &I, slot: usize) -> Option<ItemRecord> {
    if item.amount() <= 0 {
        return None;
    }

    let nested = item
        .contents()
        .map(|contents| {
            (0..contents.capacity())
                .filter_map(|idx| contents.slot(idx))
                .map(|child| child.kind().to_owned())
                .collect()
        })
        .unwrap_or_default();

    Some(ItemRecord {
        kind: item.kind().to_owned(),
        amount: item.amount(),
        skin: item.skin(),
        slot: Some(slot),
        nested,
    })
}
