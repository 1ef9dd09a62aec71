use super::{components::*, events::*};
use crate::character::components::Player;
use crate::core::events::LogEvent;
use crate::data::schema::ItemCatalog;
use crate::loadout::host::{Container, ContainerSet, ItemFactory};
use crate::loadout::record::SlotGroup;
use bevy::prelude::*;

/// Handles "give": builds the stack and drops it into the first free slot
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut ev_log: EventWriter<LogEvent>,
    mut players: Query<(&Player, &mut PlayerInventory)>,
    catalog: Res<ItemCatalog>,
) {
    for ev in ev_give.read() {
        let Ok((player, mut inventory)) = players.get_mut(ev.player) else {
            continue;
        };
        if ev.amount <= 0 {
            warn!("Refusing to give {} x{}", ev.kind, ev.amount);
            continue;
        }
        let Some(item) = catalog.create(&ev.kind, ev.amount, 0) else {
            ev_log.write(LogEvent(format!("No item with shortname {}", ev.kind)));
            continue;
        };

        match inventory.container_mut(ev.group).move_into(item, None) {
            Ok(slot) => ev_log.write(LogEvent(format!(
                "{} received {} x{} in {}[{slot}]",
                player.name,
                ev.kind,
                ev.amount,
                ev.group.label()
            ))),
            Err(item) => ev_log.write(LogEvent(format!(
                "{} container of {} cannot take {}",
                ev.group.label(),
                player.name,
                item.kind
            ))),
        };
    }
}

/// Prints every container of the requested player
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    mut ev_log: EventWriter<LogEvent>,
    players: Query<(&Player, &PlayerInventory)>,
) {
    for ev in ev_list.read() {
        let Ok((player, inventory)) = players.get(ev.player) else {
            continue;
        };

        let mut lines = vec![format!("== {} ==", player.name)];
        for group in SlotGroup::ALL {
            let container = inventory.container(group);
            if container.is_empty() {
                lines.push(format!("{}: (empty)", group.label()));
                continue;
            }
            for (idx, item) in container.items() {
                lines.push(format!("{}[{idx}] {}", group.label(), describe(item)));
            }
        }
        ev_log.write(LogEvent(lines.join("\n")));
    }
}

fn describe(item: &Item) -> String {
    let mut text = format!("{} x{}", item.kind, item.amount);
    if item.skin != 0 {
        text.push_str(&format!(" skin={}", item.skin));
    }
    if let Some(mag) = &item.magazine {
        text.push_str(&format!(" [{}/{} {}]", mag.contents, mag.capacity, mag.ammo));
    }
    if let Some(contents) = &item.contents {
        let mods: Vec<_> = contents.items().map(|(_, m)| m.kind.as_str()).collect();
        if !mods.is_empty() {
            text.push_str(&format!(" +{}", mods.join(",")));
        }
    }
    text
}
