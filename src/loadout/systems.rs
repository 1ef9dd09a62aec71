use bevy::prelude::*;

use super::apply::apply;
use super::record::LoadoutRecord;
use super::store::{LoadoutStore, StoredLoadout};
use crate::character::components::{Player, Vitals};
use crate::character::events::{PlayerRespawned, PlayerSpawned};
use crate::config::{Configuration, LoadoutConfig};
use crate::core::permissions::{
    PERMISSION_GET_LOADOUT, PERMISSION_SAVE, PERMISSION_SET_DEFAULT, Permissions,
};
use crate::data::schema::ItemCatalog;
use crate::inventory::components::PlayerInventory;

/// Spawned players waiting for the next tick
#[derive(Resource, Debug, Default)]
pub struct PendingLoadouts(Vec<Entity>);

impl PendingLoadouts {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub fn register_permissions(mut permissions: ResMut<Permissions>) {
    for permission in [PERMISSION_SAVE, PERMISSION_SET_DEFAULT, PERMISSION_GET_LOADOUT] {
        permissions.register(permission);
    }
}

/// The player's own record, nothing after a reset, otherwise the configured default
pub fn resolve_loadout(
    store: &LoadoutStore,
    configuration: &Configuration,
    identity: &str,
) -> Option<LoadoutRecord> {
    match store.load(identity) {
        Ok(StoredLoadout::Saved(record)) => Some(record),
        Ok(StoredLoadout::Reset) => None,
        Ok(StoredLoadout::Missing) => configuration.default_loadout.clone(),
        Err(e) => {
            warn!("{e}; using the default loadout");
            configuration.default_loadout.clone()
        }
    }
}

/// Strips the player and hands out the resolved loadout
pub fn give_loadout(
    player: &Player,
    inventory: &mut PlayerInventory,
    store: &LoadoutStore,
    configuration: &Configuration,
    catalog: &ItemCatalog,
) {
    let loadout = resolve_loadout(store, configuration, &player.id);
    inventory.strip();

    let Some(record) = loadout else {
        debug!("{} has no loadout to receive", player.name);
        return;
    };

    let report = apply(&record, inventory, catalog);
    let skipped: Vec<String> = report
        .skipped
        .iter()
        .map(|s| format!("{}:{}", s.group.label(), s.kind))
        .collect();
    info!(
        "Gave loadout to {}: {} placed, {} skipped [{}]",
        player.name,
        report.placed,
        skipped.len(),
        skipped.join(", ")
    );
}

/// Runs before `queue_spawn_loadouts`, so anything queued this tick waits for the next one
pub fn flush_pending_loadouts(
    mut pending: ResMut<PendingLoadouts>,
    mut players: Query<(&Player, &Vitals, &mut PlayerInventory)>,
    permissions: Res<Permissions>,
    store: Res<LoadoutStore>,
    config: Res<LoadoutConfig>,
    catalog: Res<ItemCatalog>,
) {
    for entity in std::mem::take(&mut pending.0) {
        // the player may have left or died since spawning
        let Ok((player, vitals, mut inventory)) = players.get_mut(entity) else {
            continue;
        };
        if vitals.is_dead() || !permissions.has(&player.id, PERMISSION_GET_LOADOUT) {
            continue;
        }
        give_loadout(player, &mut inventory, &store, &config.configuration, &catalog);
    }
}

pub fn queue_spawn_loadouts(
    mut ev_spawned: EventReader<PlayerSpawned>,
    mut pending: ResMut<PendingLoadouts>,
) {
    pending.0.extend(ev_spawned.read().map(|ev| ev.player));
}

pub fn give_on_respawn(
    mut ev_respawned: EventReader<PlayerRespawned>,
    mut players: Query<(&Player, &mut PlayerInventory)>,
    permissions: Res<Permissions>,
    store: Res<LoadoutStore>,
    config: Res<LoadoutConfig>,
    catalog: Res<ItemCatalog>,
) {
    for ev in ev_respawned.read() {
        let Ok((player, mut inventory)) = players.get_mut(ev.player) else {
            continue;
        };
        if !permissions.has(&player.id, PERMISSION_GET_LOADOUT) {
            continue;
        }
        give_loadout(player, &mut inventory, &store, &config.configuration, &catalog);
    }
}
