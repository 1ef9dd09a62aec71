use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::inventory::components::PlayerInventory;
use bevy::prelude::*;

/// Spawns a player entity and announces it
pub fn spawn_player(
    mut commands: Commands,
    mut ev_join: EventReader<JoinRequest>,
    mut ev_spawned: EventWriter<PlayerSpawned>,
    mut ev_log: EventWriter<LogEvent>,
    players: Query<&Player>,
) {
    for ev in ev_join.read() {
        let player = Player::from_name(&ev.name);
        if players.iter().any(|p| p.id == player.id) {
            ev_log.write(LogEvent(format!("{} is already connected", ev.name)));
            continue;
        }

        ev_log.write(LogEvent(format!("{} joined ({})", player.name, player.id)));
        let entity = commands
            .spawn((player, Vitals::default(), PlayerInventory::default()))
            .id();
        ev_spawned.write(PlayerSpawned { player: entity });
    }
}

pub fn handle_take_damage(
    mut ev_damage: EventReader<TakeDamage>,
    mut ev_log: EventWriter<LogEvent>,
    mut players: Query<(&Player, &mut Vitals)>,
) {
    for ev in ev_damage.read() {
        if let Ok((player, mut vitals)) = players.get_mut(ev.player) {
            if vitals.take_damage(ev.damage) {
                ev_log.write(LogEvent(format!("{} died", player.name)));
            } else {
                ev_log.write(LogEvent(format!(
                    "{} took {} damage ({}/{})",
                    player.name, ev.damage, vitals.hp, vitals.max_hp
                )));
            }
        }
    }
}

/// Brings a dead player back and tells the rest of the app
pub fn handle_respawn(
    mut ev_respawn: EventReader<RespawnRequest>,
    mut ev_respawned: EventWriter<PlayerRespawned>,
    mut ev_log: EventWriter<LogEvent>,
    mut players: Query<(&Player, &mut Vitals)>,
) {
    for ev in ev_respawn.read() {
        let Ok((player, mut vitals)) = players.get_mut(ev.player) else {
            continue;
        };
        if !vitals.is_dead() {
            ev_log.write(LogEvent(format!("{} is not dead", player.name)));
            continue;
        }
        vitals.restore();
        ev_log.write(LogEvent(format!("{} respawned", player.name)));
        ev_respawned.write(PlayerRespawned { player: ev.player });
    }
}
