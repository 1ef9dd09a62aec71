use bevy::prelude::*;

/// Console asks for a new player to join
#[derive(Event)]
pub struct JoinRequest {
    pub name: String,
}

/// Host finished spawning a player entity
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerSpawned {
    pub player: Entity,
}

/// Player confirmed a respawn
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerRespawned {
    pub player: Entity,
}

#[derive(Event)]
pub struct TakeDamage {
    pub player: Entity,
    pub damage: i32,
}

#[derive(Event)]
pub struct RespawnRequest {
    pub player: Entity,
}
