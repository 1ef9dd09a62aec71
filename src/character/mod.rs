pub mod components;
pub mod events;
pub mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JoinRequest>()
            .add_event::<PlayerSpawned>()
            .add_event::<PlayerRespawned>()
            .add_event::<TakeDamage>()
            .add_event::<RespawnRequest>()
            .add_systems(
                Update,
                (spawn_player, handle_take_damage, handle_respawn)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
