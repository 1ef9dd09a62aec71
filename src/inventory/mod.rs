pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::{GiveItemEvent, ListInventoryEvent};
use systems::{give_item, print_inventory};

/// Live containers plus the console's give/list handlers
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GiveItemEvent>()
            .add_event::<ListInventoryEvent>()
            // a listing queued with a give shows the new stack
            .add_systems(
                Update,
                (give_item, print_inventory)
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
