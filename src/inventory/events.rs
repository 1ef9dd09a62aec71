use bevy::prelude::*;

use crate::loadout::record::SlotGroup;

#[derive(Event)]
pub struct GiveItemEvent {
    pub player: Entity,
    pub kind: String,
    pub amount: i32,
    pub group: SlotGroup,
}

/// Console asks for a player's containers to be printed
#[derive(Event)]
pub struct ListInventoryEvent {
    pub player: Entity,
}
