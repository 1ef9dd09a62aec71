//! The `loadout` chat command: `save`, `setdefault`, `reset`.

use bevy::prelude::*;

use super::capture::capture;
use super::store::LoadoutStore;
use crate::character::components::Player;
use crate::config::LoadoutConfig;
use crate::core::events::ChatReply;
use crate::core::lang::{Message, Messages};
use crate::core::permissions::{PERMISSION_SAVE, PERMISSION_SET_DEFAULT, Permissions};
use crate::inventory::components::PlayerInventory;

/// `loadout <args…>` issued by a player
#[derive(Event, Debug, Clone)]
pub struct LoadoutCommand {
    pub player: Entity,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadoutAction {
    Save,
    SetDefault,
    Reset,
}

impl LoadoutAction {
    pub fn parse(args: &[String]) -> Option<Self> {
        match args.first()?.to_lowercase().as_str() {
            "save" => Some(Self::Save),
            "setdefault" => Some(Self::SetDefault),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub const fn required_permission(self) -> &'static str {
        match self {
            Self::Save | Self::Reset => PERMISSION_SAVE,
            Self::SetDefault => PERMISSION_SET_DEFAULT,
        }
    }
}

pub fn handle_loadout_commands(
    mut ev_command: EventReader<LoadoutCommand>,
    mut ev_reply: EventWriter<ChatReply>,
    players: Query<(&Player, &PlayerInventory)>,
    permissions: Res<Permissions>,
    store: Res<LoadoutStore>,
    mut config: ResMut<LoadoutConfig>,
    messages: Res<Messages>,
) {
    for ev in ev_command.read() {
        let Ok((player, inventory)) = players.get(ev.player) else {
            continue;
        };

        let message = match LoadoutAction::parse(&ev.args) {
            None => Message::Syntax,
            Some(action) if !permissions.has(&player.id, action.required_permission()) => {
                Message::NoPermission
            }
            Some(action) => execute(action, player, inventory, &store, &mut config),
        };

        ev_reply.write(ChatReply {
            player: ev.player,
            text: messages.get(message, &player.language).to_owned(),
        });
    }
}

fn execute(
    action: LoadoutAction,
    player: &Player,
    inventory: &PlayerInventory,
    store: &LoadoutStore,
    config: &mut LoadoutConfig,
) -> Message {
    match action {
        LoadoutAction::Save => {
            let record = capture(inventory, &config.configuration.disallowed_items);
            match store.save(&player.id, record.as_ref()) {
                Ok(()) => {
                    info!(
                        "{} saved a loadout with {} items",
                        player.name,
                        record.as_ref().map_or(0, |r| r.item_count())
                    );
                    Message::SaveSuccess
                }
                Err(e) => {
                    error!("{e}");
                    Message::SaveFailed
                }
            }
        }
        LoadoutAction::SetDefault => {
            config.configuration.default_loadout =
                capture(inventory, &config.configuration.disallowed_items);
            match config.save() {
                Ok(()) => {
                    info!("{} replaced the default loadout", player.name);
                    Message::SetDefaultSuccess
                }
                Err(e) => {
                    error!("Could not save configuration: {e}");
                    Message::SaveFailed
                }
            }
        }
        LoadoutAction::Reset => match store.save(&player.id, None) {
            Ok(()) => {
                info!("{} reset their loadout", player.name);
                Message::ResetSuccess
            }
            Err(e) => {
                error!("{e}");
                Message::SaveFailed
            }
        },
    }
}
