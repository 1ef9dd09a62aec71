pub mod apply;
pub mod capture;
pub mod commands;
pub mod host;
pub mod record;
pub mod store;
pub mod systems;

use crate::character::systems::{handle_respawn, spawn_player};
use crate::core::states::AppState;
use bevy::ecs::schedule::Condition;
use bevy::prelude::*;
use commands::*;
use std::path::PathBuf;
use store::LoadoutStore;
use systems::*;

/// Spawn/respawn restoration and the `loadout` command
pub struct LoadoutPlugin {
    /// Root for per-player records
    pub data_dir: PathBuf,
}

impl Plugin for LoadoutPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LoadoutStore::new(&self.data_dir))
            .init_resource::<PendingLoadouts>()
            .add_event::<LoadoutCommand>()
            .add_systems(Startup, register_permissions);
        add_loadout_systems(app, in_state(AppState::InGame));
    }
}

/// Flushing runs before queueing, so a spawn waits exactly one tick. Spawn
/// and respawn events are read in the frame the character systems send them.
fn add_loadout_systems<M>(app: &mut App, condition: impl Condition<M>) {
    app.add_systems(
        Update,
        (
            flush_pending_loadouts,
            queue_spawn_loadouts.after(spawn_player),
            give_on_respawn.after(handle_respawn),
            handle_loadout_commands,
        )
            .chain()
            .run_if(condition),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::character::components::{Player, Vitals};
    use crate::character::events::{JoinRequest, PlayerRespawned, PlayerSpawned, RespawnRequest};
    use crate::config::{CONFIG_FILE_NAME, Configuration, LoadoutConfig};
    use crate::core::events::{ChatReply, LogEvent};
    use crate::core::lang::Messages;
    use crate::core::permissions::Permissions;
    use crate::data::schema::test_catalog;
    use crate::inventory::components::PlayerInventory;
    use bevy::ecs::event::Events;
    use tempfile::TempDir;

    /// Bare app running the character and loadout systems without the state gate
    pub fn test_app(configuration: Configuration) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut app = App::new();
        app.add_event::<JoinRequest>()
            .add_event::<RespawnRequest>()
            .add_event::<LogEvent>()
            .add_event::<PlayerSpawned>()
            .add_event::<PlayerRespawned>()
            .add_event::<LoadoutCommand>()
            .add_event::<ChatReply>()
            .insert_resource(LoadoutStore::new(dir.path()))
            .insert_resource(LoadoutConfig::new(
                configuration,
                dir.path().join(CONFIG_FILE_NAME),
            ))
            .insert_resource(test_catalog())
            .init_resource::<Permissions>()
            .init_resource::<Messages>()
            .init_resource::<PendingLoadouts>()
            .add_systems(Startup, register_permissions)
            .add_systems(Update, (spawn_player, handle_respawn));
        add_loadout_systems(&mut app, || true);
        // run Startup so permissions are registered
        app.update();
        (app, dir)
    }

    /// Spawns a living player holding `grants`
    pub fn join(app: &mut App, name: &str, grants: &[&str]) -> Entity {
        let player = Player::from_name(name);
        {
            let mut permissions = app.world_mut().resource_mut::<Permissions>();
            for grant in grants {
                assert!(permissions.grant(&player.id, grant));
            }
        }
        app.world_mut()
            .spawn((player, Vitals::default(), PlayerInventory::default()))
            .id()
    }

    /// Reply texts still buffered
    pub fn replies(app: &App) -> Vec<String> {
        let events = app.world().resource::<Events<ChatReply>>();
        events
            .get_cursor()
            .read(events)
            .map(|reply| reply.text.clone())
            .collect()
    }
}
