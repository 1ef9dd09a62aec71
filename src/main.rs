use anyhow::Context;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;

mod character;
mod config;
mod core;
mod data;
mod interface;
mod inventory;
mod loadout;

use crate::core::{CorePlugin, events, states};
use character::CharacterPlugin;
use config::{CONFIG_FILE_NAME, ConfigPlugin};
use interface::debug_cli::DebugCliPlugin;
use inventory::InventoryPlugin;
use loadout::LoadoutPlugin;

/// Server data root; overridable for running several instances side by side
const HOME_VAR: &str = "SPAWN_LOADOUTS_HOME";

struct ServerPaths {
    config_file: PathBuf,
    data_dir: PathBuf,
}

fn prepare_paths() -> anyhow::Result<ServerPaths> {
    let root = std::env::var_os(HOME_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("server_data"));
    let config_dir = root.join("config");
    let data_dir = root.join("data");
    for dir in [&config_dir, &data_dir] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    Ok(ServerPaths {
        config_file: config_dir.join(CONFIG_FILE_NAME),
        data_dir,
    })
}

fn main() -> anyhow::Result<()> {
    let paths = prepare_paths()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }), // hidden window: console-only server
            ..default()
        }))
        .add_plugins(CorePlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(ConfigPlugin {
            path: paths.config_file,
        })
        .add_plugins(CharacterPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(LoadoutPlugin {
            data_dir: paths.data_dir,
        })
        .add_plugins(DebugCliPlugin)
        .add_systems(Update, (forward_log_event, forward_chat_replies))
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();

    Ok(())
}

fn forward_log_event(mut reader: EventReader<events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}

fn forward_chat_replies(
    mut reader: EventReader<events::ChatReply>,
    players: Query<&character::components::Player>,
) {
    for reply in reader.read() {
        let name = players
            .get(reply.player)
            .map_or("?", |player| player.name.as_str());
        println!("[{name}] {}", reply.text);
    }
}
