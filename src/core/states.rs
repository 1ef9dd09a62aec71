use bevy::prelude::*;

/// Top-level lifecycle of the server process
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    /// Waiting for the item catalog asset
    Loading,
    InGame,
}
