use bevy::prelude::*;

pub mod events;
pub mod lang;
pub mod permissions;
pub mod states;

/// Core plugin: global state, permissions, reply templates and the shared console/reply events
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        app.init_state::<AppState>()
            .init_resource::<permissions::Permissions>()
            .init_resource::<lang::Messages>()
            .add_event::<events::LogEvent>()
            .add_event::<events::ChatReply>();
    }
}
