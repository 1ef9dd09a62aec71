use bevy::prelude::*;

/// Operator-facing console line
#[derive(Event)]
pub struct LogEvent(pub String);

/// Reply addressed to a single player (chat message in a real host)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub player: Entity,
    pub text: String,
}
