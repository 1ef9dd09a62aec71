use bevy::prelude::*;
use uuid::Uuid;

use crate::core::lang::DEFAULT_LANGUAGE;

/// Connected player. `id` keys persisted records and permission grants.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub language: String,
}

impl Player {
    /// Player whose identity is derived from the display name
    pub fn from_name(name: &str) -> Self {
        Self {
            id: identity_for(name).to_string(),
            name: name.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// Stable v5 UUID for a display name, so a rejoining name maps to the same record
pub fn identity_for(name: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.to_lowercase().as_bytes())
}

#[derive(Component, Debug, Clone)]
pub struct Vitals {
    pub hp: i32,
    pub max_hp: i32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self { hp: 100, max_hp: 100 }
    }
}

impl Vitals {
    /// Returns whether the hit was fatal
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.hp = (self.hp - damage).max(0);
        self.is_dead()
    }

    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}
