use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

pub const PERMISSION_SAVE: &str = "spawnloadouts.save";
pub const PERMISSION_SET_DEFAULT: &str = "spawnloadouts.setdefault";
pub const PERMISSION_GET_LOADOUT: &str = "spawnloadouts.getloadout";

/// Capability grants per player identity
#[derive(Resource, Debug, Default)]
pub struct Permissions {
    registered: HashSet<String>,
    grants: HashMap<String, HashSet<String>>,
}

impl Permissions {
    pub fn register(&mut self, permission: &str) {
        self.registered.insert(permission.to_owned());
    }

    pub fn is_registered(&self, permission: &str) -> bool {
        self.registered.contains(permission)
    }

    /// Returns `false` for permissions nobody registered
    pub fn grant(&mut self, identity: &str, permission: &str) -> bool {
        if !self.is_registered(permission) {
            return false;
        }
        self.grants
            .entry(identity.to_owned())
            .or_default()
            .insert(permission.to_owned());
        true
    }

    pub fn revoke(&mut self, identity: &str, permission: &str) -> bool {
        self.grants
            .get_mut(identity)
            .is_some_and(|set| set.remove(permission))
    }

    pub fn has(&self, identity: &str, permission: &str) -> bool {
        self.grants
            .get(identity)
            .is_some_and(|set| set.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_registered_permissions_can_be_granted() {
        let mut perms = Permissions::default();
        assert!(!perms.grant("alice", PERMISSION_SAVE));
        assert!(!perms.has("alice", PERMISSION_SAVE));

        perms.register(PERMISSION_SAVE);
        assert!(perms.grant("alice", PERMISSION_SAVE));
        assert!(perms.has("alice", PERMISSION_SAVE));
        assert!(!perms.has("bob", PERMISSION_SAVE));

        assert!(perms.revoke("alice", PERMISSION_SAVE));
        assert!(!perms.has("alice", PERMISSION_SAVE));
        assert!(!perms.revoke("alice", PERMISSION_SAVE));
    }
}
