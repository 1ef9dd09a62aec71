use serde_json::{Map, Value};

/// Brings `persisted` up to date with `defaults`, returning whether anything changed.
///
/// Keys missing from `persisted` are copied over with their whole subtree.
/// Where the default is an object but the persisted value is not, the
/// persisted value is replaced. Existing leaves are never touched, and keys
/// that only exist in `persisted` are left alone.
pub fn reconcile(defaults: &Map<String, Value>, persisted: &mut Map<String, Value>) -> bool {
    let mut changed = false;

    for (key, default_value) in defaults {
        let Some(current) = persisted.get_mut(key) else {
            persisted.insert(key.clone(), default_value.clone());
            changed = true;
            continue;
        };

        let Value::Object(default_tree) = default_value else {
            continue;
        };

        match current {
            Value::Object(current_tree) => changed |= reconcile(default_tree, current_tree),
            other => {
                *other = default_value.clone();
                changed = true;
            }
        }
    }

    changed
}
