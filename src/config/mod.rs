pub mod reconcile;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::loadout::record::{ItemRecord, LoadoutRecord};
use crate::loadout::store::write_json;
use reconcile::reconcile;

pub const CONFIG_FILE_NAME: &str = "SpawnLoadouts.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top level must be a JSON object")]
    Shape,
}

/// Operator configuration as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Given to players who never saved their own loadout
    #[serde(rename = "DefaultLoadout")]
    pub default_loadout: Option<LoadoutRecord>,

    /// Kinds left out of every capture
    #[serde(rename = "DisallowedItems")]
    pub disallowed_items: Vec<String>,

    /// Keys this version does not know about, kept so saving never drops them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_loadout: Some(LoadoutRecord {
                main_items: Some(vec![
                    ItemRecord::new("ammo.rifle", 74).with_nested(["weapon.mod.holosight"]),
                ]),
                belt_items: Some(vec![ItemRecord::new("rifle.ak", 1)]),
                worn_items: Some(vec![
                    ItemRecord::new("roadsign.gloves", 1),
                    ItemRecord::new("roadsign.kilt", 1),
                    ItemRecord::new("metal.facemask", 1),
                ]),
            }),
            disallowed_items: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// How the configuration came to be in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file yet; defaults were written out
    Created,
    Loaded,
    /// Older schema; new keys were merged in and the file rewritten
    Updated,
    /// Unreadable file; defaults in use, file left as it was
    Invalid,
}

/// Loaded configuration plus where it lives
#[derive(Resource, Debug, Clone)]
pub struct LoadoutConfig {
    pub configuration: Configuration,
    pub source: ConfigSource,
    path: PathBuf,
}

enum ReadOutcome {
    Missing,
    Found {
        configuration: Configuration,
        raw: Map<String, Value>,
        changed: bool,
    },
}

impl LoadoutConfig {
    #[cfg(test)]
    pub fn new(configuration: Configuration, path: impl Into<PathBuf>) -> Self {
        Self {
            configuration,
            source: ConfigSource::Loaded,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads, migrates and if needed rewrites the file. Never fails: every
    /// problem ends in the compiled defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (configuration, source) = match read_and_reconcile(&path) {
            Ok(ReadOutcome::Missing) => {
                info!("No configuration at {}; writing defaults", path.display());
                (Configuration::default(), ConfigSource::Created)
            }
            Ok(ReadOutcome::Found {
                configuration,
                raw,
                changed: true,
            }) => {
                warn!("Configuration appears to be outdated; updating and saving");
                if let Err(e) = write_tree(&path, &raw) {
                    error!("Could not write {}: {e}", path.display());
                }
                (configuration, ConfigSource::Updated)
            }
            Ok(ReadOutcome::Found { configuration, .. }) => (configuration, ConfigSource::Loaded),
            Err(e) => {
                warn!(
                    "Configuration file {} is invalid; using defaults ({e})",
                    path.display()
                );
                (Configuration::default(), ConfigSource::Invalid)
            }
        };

        let config = Self {
            configuration,
            source,
            path,
        };
        if source == ConfigSource::Created {
            if let Err(e) = config.save() {
                error!("Could not write {}: {e}", config.path.display());
            }
        }
        config
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        write_json(&self.path, &self.configuration)?;
        info!("Configuration changes saved to {}", self.path.display());
        Ok(())
    }
}

fn read_and_reconcile(path: &Path) -> Result<ReadOutcome, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
        Err(e) => return Err(e.into()),
    };

    let Value::Object(mut raw) = serde_json::from_str::<Value>(&text)? else {
        return Err(ConfigError::Shape);
    };
    let configuration: Configuration = serde_json::from_value(Value::Object(raw.clone()))?;

    // serde already filled in missing fields, so the typed value is the
    // current schema with the operator's values on top
    let Value::Object(defaults) = serde_json::to_value(&configuration)? else {
        return Err(ConfigError::Shape);
    };
    let changed = reconcile(&defaults, &mut raw);

    Ok(ReadOutcome::Found {
        configuration,
        raw,
        changed,
    })
}

fn write_tree(path: &Path, tree: &Map<String, Value>) -> Result<(), ConfigError> {
    write_json(path, tree)?;
    info!("Configuration changes saved to {}", path.display());
    Ok(())
}

/// Loads the configuration once at build time
pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LoadoutConfig::load(&self.path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn read_back(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn compiled_defaults_match_wire_shape() {
        let value = serde_json::to_value(Configuration::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "DefaultLoadout": {
                    "MainItems": [{
                        "ItemShortName": "ammo.rifle",
                        "Amount": 74,
                        "ChildItems": ["weapon.mod.holosight"],
                    }],
                    "BeltItems": [{ "ItemShortName": "rifle.ak" }],
                    "WornItems": [
                        { "ItemShortName": "roadsign.gloves" },
                        { "ItemShortName": "roadsign.kilt" },
                        { "ItemShortName": "metal.facemask" },
                    ],
                },
                "DisallowedItems": [],
            })
        );
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join(CONFIG_FILE_NAME);

        let config = LoadoutConfig::load(&path);
        assert_eq!(config.source, ConfigSource::Created);
        assert_eq!(config.configuration, Configuration::default());
        assert_eq!(
            read_back(&path),
            serde_json::to_value(Configuration::default()).unwrap()
        );
    }

    #[test]
    fn current_file_loads_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        let text = serde_json::to_string_pretty(&Configuration::default()).unwrap();
        fs::write(&path, &text).unwrap();

        let config = LoadoutConfig::load(&path);
        assert_eq!(config.source, ConfigSource::Loaded);
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn outdated_file_gains_new_keys_and_keeps_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "DefaultLoadout": { "BeltItems": [{ "ItemShortName": "bow.hunting" }] }, "Legacy": 1 }"#,
        )
        .unwrap();

        let config = LoadoutConfig::load(&path);
        assert_eq!(config.source, ConfigSource::Updated);
        assert!(config.configuration.disallowed_items.is_empty());
        assert_eq!(
            config.configuration.default_loadout.as_ref().unwrap().belt_items,
            Some(vec![ItemRecord::new("bow.hunting", 1)])
        );

        let on_disk = read_back(&path);
        assert_eq!(on_disk["DisallowedItems"], json!([]));
        assert_eq!(on_disk["Legacy"], json!(1));
        assert_eq!(
            on_disk["DefaultLoadout"],
            json!({ "BeltItems": [{ "ItemShortName": "bow.hunting" }] })
        );

        // a second start finds nothing left to migrate
        assert_eq!(LoadoutConfig::load(&path).source, ConfigSource::Loaded);
    }

    #[test]
    fn null_default_loadout_is_an_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "DefaultLoadout": null, "DisallowedItems": ["wood"] }"#).unwrap();

        let config = LoadoutConfig::load(&path);
        assert_eq!(config.source, ConfigSource::Loaded);
        assert_eq!(config.configuration.default_loadout, None);
        assert_eq!(config.configuration.disallowed_items, vec!["wood"]);
    }

    #[test]
    fn invalid_file_falls_back_without_overwriting() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        for body in ["{ broken", "[1, 2]", r#"{ "DisallowedItems": 5 }"#] {
            fs::write(&path, body).unwrap();
            let config = LoadoutConfig::load(&path);
            assert_eq!(config.source, ConfigSource::Invalid, "{body}");
            assert_eq!(config.configuration, Configuration::default());
            assert_eq!(fs::read_to_string(&path).unwrap(), body);
        }
    }

    #[test]
    fn save_keeps_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "DefaultLoadout": null, "DisallowedItems": [], "Notes": "keep me" }"#,
        )
        .unwrap();

        let mut config = LoadoutConfig::load(&path);
        config.configuration.disallowed_items.push("explosive.timed".into());
        config.save().unwrap();

        let on_disk = read_back(&path);
        assert_eq!(on_disk["Notes"], json!("keep me"));
        assert_eq!(on_disk["DisallowedItems"], json!(["explosive.timed"]));
    }
}
