use bevy::asset::Asset;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Broad item class; containers filter on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Ammunition,
    Attire,
    Attachment,
    Resource,
    Tool,
    Medical,
}

/// Sub-container an item carries (weapon attachment slots and the like)
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsDef {
    pub slots: usize,
    /// Empty means the sub-container takes anything
    #[serde(default)]
    pub accepts: Vec<ItemCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MagazineDef {
    pub capacity: u32,
    pub ammo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub shortname: String,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub contents: Option<ContentsDef>,
    #[serde(default)]
    pub magazine: Option<MagazineDef>,
}

/// Raw asset as it sits on disk
#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemDef>,
}

/// Item table problems caught before the catalog is published
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate shortname {0}")]
    Duplicate(String),
    #[error("{item} loads ammo {ammo}, which is not in the table")]
    UnknownAmmo { item: String, ammo: String },
    #[error("{0} declares a sub-container without slots")]
    EmptyContents(String),
}

impl ItemList {
    /// Shortnames are unique, magazine ammo exists, sub-containers have slots
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for def in &self.items {
            if !seen.insert(def.shortname.as_str()) {
                return Err(CatalogError::Duplicate(def.shortname.clone()));
            }
            if def.contents.as_ref().is_some_and(|c| c.slots == 0) {
                return Err(CatalogError::EmptyContents(def.shortname.clone()));
            }
        }
        for def in &self.items {
            if let Some(mag) = &def.magazine {
                if !seen.contains(mag.ammo.as_str()) {
                    return Err(CatalogError::UnknownAmmo {
                        item: def.shortname.clone(),
                        ammo: mag.ammo.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Item definitions indexed by shortname, inserted once the asset has loaded
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    defs: HashMap<String, ItemDef>,
}

impl ItemCatalog {
    pub fn from_defs(defs: impl IntoIterator<Item = ItemDef>) -> Self {
        Self {
            defs: defs
                .into_iter()
                .map(|def| (def.shortname.clone(), def))
                .collect(),
        }
    }

    pub fn get(&self, shortname: &str) -> Option<&ItemDef> {
        self.defs.get(shortname)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Definitions sorted by shortname
    pub fn sorted(&self) -> Vec<&ItemDef> {
        let mut defs: Vec<_> = self.defs.values().collect();
        defs.sort_by(|a, b| a.shortname.cmp(&b.shortname));
        defs
    }
}

impl From<&ItemList> for ItemCatalog {
    fn from(list: &ItemList) -> Self {
        Self::from_defs(list.items.iter().cloned())
    }
}

/// Catalog built from the shipped item table, for tests
#[cfg(test)]
pub(crate) fn test_catalog() -> ItemCatalog {
    let list: ItemList = toml::from_str(include_str!("../../assets/data/items.toml"))
        .expect("shipped item table parses");
    list.validate().expect("shipped item table is consistent");
    ItemCatalog::from(&list)
}
