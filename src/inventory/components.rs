use bevy::prelude::*;

use crate::data::schema::{ItemCatalog, ItemCategory, ItemDef};
use crate::loadout::host::{Container, ContainerSet, ItemFactory, LiveItem};
use crate::loadout::record::SlotGroup;

/// Primary magazine of a ranged weapon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    pub capacity: u32,
    pub contents: u32,
    pub ammo: String,
}

/// Runtime item instance
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: String,
    pub category: ItemCategory,
    pub amount: i32,
    pub skin: u64,
    pub position: Option<usize>,
    pub contents: Option<ItemContainer>,
    pub magazine: Option<Magazine>,
}

impl Item {
    /// Fresh stack from a definition; weapons come with an empty magazine
    pub fn from_def(def: &ItemDef, amount: i32, skin: u64) -> Self {
        Self {
            kind: def.shortname.clone(),
            category: def.category,
            amount,
            skin,
            position: None,
            contents: def
                .contents
                .as_ref()
                .map(|c| ItemContainer::with_filter(c.slots, c.accepts.clone())),
            magazine: def.magazine.as_ref().map(|m| Magazine {
                capacity: m.capacity,
                contents: 0,
                ammo: m.ammo.clone(),
            }),
        }
    }
}

/// Fixed-capacity container; empty slots are `None`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemContainer {
    slots: Vec<Option<Item>>,
    /// Empty means anything goes
    accepts: Vec<ItemCategory>,
}

impl ItemContainer {
    pub fn new(capacity: usize) -> Self {
        Self::with_filter(capacity, Vec::new())
    }

    pub fn with_filter(capacity: usize, accepts: Vec<ItemCategory>) -> Self {
        Self {
            slots: vec![None; capacity],
            accepts,
        }
    }

    pub fn accepts(&self, category: ItemCategory) -> bool {
        self.accepts.is_empty() || self.accepts.contains(&category)
    }

    /// Occupied slots in slot order
    pub fn items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|item| (idx, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

impl Container for ItemContainer {
    type Item = Item;

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn move_into(&mut self, mut item: Item, position: Option<usize>) -> Result<usize, Item> {
        if !self.accepts(item.category) {
            return Err(item);
        }

        // requested slot if free, otherwise the first free one
        let target = position
            .filter(|&p| matches!(self.slots.get(p), Some(None)))
            .or_else(|| self.first_free());

        match target {
            Some(index) => {
                item.position = Some(index);
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }
}

impl LiveItem for Item {
    type Contents = ItemContainer;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn amount(&self) -> i32 {
        self.amount
    }

    fn skin(&self) -> u64 {
        self.skin
    }

    fn position(&self) -> Option<usize> {
        self.position
    }

    fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }

    fn contents(&self) -> Option<&ItemContainer> {
        self.contents.as_ref()
    }

    fn contents_mut(&mut self) -> Option<&mut ItemContainer> {
        self.contents.as_mut()
    }

    fn refill_magazine(&mut self) -> bool {
        match self.magazine.as_mut() {
            Some(mag) => {
                mag.contents = mag.capacity;
                true
            }
            None => false,
        }
    }
}

impl ItemFactory for ItemCatalog {
    type Item = Item;

    fn create(&self, kind: &str, amount: i32, skin: u64) -> Option<Item> {
        self.get(kind).map(|def| Item::from_def(def, amount, skin))
    }
}

pub const MAIN_CAPACITY: usize = 24;
pub const BELT_CAPACITY: usize = 6;
/// Seven regular clothing slots plus one bonus slot
pub const WEAR_CAPACITY: usize = 8;

/// The player's three containers
#[derive(Component, Debug, Clone)]
pub struct PlayerInventory {
    pub main: ItemContainer,
    pub belt: ItemContainer,
    pub wear: ItemContainer,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            main: ItemContainer::new(MAIN_CAPACITY),
            belt: ItemContainer::new(BELT_CAPACITY),
            wear: ItemContainer::with_filter(WEAR_CAPACITY, vec![ItemCategory::Attire]),
        }
    }
}

impl PlayerInventory {
    /// Empties every container
    pub fn strip(&mut self) {
        self.main.clear();
        self.belt.clear();
        self.wear.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.belt.is_empty() && self.wear.is_empty()
    }
}

impl ContainerSet for PlayerInventory {
    type Container = ItemContainer;

    fn container(&self, group: SlotGroup) -> &ItemContainer {
        match group {
            SlotGroup::Main => &self.main,
            SlotGroup::Belt => &self.belt,
            SlotGroup::Wear => &self.wear,
        }
    }

    fn container_mut(&mut self, group: SlotGroup) -> &mut ItemContainer {
        match group {
            SlotGroup::Main => &mut self.main,
            SlotGroup::Belt => &mut self.belt,
            SlotGroup::Wear => &mut self.wear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::test_catalog;

    #[test]
    fn move_into_prefers_requested_slot() {
        let catalog = test_catalog();
        let mut belt = ItemContainer::new(BELT_CAPACITY);
        let wood = catalog.create("wood", 100, 0).unwrap();
        assert_eq!(belt.move_into(wood, Some(4)), Ok(4));
        assert_eq!(belt.slot(4).unwrap().position, Some(4));
    }

    #[test]
    fn move_into_falls_back_to_first_free_slot() {
        let catalog = test_catalog();
        let mut belt = ItemContainer::new(2);
        belt.move_into(catalog.create("wood", 1, 0).unwrap(), Some(0)).unwrap();
        assert_eq!(belt.move_into(catalog.create("stones", 1, 0).unwrap(), Some(0)), Ok(1));

        let rejected = belt.move_into(catalog.create("bandage", 1, 0).unwrap(), None);
        assert_eq!(rejected.unwrap_err().kind, "bandage");
    }

    #[test]
    fn worn_container_refuses_non_attire() {
        let catalog = test_catalog();
        let mut inventory = PlayerInventory::default();
        let rifle = catalog.create("rifle.ak", 1, 0).unwrap();
        assert!(inventory.wear.move_into(rifle, None).is_err());
        let hoodie = catalog.create("hoodie", 1, 0).unwrap();
        assert!(inventory.wear.move_into(hoodie, None).is_ok());
    }

    #[test]
    fn refill_only_touches_weapons_with_magazines() {
        let catalog = test_catalog();
        let mut rifle = catalog.create("rifle.ak", 1, 0).unwrap();
        assert_eq!(rifle.magazine.as_ref().unwrap().contents, 0);
        assert!(rifle.refill_magazine());
        let mag = rifle.magazine.as_ref().unwrap();
        assert_eq!((mag.contents, mag.ammo.as_str()), (30, "ammo.rifle"));

        let mut bow = catalog.create("bow.hunting", 1, 0).unwrap();
        assert!(!bow.refill_magazine());
    }

    #[test]
    fn strip_empties_everything() {
        let catalog = test_catalog();
        let mut inventory = PlayerInventory::default();
        inventory.main.move_into(catalog.create("wood", 5, 0).unwrap(), None).unwrap();
        inventory.wear.move_into(catalog.create("hoodie", 1, 0).unwrap(), None).unwrap();
        inventory.strip();
        assert!(inventory.is_empty());
        assert_eq!(inventory.wear.capacity(), WEAR_CAPACITY);
    }
}
