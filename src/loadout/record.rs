//! Portable loadout snapshot, in the on-disk shape shared by per-player
//! records and the `DefaultLoadout` entry of the configuration.

use serde::{Deserialize, Deserializer, Serialize};

/// Slot value meaning "let the container pick"
pub const UNSET_SLOT: i32 = -1;

/// The three player containers a loadout covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    Main,
    Belt,
    Wear,
}

impl SlotGroup {
    pub const ALL: [SlotGroup; 3] = [SlotGroup::Main, SlotGroup::Belt, SlotGroup::Wear];

    /// Slots beyond this are never captured, even when the live container is
    /// larger (bonus slots granted by equipment).
    pub const fn logical_capacity(self) -> usize {
        match self {
            SlotGroup::Main => 24,
            SlotGroup::Belt => 6,
            SlotGroup::Wear => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SlotGroup::Main => "main",
            SlotGroup::Belt => "belt",
            SlotGroup::Wear => "wear",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Some(SlotGroup::Main),
            "belt" => Some(SlotGroup::Belt),
            "wear" | "worn" => Some(SlotGroup::Wear),
            _ => None,
        }
    }
}

/// One item stack. Nested items only keep their kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Empty when the name is missing; apply skips such entries
    #[serde(rename = "ItemShortName", default)]
    pub kind: String,

    #[serde(
        rename = "Amount",
        default = "default_amount",
        skip_serializing_if = "is_default_amount"
    )]
    pub amount: i32,

    #[serde(rename = "SkinId", default, skip_serializing_if = "is_zero")]
    pub skin: u64,

    #[serde(
        rename = "Slot",
        default,
        with = "slot_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub slot: Option<usize>,

    #[serde(
        rename = "ChildItems",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub nested: Vec<String>,
}

impl ItemRecord {
    pub fn new(kind: impl Into<String>, amount: i32) -> Self {
        Self {
            kind: kind.into(),
            amount,
            skin: 0,
            slot: None,
            nested: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_skin(mut self, skin: u64) -> Self {
        self.skin = skin;
        self
    }

    #[cfg(test)]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_nested<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_valid_amount(&self) -> bool {
        self.amount > 0
    }
}

/// Snapshot of all three containers. A group is `None` when nothing was
/// captured for it, never an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutRecord {
    #[serde(
        rename = "MainItems",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_items: Option<Vec<ItemRecord>>,

    #[serde(
        rename = "BeltItems",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub belt_items: Option<Vec<ItemRecord>>,

    #[serde(
        rename = "WornItems",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub worn_items: Option<Vec<ItemRecord>>,
}

impl LoadoutRecord {
    pub fn group(&self, group: SlotGroup) -> Option<&[ItemRecord]> {
        match group {
            SlotGroup::Main => self.main_items.as_deref(),
            SlotGroup::Belt => self.belt_items.as_deref(),
            SlotGroup::Wear => self.worn_items.as_deref(),
        }
    }

    pub fn set_group(&mut self, group: SlotGroup, items: Option<Vec<ItemRecord>>) {
        let items = items.filter(|items| !items.is_empty());
        match group {
            SlotGroup::Main => self.main_items = items,
            SlotGroup::Belt => self.belt_items = items,
            SlotGroup::Wear => self.worn_items = items,
        }
    }

    pub fn is_empty(&self) -> bool {
        SlotGroup::ALL.iter().all(|&group| self.group(group).is_none())
    }

    pub fn item_count(&self) -> usize {
        SlotGroup::ALL
            .iter()
            .filter_map(|&group| self.group(group))
            .map(<[ItemRecord]>::len)
            .sum()
    }
}

fn default_amount() -> i32 {
    1
}

fn is_default_amount(amount: &i32) -> bool {
    *amount == 1
}

fn is_zero(skin: &u64) -> bool {
    *skin == 0
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Vec<ItemRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<ItemRecord>>::deserialize(deserializer)?;
    Ok(items.filter(|items| !items.is_empty()))
}

/// `Slot` is a signed integer on disk, `-1` (or any negative) meaning unset.
mod slot_index {
    use super::UNSET_SLOT;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(slot: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match slot {
            Some(index) => serializer.serialize_u64(*index as u64),
            None => serializer.serialize_i32(UNSET_SLOT),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.and_then(|index| usize::try_from(index).ok()))
    }
}
