//! What the capture and apply engines need from the host's live items and
//! containers. Nothing in `capture`/`apply` names a concrete host type.

use super::record::SlotGroup;

/// A live item stack
pub trait LiveItem: Sized {
    /// Sub-container type holding nested items
    type Contents: Container<Item = Self>;

    fn kind(&self) -> &str;
    fn amount(&self) -> i32;
    fn skin(&self) -> u64;
    fn position(&self) -> Option<usize>;
    fn set_position(&mut self, position: Option<usize>);
    fn contents(&self) -> Option<&Self::Contents>;
    fn contents_mut(&mut self) -> Option<&mut Self::Contents>;

    /// Fills the primary magazine to capacity with the ammo it is already
    /// configured for. Returns `false` when the item has no magazine.
    fn refill_magazine(&mut self) -> bool;
}

/// Slot-addressed storage
pub trait Container {
    type Item: LiveItem;

    fn capacity(&self) -> usize;
    fn slot(&self, index: usize) -> Option<&Self::Item>;

    /// Moves `item` in, preferring `position`. On failure the item is handed
    /// back; dropping it is the host's "remove".
    fn move_into(&mut self, item: Self::Item, position: Option<usize>) -> Result<usize, Self::Item>;
}

/// The three containers of one player
pub trait ContainerSet {
    type Container: Container;

    fn container(&self, group: SlotGroup) -> &Self::Container;
    fn container_mut(&mut self, group: SlotGroup) -> &mut Self::Container;
}

/// Creates live items by kind; `None` for kinds the host does not know
pub trait ItemFactory {
    type Item: LiveItem;

    fn create(&self, kind: &str, amount: i32, skin: u64) -> Option<Self::Item>;
}
