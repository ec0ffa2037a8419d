use dreamroom_common::{ItemKind, ItemSet};
use serde::{Deserialize, Serialize};

/// Result of an [`Inventory::equip`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    /// The item is now in hand; `replaced` is whatever was put away to make room.
    Equipped {
        item: ItemKind,
        replaced: Option<ItemKind>,
    },
    /// The item was already in hand and has been put away.
    Unequipped(ItemKind),
    /// The item is not possessed. Nothing changed.
    Ignored,
}

/// The items the player carries and the one in hand.
///
/// Invariant: the equipped item, if any, is always possessed. Invalid
/// requests leave the inventory untouched instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    possessed: ItemSet,
    equipped: Option<ItemKind>,
}

impl Inventory {
    /// An empty inventory, as at game start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns true only the first time it is collected.
    pub fn collect(&mut self, item: ItemKind) -> bool {
        self.possessed.insert(item)
    }

    /// Equip a possessed item, toggling it off if it is already in hand.
    pub fn equip(&mut self, item: ItemKind) -> EquipOutcome {
        if !self.possessed.contains(item) {
            return EquipOutcome::Ignored;
        }
        if self.equipped == Some(item) {
            self.equipped = None;
            return EquipOutcome::Unequipped(item);
        }
        let replaced = self.equipped.replace(item);
        EquipOutcome::Equipped { item, replaced }
    }

    /// Put away the item in hand. Returns it, or `None` if the hand was empty.
    pub fn unequip(&mut self) -> Option<ItemKind> {
        self.equipped.take()
    }

    pub fn has_item(&self, item: ItemKind) -> bool {
        self.possessed.contains(item)
    }

    pub fn equipped(&self) -> Option<ItemKind> {
        self.equipped
    }

    pub fn is_equipped(&self, item: ItemKind) -> bool {
        self.equipped == Some(item)
    }

    pub fn possessed(&self) -> ItemSet {
        self.possessed
    }

    /// Detached copy for rendering. Later mutations do not show through it.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            possessed: self.possessed.iter().collect(),
            equipped: self.equipped,
        }
    }
}

/// Read-only copy of an [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Possessed items in display order.
    pub possessed: Vec<ItemKind>,
    pub equipped: Option<ItemKind>,
}

impl InventorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.possessed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_items(items: &[ItemKind]) -> Inventory {
        let mut inv = Inventory::new();
        for item in items {
            inv.collect(*item);
        }
        inv
    }

    #[test]
    fn starts_empty() {
        let inv = Inventory::new();
        for item in ItemKind::ALL {
            assert!(!inv.has_item(item));
        }
        assert_eq!(inv.equipped(), None);
    }

    #[test]
    fn collect_is_idempotent() {
        for item in ItemKind::ALL {
            let mut once = Inventory::new();
            assert!(once.collect(item));

            let mut twice = Inventory::new();
            assert!(twice.collect(item));
            assert!(!twice.collect(item));

            assert_eq!(once, twice);
        }
    }

    #[test]
    fn equip_unpossessed_is_ignored() {
        for item in ItemKind::ALL {
            let mut inv = with_items(&[]);
            assert_eq!(inv.equip(item), EquipOutcome::Ignored);
            assert_eq!(inv.equipped(), None);
        }

        let mut inv = with_items(&[ItemKind::Flashlight]);
        inv.equip(ItemKind::Flashlight);
        assert_eq!(inv.equip(ItemKind::Lever), EquipOutcome::Ignored);
        assert_eq!(inv.equipped(), Some(ItemKind::Flashlight));
    }

    #[test]
    fn equip_twice_toggles_off() {
        let mut inv = with_items(&[ItemKind::Key]);
        assert_eq!(
            inv.equip(ItemKind::Key),
            EquipOutcome::Equipped {
                item: ItemKind::Key,
                replaced: None
            }
        );
        assert_eq!(inv.equip(ItemKind::Key), EquipOutcome::Unequipped(ItemKind::Key));
        assert_eq!(inv.equipped(), None);
        assert!(inv.has_item(ItemKind::Key));
    }

    #[test]
    fn equip_other_replaces() {
        let mut inv = with_items(&[ItemKind::Key, ItemKind::Lever]);
        inv.equip(ItemKind::Key);
        assert_eq!(
            inv.equip(ItemKind::Lever),
            EquipOutcome::Equipped {
                item: ItemKind::Lever,
                replaced: Some(ItemKind::Key)
            }
        );
        assert_eq!(inv.equipped(), Some(ItemKind::Lever));
        assert!(!inv.is_equipped(ItemKind::Key));
    }

    #[test]
    fn unequip_empty_hand_is_noop() {
        let mut inv = with_items(&[ItemKind::Key]);
        assert_eq!(inv.unequip(), None);
        inv.equip(ItemKind::Key);
        assert_eq!(inv.unequip(), Some(ItemKind::Key));
        assert_eq!(inv.unequip(), None);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut inv = with_items(&[ItemKind::Lever, ItemKind::Key]);
        inv.equip(ItemKind::Key);
        let snap = inv.snapshot();
        inv.unequip();
        inv.collect(ItemKind::Flashlight);

        assert_eq!(snap.possessed, vec![ItemKind::Key, ItemKind::Lever]);
        assert_eq!(snap.equipped, Some(ItemKind::Key));
        assert!(!snap.possessed.contains(&ItemKind::Flashlight));
    }

    #[test]
    fn key_scenario() {
        let mut inv = Inventory::new();
        inv.collect(ItemKind::Key);
        assert!(inv.has_item(ItemKind::Key));
        inv.equip(ItemKind::Key);
        assert_eq!(inv.equipped(), Some(ItemKind::Key));
        inv.equip(ItemKind::Key);
        assert_eq!(inv.equipped(), None);
    }
}
