use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.0.to_string())
    }
}

/// A collectible item. The set is closed: nothing else can be carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Flashlight,
    Key,
    Lever,
}

impl ItemKind {
    /// Every item, in inventory display order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Flashlight, ItemKind::Key, ItemKind::Lever];

    /// Stable lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Flashlight => "flashlight",
            Self::Key => "key",
            Self::Lever => "lever",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|item| item.name().eq_ignore_ascii_case(name))
    }

    /// Bit used by compact item sets.
    pub(crate) fn bit(self) -> u8 {
        match self {
            Self::Flashlight => 0b001,
            Self::Key => 0b010,
            Self::Lever => 0b100,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Membership-only set of items, no quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSet(u8);

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item. Returns true if it was not already present.
    pub fn insert(&mut self, item: ItemKind) -> bool {
        let fresh = !self.contains(item);
        self.0 |= item.bit();
        fresh
    }

    pub fn contains(&self, item: ItemKind) -> bool {
        self.0 & item.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in [`ItemKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = ItemKind> + '_ {
        ItemKind::ALL.into_iter().filter(|item| self.contains(*item))
    }

    /// Raw bitmask, used for state hashing.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// One of the three rotatable paintings of the rotation puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Painting {
    First,
    Second,
    Third,
}

impl Painting {
    pub const ALL: [Painting; 3] = [Painting::First, Painting::Second, Painting::Third];

    /// Zero-based index into per-painting arrays.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Painting from its one-based number as shown to players.
    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

impl fmt::Display for Painting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "painting {}", self.index() + 1)
    }
}

/// A single decimal digit of the safe combination. Always in `0..=9`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);

    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Next digit, 9 wraps to 0.
    pub fn increment(self) -> Self {
        Self((self.0 + 1) % 10)
    }

    /// Previous digit, 0 wraps to 9.
    pub fn decrement(self) -> Self {
        Self((self.0 + 9) % 10)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("digit out of range: {value}"))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a digit wheel on the safe panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeSlot {
    First,
    Second,
    Third,
    Fourth,
}

impl CodeSlot {
    pub const ALL: [CodeSlot; 4] = [
        CodeSlot::First,
        CodeSlot::Second,
        CodeSlot::Third,
        CodeSlot::Fourth,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth => 3,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_uniqueness() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn item_names_round_trip() {
        for item in ItemKind::ALL {
            assert_eq!(ItemKind::from_name(item.name()), Some(item));
        }
        assert_eq!(ItemKind::from_name("KEY"), Some(ItemKind::Key));
        assert_eq!(ItemKind::from_name("parchment"), None);
    }

    #[test]
    fn item_set_membership_only() {
        let mut set = ItemSet::new();
        assert!(set.is_empty());
        assert!(set.insert(ItemKind::Key));
        assert!(!set.insert(ItemKind::Key));
        assert_eq!(set.len(), 1);
        assert!(set.contains(ItemKind::Key));
        assert!(!set.contains(ItemKind::Lever));
    }

    #[test]
    fn item_set_iterates_in_display_order() {
        let mut set = ItemSet::new();
        set.insert(ItemKind::Lever);
        set.insert(ItemKind::Flashlight);
        let items: Vec<_> = set.iter().collect();
        assert_eq!(items, vec![ItemKind::Flashlight, ItemKind::Lever]);
    }

    #[test]
    fn digit_wraps_both_ways() {
        let nine = Digit::new(9).unwrap();
        assert_eq!(nine.increment(), Digit::ZERO);
        assert_eq!(Digit::ZERO.decrement(), nine);
        assert_eq!(Digit::new(4).unwrap().increment().value(), 5);
    }

    #[test]
    fn digit_rejects_out_of_range() {
        assert!(Digit::new(10).is_none());
        assert!(Digit::try_from(12).is_err());
    }

    #[test]
    fn painting_and_slot_numbers_are_one_based() {
        assert_eq!(Painting::from_number(1), Some(Painting::First));
        assert_eq!(Painting::from_number(3), Some(Painting::Third));
        assert_eq!(Painting::from_number(0), None);
        assert_eq!(Painting::from_number(4), None);
        assert_eq!(CodeSlot::from_number(4), Some(CodeSlot::Fourth));
        assert_eq!(CodeSlot::from_number(5), None);
    }
}
