//! Shared vocabulary for the dreamroom game core.
//!
//! # Invariants
//! - Item, painting and digit identifiers are closed enumerations.
//! - A [`Digit`] is always in `0..=9`.

pub mod command;
pub mod types;

pub use command::{Asset, Command, PickTarget};
pub use types::{CodeSlot, Digit, ItemKind, ItemSet, Painting, SessionId};
