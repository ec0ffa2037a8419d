//! Developer and UI tooling: session inspector, inventory listing, prompts.
//!
//! # Invariants
//! - Tools only read session state; nothing here applies commands.

pub mod inspector;

pub use inspector::{
    ItemEntry, PaintingInfo, SessionInspector, SessionSummary, item_description, item_label,
};
