//! Game kernel: authoritative session state, puzzle validation, progression.
//!
//! # Invariants
//! - All state mutations flow through [`Session::apply`].
//! - An item can only be equipped while possessed; at most one is equipped.
//! - Invalid or out-of-order commands are no-ops, never errors.
//! - Same config and command sequence give the same state.

pub mod config;
pub mod inventory;
pub mod progression;
pub mod puzzles;
pub mod session;
pub mod walkthrough;

pub use config::{ConfigError, GameConfig};
pub use inventory::{EquipOutcome, Inventory, InventorySnapshot};
pub use progression::{LeverChain, LeverStage, LeverTrigger, SafeStage};
pub use puzzles::{CodeLock, PaintingPuzzle, is_near_any, verify_code, verify_rotation_puzzle};
pub use session::{NotificationTone, Session, SessionEvent, SessionSnapshot};
