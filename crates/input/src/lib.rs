//! Input layer: host key and pointer events, and text scripts, mapped to
//! kernel commands.
//!
//! # Invariants
//! - Input never touches session state; it only produces [`Command`]s.
//! - Unmapped keys and unbound meshes produce nothing.
//!
//! [`Command`]: dreamroom_common::Command

pub mod keymap;
pub mod script;

pub use keymap::{InputMapper, Key, PickBindings, RawInput, map_key};
pub use script::{ParseError, ParseErrorKind, parse_command, parse_script};
