use crate::types::{CodeSlot, ItemKind, Painting};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An object in the room the player can click on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickTarget {
    /// A collectible lying in the world.
    Item(ItemKind),
    /// One of the rotatable paintings.
    Painting(Painting),
    /// Front panel of the locked safe.
    Safe,
    /// Wall bracket the lever is assembled on.
    LeverMount,
    /// The locked door.
    Door,
}

/// Assets the host loads asynchronously and reports back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The lever model sitting on its wall mount.
    MountedLever,
}

/// A discrete player action or host signal consumed by a session.
///
/// The session consumes commands, never raw input events. Every mutation of
/// game state goes through one of these, so a session can be rebuilt from
/// the sequence it was fed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pointer click on an object, with the camera position at click time.
    Pick { target: PickTarget, player: Vec3 },
    /// Equip an item, or unequip it if it is already in hand.
    Equip(ItemKind),
    /// Put away whatever is in hand.
    Unequip,
    /// Turn a painting by one step.
    RotatePainting(Painting),
    /// Turn a safe digit wheel up by one.
    IncrementDigit(CodeSlot),
    /// Turn a safe digit wheel down by one.
    DecrementDigit(CodeSlot),
    /// Press the validate button on the safe panel.
    SubmitCode,
    /// Dismiss the safe panel without submitting.
    CloseSafePanel,
    /// The host finished loading an asset.
    AssetReady(Asset),
    /// Once-per-frame check with the summed intensity of enabled lights.
    FrameTick { light_intensity: f32 },
    /// Switch the flashlight beam on or off.
    SetFlashlight(bool),
    /// Show or hide the inventory panel.
    ToggleInventoryPanel,
    /// Hide the inventory panel.
    CloseInventoryPanel,
    /// Hide every open panel: the safe panel and the inventory panel.
    ClosePanels,
}

impl Command {
    /// Click on a target from the room origin. Useful when distance does not matter.
    pub fn pick(target: PickTarget) -> Self {
        Self::Pick {
            target,
            player: Vec3::ZERO,
        }
    }
}
