use dreamroom_common::{Command, ItemKind, Painting, PickTarget};
use glam::Vec3;

/// A keyboard key as reported by the host, layout already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Escape,
}

/// Raw input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click that hit a mesh, with the camera position.
    Picked { mesh: String, player: Vec3 },
}

/// Translate a key event into a command.
///
/// Number keys also answer to the characters an AZERTY layout produces on
/// the same physical keys. Holding Space shades the flashlight, and Escape
/// closes both the safe panel and the inventory panel.
pub fn map_key(down: bool, key: Key) -> Option<Command> {
    match (down, key) {
        (true, Key::Char(c)) => match c.to_lowercase().next()? {
            '1' | '&' => Some(Command::Equip(ItemKind::Flashlight)),
            '2' | 'é' => Some(Command::Equip(ItemKind::Key)),
            '3' | '"' => Some(Command::Equip(ItemKind::Lever)),
            'r' => Some(Command::Unequip),
            'e' | 'i' => Some(Command::ToggleInventoryPanel),
            _ => None,
        },
        (true, Key::Escape) => Some(Command::ClosePanels),
        (true, Key::Space) => Some(Command::SetFlashlight(false)),
        (false, Key::Space) => Some(Command::SetFlashlight(true)),
        (false, _) => None,
    }
}

/// Mesh names the host reports for clickable objects.
#[derive(Debug, Clone)]
pub struct PickBindings {
    entries: Vec<(String, PickTarget)>,
}

impl PickBindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind a mesh name, replacing any previous binding for it.
    pub fn bind(&mut self, mesh: impl Into<String>, target: PickTarget) {
        let mesh = mesh.into();
        self.entries.retain(|(name, _)| *name != mesh);
        self.entries.push((mesh, target));
    }

    pub fn resolve(&self, mesh: &str) -> Option<PickTarget> {
        self.entries
            .iter()
            .find(|(name, _)| name == mesh)
            .map(|(_, target)| *target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PickBindings {
    /// Mesh names of the shipped room models.
    fn default() -> Self {
        let mut b = Self::empty();
        b.bind("flashlight", PickTarget::Item(ItemKind::Flashlight));
        b.bind("Object_2", PickTarget::Item(ItemKind::Key));
        b.bind("Object_10", PickTarget::Item(ItemKind::Lever));
        b.bind("Safe_LP_M_SafeFrontPanel_0", PickTarget::Safe);
        b.bind("wall7", PickTarget::LeverMount);
        b.bind("tableau1", PickTarget::Painting(Painting::First));
        b.bind("tableau2", PickTarget::Painting(Painting::Second));
        b.bind("tableau3", PickTarget::Painting(Painting::Third));
        b.bind("door", PickTarget::Door);
        b
    }
}

/// Turns raw host input into commands.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    picks: PickBindings,
}

impl InputMapper {
    pub fn new(picks: PickBindings) -> Self {
        Self { picks }
    }

    pub fn map(&self, input: &RawInput) -> Option<Command> {
        match input {
            RawInput::KeyDown(key) => map_key(true, *key),
            RawInput::KeyUp(key) => map_key(false, *key),
            RawInput::Picked { mesh, player } => {
                let Some(target) = self.picks.resolve(mesh) else {
                    tracing::trace!(mesh = %mesh, "pick on unbound mesh");
                    return None;
                };
                Some(Command::Pick {
                    target,
                    player: *player,
                })
            }
        }
    }
}
