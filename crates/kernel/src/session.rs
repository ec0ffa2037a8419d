use crate::config::GameConfig;
use crate::inventory::{EquipOutcome, Inventory, InventorySnapshot};
use crate::progression::{LeverChain, LeverStage, LeverTrigger, SafeStage};
use crate::puzzles::{CodeLock, PaintingPuzzle};
use dreamroom_common::{
    Asset, CodeSlot, Command, Digit, ItemKind, Painting, PickTarget, SessionId,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Colour of a transient on-screen message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationTone {
    Success,
    Failure,
}

/// An event record produced by every state change of a session.
///
/// The host turns these into visible effects: hiding a collected mesh,
/// swapping the closed safe for the open one, starting the cinematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// First time an item entered the inventory.
    ItemCollected { item: ItemKind },
    ItemEquipped { item: ItemKind },
    ItemUnequipped { item: ItemKind },
    PaintingRotated { painting: Painting, angle: f64 },
    /// The combined painting check flipped.
    PaintingsAlignmentChanged { aligned: bool },
    SafePanelOpened,
    SafePanelClosed,
    DigitChanged { slot: CodeSlot, digit: Digit },
    /// Replace the locked safe with the opened one.
    SafeOpened,
    Notification {
        tone: NotificationTone,
        message: String,
    },
    LeverStageChanged { from: LeverStage, to: LeverStage },
    /// Play the mounted lever's pull animation.
    LeverPulled,
    NarrativeAdvanced,
    /// Show the closing cinematic after the given delay.
    CinematicScheduled { delay_ms: u64 },
    DoorOpened,
    /// Hidden objects became visible (dark) or hidden again (lit).
    RevealChanged { revealed: bool },
    FlashlightSwitched { on: bool },
    InventoryPanelToggled { open: bool },
}

/// The state of one play session.
///
/// Owned by the active scene and mutated only through [`Session::apply`].
/// Nothing here outlives the session. Given the same config and command
/// sequence, two sessions end in identical states.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    config: GameConfig,
    inventory: Inventory,
    paintings: PaintingPuzzle,
    lock: CodeLock,
    safe: SafeStage,
    lever: LeverChain,
    door_open: bool,
    revealed: bool,
    flashlight_on: bool,
    inventory_panel_open: bool,
    /// Commands applied so far, in order, without idle frame ticks.
    commands: Vec<Command>,
    /// Append-only log of every event produced.
    event_log: Vec<SessionEvent>,
}

impl Session {
    /// Start a session with the default room.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Start a session with a custom room. The config is assumed validated.
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            id: SessionId::new(),
            paintings: PaintingPuzzle::new(config.rotation.step_radians()),
            lock: CodeLock::new(config.safe.secret),
            config,
            inventory: Inventory::new(),
            safe: SafeStage::Locked,
            lever: LeverChain::new(),
            door_open: false,
            revealed: false,
            flashlight_on: true,
            inventory_panel_open: false,
            commands: Vec::new(),
            event_log: Vec::new(),
        }
    }

    /// Rebuild a session by applying `commands` to a fresh one.
    pub fn replay(config: GameConfig, commands: &[Command]) -> Self {
        let mut session = Self::with_config(config);
        for command in commands {
            session.apply(*command);
        }
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn paintings(&self) -> &PaintingPuzzle {
        &self.paintings
    }

    pub fn entered_code(&self) -> [Digit; 4] {
        self.lock.entered()
    }

    pub fn safe_stage(&self) -> SafeStage {
        self.safe
    }

    pub fn lever_stage(&self) -> LeverStage {
        self.lever.stage()
    }

    pub fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn flashlight_on(&self) -> bool {
        self.flashlight_on
    }

    pub fn inventory_panel_open(&self) -> bool {
        self.inventory_panel_open
    }

    /// Current painting check, recomputed on every call.
    pub fn paintings_aligned(&self) -> bool {
        let rotation = &self.config.rotation;
        self.paintings
            .is_aligned(&rotation.targets, rotation.tolerance)
    }

    /// Per-painting alignment, recomputed on every call.
    pub fn painting_alignment(&self) -> [bool; 3] {
        let rotation = &self.config.rotation;
        self.paintings
            .alignment(&rotation.targets, rotation.tolerance)
    }

    /// Commands applied so far. Frame ticks that changed nothing are not kept.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SessionEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Apply one command. Returns the events it produced, which are also
    /// appended to the log. Commands that make no sense in the current
    /// state produce nothing.
    pub fn apply(&mut self, command: Command) -> Vec<SessionEvent> {
        let _span = tracing::info_span!("apply", session = %self.id).entered();
        let mut out = Vec::new();
        match command {
            Command::Pick { target, player } => self.pick(target, player, &mut out),
            Command::Equip(item) => self.equip(item, &mut out),
            Command::Unequip => {
                if let Some(item) = self.inventory.unequip() {
                    out.push(SessionEvent::ItemUnequipped { item });
                } else {
                    tracing::debug!("unequip with empty hand ignored");
                }
            }
            Command::RotatePainting(painting) => self.rotate(painting, &mut out),
            Command::IncrementDigit(slot) => self.turn_digit(slot, true, &mut out),
            Command::DecrementDigit(slot) => self.turn_digit(slot, false, &mut out),
            Command::SubmitCode => self.submit_code(&mut out),
            Command::CloseSafePanel => self.close_safe_panel(&mut out),
            Command::AssetReady(Asset::MountedLever) => {
                self.advance_lever(LeverTrigger::MountedLeverLoaded, &mut out);
            }
            Command::FrameTick { light_intensity } => self.frame_tick(light_intensity, &mut out),
            Command::SetFlashlight(on) => {
                if !self.inventory.has_item(ItemKind::Flashlight) {
                    tracing::debug!("no flashlight to switch");
                } else if self.flashlight_on != on {
                    self.flashlight_on = on;
                    out.push(SessionEvent::FlashlightSwitched { on });
                }
            }
            Command::ToggleInventoryPanel => {
                self.inventory_panel_open = !self.inventory_panel_open;
                out.push(SessionEvent::InventoryPanelToggled {
                    open: self.inventory_panel_open,
                });
            }
            Command::CloseInventoryPanel => self.close_inventory_panel(&mut out),
            Command::ClosePanels => {
                self.close_safe_panel(&mut out);
                self.close_inventory_panel(&mut out);
            }
        }
        // Idle frame ticks change nothing and are not recorded.
        let idle_tick = matches!(command, Command::FrameTick { .. }) && out.is_empty();
        if !idle_tick {
            self.commands.push(command);
        }
        self.event_log.extend(out.iter().cloned());
        out
    }

    fn pick(&mut self, target: PickTarget, player: Vec3, out: &mut Vec<SessionEvent>) {
        match target {
            PickTarget::Item(item) => {
                let reachable = match item {
                    ItemKind::Flashlight => true,
                    // Only drawn while the room is dark.
                    ItemKind::Key => self.revealed,
                    // Lies inside the safe.
                    ItemKind::Lever => self.safe.is_open(),
                };
                if reachable {
                    self.collect(item, out);
                } else {
                    tracing::debug!(%item, "item not reachable");
                }
            }
            PickTarget::Painting(painting) => self.rotate(painting, out),
            PickTarget::Safe => {
                if self.safe == SafeStage::Locked && self.revealed {
                    self.safe = SafeStage::PanelOpen;
                    out.push(SessionEvent::SafePanelOpened);
                } else {
                    tracing::debug!(safe = ?self.safe, revealed = self.revealed, "safe pick ignored");
                }
            }
            PickTarget::LeverMount => {
                let trigger = LeverTrigger::MountPicked {
                    lever_in_hand: self.inventory.is_equipped(ItemKind::Lever),
                    paintings_aligned: self.paintings_aligned(),
                };
                self.advance_lever(trigger, out);
            }
            PickTarget::Door => self.try_open_door(player, out),
        }
    }

    fn close_safe_panel(&mut self, out: &mut Vec<SessionEvent>) {
        if self.safe == SafeStage::PanelOpen {
            self.safe = SafeStage::Locked;
            out.push(SessionEvent::SafePanelClosed);
        }
    }

    fn close_inventory_panel(&mut self, out: &mut Vec<SessionEvent>) {
        if self.inventory_panel_open {
            self.inventory_panel_open = false;
            out.push(SessionEvent::InventoryPanelToggled { open: false });
        }
    }

    fn collect(&mut self, item: ItemKind, out: &mut Vec<SessionEvent>) {
        if self.inventory.collect(item) {
            tracing::info!(%item, "item collected");
            out.push(SessionEvent::ItemCollected { item });
        }
    }

    fn equip(&mut self, item: ItemKind, out: &mut Vec<SessionEvent>) {
        match self.inventory.equip(item) {
            EquipOutcome::Equipped { item, replaced } => {
                if let Some(old) = replaced {
                    out.push(SessionEvent::ItemUnequipped { item: old });
                }
                out.push(SessionEvent::ItemEquipped { item });
                if item == ItemKind::Lever {
                    self.advance_lever(LeverTrigger::LeverEquipped, out);
                }
            }
            EquipOutcome::Unequipped(item) => out.push(SessionEvent::ItemUnequipped { item }),
            EquipOutcome::Ignored => tracing::debug!(%item, "cannot equip unpossessed item"),
        }
    }

    fn rotate(&mut self, painting: Painting, out: &mut Vec<SessionEvent>) {
        let was_aligned = self.paintings_aligned();
        let angle = self.paintings.rotate(painting);
        out.push(SessionEvent::PaintingRotated { painting, angle });
        let aligned = self.paintings_aligned();
        if aligned != was_aligned {
            tracing::debug!(aligned, "painting alignment changed");
            out.push(SessionEvent::PaintingsAlignmentChanged { aligned });
        }
    }

    fn turn_digit(&mut self, slot: CodeSlot, up: bool, out: &mut Vec<SessionEvent>) {
        if self.safe != SafeStage::PanelOpen {
            tracing::debug!("digit change with safe panel closed ignored");
            return;
        }
        let digit = if up {
            self.lock.increment(slot)
        } else {
            self.lock.decrement(slot)
        };
        out.push(SessionEvent::DigitChanged { slot, digit });
    }

    fn submit_code(&mut self, out: &mut Vec<SessionEvent>) {
        if self.safe != SafeStage::PanelOpen {
            tracing::debug!("code submitted with safe panel closed");
            return;
        }
        if self.lock.matches() {
            let reward = self.config.progression.safe_reward;
            tracing::info!(%reward, "safe opened");
            self.safe = SafeStage::Opened;
            out.push(SessionEvent::Notification {
                tone: NotificationTone::Success,
                message: format!("You obtained the {reward}"),
            });
            self.collect(reward, out);
            out.push(SessionEvent::SafeOpened);
        } else {
            // The entered digits are kept so a retry starts from the last guess.
            self.safe = SafeStage::Locked;
            out.push(SessionEvent::Notification {
                tone: NotificationTone::Failure,
                message: "Wrong code! Try again.".to_string(),
            });
        }
        out.push(SessionEvent::SafePanelClosed);
    }

    fn advance_lever(&mut self, trigger: LeverTrigger, out: &mut Vec<SessionEvent>) {
        let Some((from, to)) = self.lever.advance(trigger) else {
            tracing::debug!(stage = %self.lever.stage(), ?trigger, "lever trigger ignored");
            return;
        };
        tracing::info!(%from, %to, "lever stage changed");
        out.push(SessionEvent::LeverStageChanged { from, to });
        match to {
            LeverStage::ComponentPlaced => {
                if let Some(item) = self.inventory.unequip() {
                    out.push(SessionEvent::ItemUnequipped { item });
                }
            }
            LeverStage::Validated => {
                out.push(SessionEvent::LeverPulled);
                self.collect(self.config.progression.rotation_reward, out);
                out.push(SessionEvent::NarrativeAdvanced);
                out.push(SessionEvent::CinematicScheduled {
                    delay_ms: self.config.progression.cinematic_delay_ms,
                });
            }
            _ => {}
        }
    }

    fn try_open_door(&mut self, player: Vec3, out: &mut Vec<SessionEvent>) {
        if self.door_open {
            return;
        }
        let distance = player.distance(self.config.door.position);
        if distance >= self.config.door.reach {
            tracing::debug!(distance, "too far from the door");
            return;
        }
        if !self.inventory.is_equipped(ItemKind::Key) {
            tracing::debug!("door is locked");
            return;
        }
        tracing::info!("door opened");
        self.door_open = true;
        out.push(SessionEvent::DoorOpened);
    }

    fn frame_tick(&mut self, light_intensity: f32, out: &mut Vec<SessionEvent>) {
        let revealed = light_intensity <= self.config.lighting.darkness_threshold;
        tracing::trace!(light_intensity, revealed, "frame check");
        if revealed != self.revealed {
            self.revealed = revealed;
            out.push(SessionEvent::RevealChanged { revealed });
        }
    }

    /// Detached copy of the whole session for UI rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.id,
            inventory: self.inventory.snapshot(),
            painting_angles: self.paintings.angles(),
            paintings_aligned: self.paintings_aligned(),
            entered_code: self.lock.entered(),
            safe: self.safe,
            lever: self.lever.stage(),
            door_open: self.door_open,
            revealed: self.revealed,
            flashlight_on: self.flashlight_on,
            inventory_panel_open: self.inventory_panel_open,
            commands_applied: self.commands.len(),
        }
    }

    /// Deterministic hash of the game state, for comparing sessions.
    /// The session id and logs are not part of the state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let equipped = self.inventory.equipped().map_or(0, item_tag);
        mix(&mut h, &[self.inventory.possessed().bits(), equipped]);
        for angle in self.paintings.angles() {
            mix(&mut h, &angle.to_bits().to_le_bytes());
        }
        for digit in self.lock.entered() {
            mix(&mut h, &[digit.value()]);
        }
        mix(
            &mut h,
            &[
                self.safe as u8,
                self.lever.stage() as u8,
                self.door_open as u8,
                self.revealed as u8,
                self.flashlight_on as u8,
                self.inventory_panel_open as u8,
            ],
        );
        h
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn item_tag(item: ItemKind) -> u8 {
    match item {
        ItemKind::Flashlight => 1,
        ItemKind::Key => 2,
        ItemKind::Lever => 3,
    }
}

/// Read-only copy of a [`Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub inventory: InventorySnapshot,
    pub painting_angles: [f64; 3],
    pub paintings_aligned: bool,
    pub entered_code: [Digit; 4],
    pub safe: SafeStage,
    pub lever: LeverStage,
    pub door_open: bool,
    pub revealed: bool,
    pub flashlight_on: bool,
    pub inventory_panel_open: bool,
    pub commands_applied: usize,
}
