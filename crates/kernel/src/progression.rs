//! Progression gates: the lever chain and the safe.
//!
//! Each gate is a small state machine advanced by discrete triggers.
//! Triggers that arrive out of order leave the gate where it is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the lever sub-puzzle stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeverStage {
    #[default]
    NotStarted,
    /// The lever has been taken in hand at least once.
    ComponentHeld,
    /// The lever sits on its mount; the host is loading the mounted model.
    ComponentPlaced,
    /// The mounted lever is in the world and can be pulled.
    Assembled,
    /// Pulled with the paintings aligned. Terminal.
    Validated,
}

impl fmt::Display for LeverStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::ComponentHeld => "component held",
            Self::ComponentPlaced => "component placed",
            Self::Assembled => "assembled",
            Self::Validated => "validated",
        };
        f.write_str(s)
    }
}

/// Inputs that can move the lever chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeverTrigger {
    /// The lever was put in hand.
    LeverEquipped,
    /// The player clicked the mount. Carries whether the lever is in hand
    /// and the current painting check.
    MountPicked {
        lever_in_hand: bool,
        paintings_aligned: bool,
    },
    /// The host finished loading the mounted lever.
    MountedLeverLoaded,
}

impl LeverStage {
    /// Transition table. `None` means the trigger is ignored in this stage.
    pub fn next(self, trigger: LeverTrigger) -> Option<LeverStage> {
        use LeverStage::*;
        use LeverTrigger::*;
        match (self, trigger) {
            (NotStarted, LeverEquipped) => Some(ComponentHeld),
            (
                ComponentHeld,
                MountPicked {
                    lever_in_hand: true,
                    ..
                },
            ) => Some(ComponentPlaced),
            (ComponentPlaced, MountedLeverLoaded) => Some(Assembled),
            (
                Assembled,
                MountPicked {
                    paintings_aligned: true,
                    ..
                },
            ) => Some(Validated),
            _ => None,
        }
    }
}

/// The lever chain of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeverChain {
    stage: LeverStage,
}

impl LeverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> LeverStage {
        self.stage
    }

    /// Feed a trigger. Returns `(from, to)` when the stage changed.
    pub fn advance(&mut self, trigger: LeverTrigger) -> Option<(LeverStage, LeverStage)> {
        let from = self.stage;
        let to = from.next(trigger)?;
        self.stage = to;
        Some((from, to))
    }
}

/// State of the combination safe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafeStage {
    #[default]
    Locked,
    /// The code panel is showing.
    PanelOpen,
    /// Solved. Terminal.
    Opened,
}

impl SafeStage {
    pub fn is_open(self) -> bool {
        self == SafeStage::Opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGNED: LeverTrigger = LeverTrigger::MountPicked {
        lever_in_hand: true,
        paintings_aligned: true,
    };
    const MISALIGNED: LeverTrigger = LeverTrigger::MountPicked {
        lever_in_hand: true,
        paintings_aligned: false,
    };

    #[test]
    fn happy_path_reaches_validated() {
        let mut chain = LeverChain::new();
        assert_eq!(
            chain.advance(LeverTrigger::LeverEquipped),
            Some((LeverStage::NotStarted, LeverStage::ComponentHeld))
        );
        assert_eq!(
            chain.advance(MISALIGNED),
            Some((LeverStage::ComponentHeld, LeverStage::ComponentPlaced))
        );
        assert_eq!(
            chain.advance(LeverTrigger::MountedLeverLoaded),
            Some((LeverStage::ComponentPlaced, LeverStage::Assembled))
        );
        assert_eq!(
            chain.advance(ALIGNED),
            Some((LeverStage::Assembled, LeverStage::Validated))
        );
        assert_eq!(chain.stage(), LeverStage::Validated);
    }

    #[test]
    fn mount_before_holding_is_ignored() {
        let mut chain = LeverChain::new();
        assert_eq!(chain.advance(ALIGNED), None);
        assert_eq!(chain.advance(LeverTrigger::MountedLeverLoaded), None);
        assert_eq!(chain.stage(), LeverStage::NotStarted);
    }

    #[test]
    fn placing_needs_lever_in_hand() {
        let mut chain = LeverChain::new();
        chain.advance(LeverTrigger::LeverEquipped);
        let empty_hand = LeverTrigger::MountPicked {
            lever_in_hand: false,
            paintings_aligned: true,
        };
        assert_eq!(chain.advance(empty_hand), None);
        assert_eq!(chain.stage(), LeverStage::ComponentHeld);
        assert_eq!(
            chain.advance(MISALIGNED),
            Some((LeverStage::ComponentHeld, LeverStage::ComponentPlaced))
        );
    }

    #[test]
    fn pull_needs_assembly() {
        let mut chain = LeverChain::new();
        chain.advance(LeverTrigger::LeverEquipped);
        chain.advance(ALIGNED);
        assert_eq!(chain.stage(), LeverStage::ComponentPlaced);
        // Still loading: another click does nothing.
        assert_eq!(chain.advance(ALIGNED), None);
        assert_eq!(chain.stage(), LeverStage::ComponentPlaced);
    }

    #[test]
    fn pull_needs_aligned_paintings() {
        let mut chain = LeverChain::new();
        chain.advance(LeverTrigger::LeverEquipped);
        chain.advance(MISALIGNED);
        chain.advance(LeverTrigger::MountedLeverLoaded);
        assert_eq!(chain.advance(MISALIGNED), None);
        assert_eq!(chain.stage(), LeverStage::Assembled);
    }

    #[test]
    fn validated_is_terminal() {
        for trigger in [ALIGNED, MISALIGNED, LeverTrigger::LeverEquipped, LeverTrigger::MountedLeverLoaded] {
            assert_eq!(LeverStage::Validated.next(trigger), None);
        }
    }

    #[test]
    fn re_equipping_does_not_rewind() {
        let mut chain = LeverChain::new();
        chain.advance(LeverTrigger::LeverEquipped);
        assert_eq!(chain.advance(LeverTrigger::LeverEquipped), None);
        assert_eq!(chain.stage(), LeverStage::ComponentHeld);
    }

    #[test]
    fn stage_display() {
        assert_eq!(LeverStage::ComponentPlaced.to_string(), "component placed");
        assert!(SafeStage::Opened.is_open());
        assert!(!SafeStage::PanelOpen.is_open());
    }
}
