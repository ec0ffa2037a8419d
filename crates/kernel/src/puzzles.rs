//! Puzzle validators and the discrete state they check.
//!
//! Validators are pure and cheap; callers may re-run them every frame.

use dreamroom_common::{CodeSlot, Digit, Painting};

/// True iff `value` lies strictly within `tolerance` of some target.
pub fn is_near_any(value: f64, targets: &[f64], tolerance: f64) -> bool {
    targets.iter().any(|t| (value - t).abs() < tolerance)
}

/// True iff every painting angle is near one of its own targets.
pub fn verify_rotation_puzzle(
    angle1: f64,
    angle2: f64,
    angle3: f64,
    targets1: &[f64],
    targets2: &[f64],
    targets3: &[f64],
    tolerance: f64,
) -> bool {
    is_near_any(angle1, targets1, tolerance)
        && is_near_any(angle2, targets2, tolerance)
        && is_near_any(angle3, targets3, tolerance)
}

/// Exact, ordered comparison of an entered combination against the secret.
pub fn verify_code(entered: &[Digit; 4], secret: &[Digit; 4]) -> bool {
    entered == secret
}

/// Accumulated rotation of the three paintings.
///
/// Angles only ever grow by the configured step and are never normalised,
/// so they may pass several full turns.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintingPuzzle {
    angles: [f64; 3],
    step: f64,
}

impl PaintingPuzzle {
    /// All paintings upright; each click adds `step` radians.
    pub fn new(step: f64) -> Self {
        Self {
            angles: [0.0; 3],
            step,
        }
    }

    /// Apply one click. Returns the painting's new angle.
    pub fn rotate(&mut self, painting: Painting) -> f64 {
        let angle = &mut self.angles[painting.index()];
        *angle += self.step;
        *angle
    }

    pub fn angle(&self, painting: Painting) -> f64 {
        self.angles[painting.index()]
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Re-evaluated on every call, never cached.
    pub fn is_aligned(&self, targets: &[Vec<f64>; 3], tolerance: f64) -> bool {
        let [a1, a2, a3] = self.angles;
        verify_rotation_puzzle(
            a1,
            a2,
            a3,
            &targets[0],
            &targets[1],
            &targets[2],
            tolerance,
        )
    }

    /// Per-painting alignment, for feedback in the UI.
    pub fn alignment(&self, targets: &[Vec<f64>; 3], tolerance: f64) -> [bool; 3] {
        Painting::ALL.map(|p| is_near_any(self.angle(p), &targets[p.index()], tolerance))
    }
}

/// Four digit wheels checked against a fixed secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLock {
    entered: [Digit; 4],
    secret: [Digit; 4],
}

impl CodeLock {
    /// Wheels start at 0000.
    pub fn new(secret: [Digit; 4]) -> Self {
        Self {
            entered: [Digit::ZERO; 4],
            secret,
        }
    }

    pub fn increment(&mut self, slot: CodeSlot) -> Digit {
        let digit = &mut self.entered[slot.index()];
        *digit = digit.increment();
        *digit
    }

    pub fn decrement(&mut self, slot: CodeSlot) -> Digit {
        let digit = &mut self.entered[slot.index()];
        *digit = digit.decrement();
        *digit
    }

    pub fn entered(&self) -> [Digit; 4] {
        self.entered
    }

    pub fn matches(&self) -> bool {
        verify_code(&self.entered, &self.secret)
    }
}
