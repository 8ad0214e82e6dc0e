//! The reveal surface: mask, threshold and the win state machine.
//!
//! ```text
//! Covered --first scratch--> Scratching --coverage >= threshold--> Revealed
//! ```
//!
//! `Revealed` is terminal. Scratches after the win may still clear mask
//! pixels but never produce another [`Completion`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coverage::{coverage, meets_threshold};
use crate::mask::Mask;
use crate::types::{DEFAULT_BRUSH_RADIUS, StrokePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Covered,
    Scratching,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
}

/// Notification handed to the embedding host once per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub result: Outcome,
}

impl Completion {
    pub fn won() -> Self {
        Self { result: Outcome::Won }
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    mask: Mask,
    threshold: f64,
    brush_radius: f32,
    state: RevealState,
}

impl Surface {
    /// A fully covered surface.
    pub fn new(width: usize, height: usize, threshold: f64) -> Self {
        Self::from_mask(Mask::covered(width, height), threshold)
    }

    /// Wrap an existing mask, e.g. one built pixel by pixel.
    pub fn from_mask(mask: Mask, threshold: f64) -> Self {
        Self {
            mask,
            threshold,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            state: RevealState::Covered,
        }
    }

    pub fn with_brush_radius(mut self, radius: f32) -> Self {
        self.brush_radius = radius;
        self
    }

    /// Change the brush for the following scratches.
    pub fn set_brush_radius(&mut self, radius: f32) {
        self.brush_radius = radius;
    }

    pub fn width(&self) -> usize {
        self.mask.width()
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn brush_radius(&self) -> f32 {
        self.brush_radius
    }

    pub fn coverage(&self) -> f64 {
        coverage(&self.mask)
    }

    /// Start a new round on the same buffer: cover everything again and go
    /// back to `Covered` with the given threshold.
    pub fn reset(&mut self, threshold: f64) {
        self.mask.recover();
        self.threshold = threshold;
        self.state = RevealState::Covered;
    }

    /// Enter `Scratching` if nothing has happened yet. No-op otherwise.
    pub fn begin(&mut self) {
        if self.state == RevealState::Covered {
            self.state = RevealState::Scratching;
            debug!("scratching started");
        }
    }

    /// One scratch interaction: erase around `point`, then re-check the
    /// threshold once.
    pub fn scratch(&mut self, point: StrokePoint) -> Option<Completion> {
        self.begin();
        self.mask.erase(point.x, point.y, self.brush_radius);
        self.evaluate()
    }

    /// Re-estimate coverage and fire the win if the threshold is met.
    /// Returns the completion only on the call that enters `Revealed`.
    pub fn evaluate(&mut self) -> Option<Completion> {
        if self.is_revealed() {
            return None;
        }
        let pct = self.coverage();
        debug!(coverage = pct, threshold = self.threshold, "coverage sampled");
        if !meets_threshold(&self.mask, self.threshold) {
            return None;
        }
        // A pre-scratched mask still passes through Scratching.
        self.begin();
        self.state = RevealState::Revealed;
        info!(coverage = pct, "card revealed");
        Some(Completion::won())
    }
}
