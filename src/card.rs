//! The scratch card: config, one [`Surface`] per round, and pointer sessions.
//!
//! The host feeds JSON config and pointer events in, and drains
//! [`Completion`]s out. Everything runs on the caller's thread; each pointer
//! sample is erase + coverage check before the next one is looked at.

use tracing::{debug, error, info};

use crate::config::CardConfig;
use crate::cover::cover_layer;
use crate::error::Result;
use crate::pointer::{BoundingBox, PointerEvent, map_to_surface};
use crate::surface::{Completion, RevealState, Surface};
use crate::types::{DEFAULT_BRUSH_RADIUS, FALLBACK_SIDE, FrameBuffer};

/// What sits under the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prize<'a> {
    Image(&'a str),
    Text(&'a str),
}

pub struct ScratchCard {
    config: CardConfig,
    bounds: BoundingBox,
    brush_radius: f32,
    surface: Option<Surface>,
    cover: Option<FrameBuffer>,
    scratching: bool,
    completions: Vec<Completion>,
}

impl ScratchCard {
    /// A card laid out at `bounds`. No round runs until it is configured.
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            config: CardConfig::default(),
            bounds,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            surface: None,
            cover: None,
            scratching: false,
            completions: Vec::new(),
        }
    }

    /// Brush used from the next round on (`restart`, `configure`).
    pub fn with_brush_radius(mut self, radius: f32) -> Self {
        self.brush_radius = radius;
        self
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Move or resize the rendered box. Only pointer mapping changes; the
    /// buffer keeps its size until the next round.
    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn cover(&self) -> Option<&FrameBuffer> {
        self.cover.as_ref()
    }

    pub fn state(&self) -> Option<RevealState> {
        self.surface.as_ref().map(Surface::state)
    }

    pub fn is_scratching(&self) -> bool {
        self.scratching
    }

    /// Merge a serialized config over the current one and start a new round.
    ///
    /// Bad input is logged and returned; the running round is left exactly
    /// as it was.
    pub fn apply_config(&mut self, raw: &str) -> Result<()> {
        match self.config.merge_json(raw) {
            Ok(cfg) => {
                self.configure(cfg);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "rejected card config");
                Err(e)
            }
        }
    }

    /// Replace the config and start a new round.
    pub fn configure(&mut self, config: CardConfig) {
        self.config = config;
        self.restart();
    }

    /// Cover the card again with the current config.
    pub fn restart(&mut self) {
        let (width, height) = self.surface_size();
        let threshold = self.config.clear_percentage;
        let radius = self.brush_radius;

        // A zero side fell back to the default; the card is drawn at that
        // size, so pointers must be accepted over all of it.
        if self.bounds.width < 1.0 {
            self.bounds.width = width as f32;
        }
        if self.bounds.height < 1.0 {
            self.bounds.height = height as f32;
        }

        // Phase 1: make sure a buffer of the right size exists.
        let surface = self.ensure_surface(width, height);
        // Phase 2: cover it, arm the threshold, pick up the current brush.
        surface.reset(threshold);
        surface.set_brush_radius(radius);
        self.cover = Some(cover_layer(self.config.cover_texture(), width, height));

        self.scratching = false;
        info!(width, height, threshold, "new round");
    }

    /// Pointer pressed. Starts a session if it lands on the card.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if !self.on_card(event) {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.scratching = true;
        surface.begin();
        self.scratch(event);
    }

    /// Pointer moved. Scratches only while a session is open.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.scratching && self.on_card(event) {
            self.scratch(event);
        }
    }

    /// Pointer released anywhere. Ends the session.
    pub fn pointer_up(&mut self) {
        if self.scratching {
            debug!("scratch session ended");
        }
        self.scratching = false;
    }

    /// Label for the current state of the round.
    pub fn label(&self) -> &str {
        match self.state() {
            Some(RevealState::Revealed) => &self.config.post_text,
            _ => &self.config.pre_text,
        }
    }

    pub fn prize(&self) -> Prize<'_> {
        match self.config.prize_image() {
            Some(path) => Prize::Image(path),
            None => Prize::Text(&self.config.post_text),
        }
    }

    /// Hand over the completions emitted since the last call.
    pub fn drain_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.completions)
    }

    fn scratch(&mut self, event: &PointerEvent) {
        let Some(point) = map_to_surface(event, &self.bounds) else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Some(done) = surface.scratch(point) {
            info!(result = ?done.result, "game completed");
            self.completions.push(done);
        }
    }

    fn on_card(&self, event: &PointerEvent) -> bool {
        event
            .client_position()
            .is_some_and(|(x, y)| self.bounds.contains(x, y))
    }

    fn surface_size(&self) -> (usize, usize) {
        let side = |v: f32| {
            if v >= 1.0 { v as usize } else { FALLBACK_SIDE }
        };
        (side(self.bounds.width), side(self.bounds.height))
    }

    fn ensure_surface(&mut self, width: usize, height: usize) -> &mut Surface {
        let threshold = self.config.clear_percentage;
        let radius = self.brush_radius;
        let fits = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == width && s.height() == height);
        if !fits {
            self.surface = None;
        }
        self.surface.get_or_insert_with(|| {
            debug!(width, height, "allocating mask");
            Surface::new(width, height, threshold).with_brush_radius(radius)
        })
    }
}
