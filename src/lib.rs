//! Scratch-to-reveal prize card.
//!
//! A cover is painted over a prize. Pointer samples scratch circular holes
//! into an opacity mask; after each sample the share of cleared pixels is
//! measured, and once it reaches the configured threshold the card is
//! revealed and a single `{"result": "won"}` completion is emitted.

pub mod card;
pub mod config;
pub mod cover;
pub mod coverage;
pub mod draw;
pub mod error;
pub mod mask;
pub mod pointer;
pub mod surface;
pub mod types;

pub use card::{Prize, ScratchCard};
pub use config::CardConfig;
pub use coverage::coverage;
pub use error::{Error, Result};
pub use mask::Mask;
pub use pointer::{BoundingBox, PointerEvent, TouchPoint, map_to_surface};
pub use surface::{Completion, Outcome, RevealState, Surface};
pub use types::{DEFAULT_BRUSH_RADIUS, FrameBuffer, StrokePoint};
