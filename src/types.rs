// Core types shared by the mask, the cover and the window.

/// Scratch brush radius in pixels.
pub const DEFAULT_BRUSH_RADIUS: f32 = 20.0;

/// Side length used when the rendered box reports a zero dimension.
pub const FALLBACK_SIDE: usize = 250;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }
}

/// A single pointer sample in surface-local pixel space.
/// Not retained after the erase it drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
