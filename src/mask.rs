// Opacity mask for the scratch layer, plus the circular eraser.
// Visual: 255 = cover still painted over the prize, 0 = scratched through.

/// Fully covered pixel.
pub const OPAQUE: u8 = 255;
/// Fully scratched pixel.
pub const TRANSPARENT: u8 = 0;

/// One byte of opacity per pixel, row-major.
/// Values only ever go down while a round is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    opacity: Vec<u8>, // length = width * height
}

impl Mask {
    /// A mask where every pixel sits under the cover.
    pub fn covered(width: usize, height: usize) -> Self {
        Self { width, height, opacity: vec![OPAQUE; width * height] }
    }

    /// Build a mask from raw opacity bytes. Returns `None` if the length
    /// doesn't match the dimensions.
    pub fn from_opacity(width: usize, height: usize, opacity: Vec<u8>) -> Option<Self> {
        if opacity.len() != width * height {
            return None;
        }
        Some(Self { width, height, opacity })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.opacity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opacity.is_empty()
    }

    pub fn opacity(&self) -> &[u8] {
        &self.opacity
    }

    /// Opacity at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.opacity[y * self.width + x])
    }

    /// Paint the whole cover back on. This is how a round restarts.
    pub fn recover(&mut self) {
        self.opacity.fill(OPAQUE);
    }

    /// Scratch a filled circle of `radius` around `center`.
    ///
    /// A pixel is cleared when its centre `(px + 0.5, py + 0.5)` lies within
    /// `radius` of `center`. Only the circle's bounding box (clipped to the
    /// buffer) is visited, so the cost follows the brush area rather than the
    /// mask size. Points off the buffer clear nothing and are not an error.
    ///
    /// Returns how many pixels went from covered to clear on this call.
    pub fn erase(&mut self, cx: f32, cy: f32, radius: f32) -> usize {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return 0;
        }
        if self.width == 0 || self.height == 0 {
            return 0;
        }

        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;

        // Pixel px qualifies only if |px + 0.5 - cx| <= r.
        let x0 = ((cx - radius - 0.5).floor() as i64).max(0);
        let x1 = ((cx + radius - 0.5).ceil() as i64).min(max_x);
        let y0 = ((cy - radius - 0.5).floor() as i64).max(0);
        let y1 = ((cy + radius - 0.5).ceil() as i64).min(max_y);
        if x0 > x1 || y0 > y1 {
            return 0;
        }

        let r2 = radius * radius;
        let mut cleared = 0;
        for py in y0..=y1 {
            let dy = py as f32 + 0.5 - cy;
            let row = py as usize * self.width;
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                if dx * dx + dy * dy > r2 {
                    continue; // outside the circle
                }
                let a = &mut self.opacity[row + px as usize];
                if *a != TRANSPARENT {
                    *a = TRANSPARENT;
                    cleared += 1;
                }
            }
        }
        cleared
    }
}
