// Window + software drawing for the card.
// Visual effects provided here:
// 1) A window that shows the card: prize underneath, cover on top.
// 2) The cover drawn only where the mask is still opaque, faded on reveal.
// 3) A tiny 5x7 bitmap font for the label strip and the text prize.

use image::imageops::{self, FilterType};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::warn;

use crate::card::Prize;
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::types::FrameBuffer;

/// Paper colour behind the prize.
pub const PRIZE_BACKGROUND: u32 = 0x00_FA_F7_F0;
pub const TEXT_COLOR: u32 = 0x00_30_30_30;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the card plus its label strip.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, `None` while it is outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Visual: when pressed, the card is covered again for another round.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }
}

/* ---------- Card compositing ---------- */

/// Lay the cover over the prize wherever the mask is still opaque.
/// `fade` in [0,1] scales the whole cover (1 = solid, 0 = gone).
pub fn compose_card(
    out: &mut FrameBuffer,
    prize: &FrameBuffer,
    cover: &FrameBuffer,
    mask: &Mask,
    fade: f32,
) -> Result<()> {
    if prize.width != out.width || prize.height != out.height {
        return Err(Error::Render("compose: prize size mismatch".into()));
    }
    if cover.width != out.width || cover.height != out.height {
        return Err(Error::Render("compose: cover size mismatch".into()));
    }
    if mask.width() != out.width || mask.height() != out.height {
        return Err(Error::Render("compose: mask size mismatch".into()));
    }

    let fade = (fade.clamp(0.0, 1.0) * 255.0).round() as u32;
    for (i, px) in out.pixels.iter_mut().enumerate() {
        let a = mask.opacity()[i] as u32 * fade / 255;
        *px = match a {
            0 => prize.pixels[i],
            255 => cover.pixels[i],
            _ => mix(cover.pixels[i], prize.pixels[i], a),
        };
    }
    Ok(())
}

/// Copy `src` into `dst` with its top-left corner at (x, y), clipped.
pub fn blit(dst: &mut FrameBuffer, src: &FrameBuffer, x: usize, y: usize) {
    let w = src.width.min(dst.width.saturating_sub(x));
    if w == 0 {
        return;
    }
    for sy in 0..src.height {
        let dy = y + sy;
        if dy >= dst.height {
            break;
        }
        let s = sy * src.width;
        let d = dy * dst.width + x;
        dst.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
    }
}

/// Render what sits under the cover: the prize image scaled to fit, or the
/// prize text centred on paper if there is no image (or it won't load).
pub fn render_prize(prize: Prize<'_>, width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::filled(width, height, PRIZE_BACKGROUND);
    let text = match prize {
        Prize::Image(path) => match image::open(path) {
            Ok(img) => {
                draw_contained(&mut fb, &img.to_rgba8());
                return fb;
            }
            Err(e) => {
                warn!(path, error = %e, "prize image unavailable, showing text");
                ""
            }
        },
        Prize::Text(text) => text,
    };
    let x = (width as i32 - text_width(text)) / 2;
    let y = (height as i32 - 7) / 2;
    draw_text_5x7(&mut fb, x, y, text, TEXT_COLOR);
    fb
}

/// Scale the image to fit inside `fb`, keep its aspect ratio, centre it.
fn draw_contained(fb: &mut FrameBuffer, img: &image::RgbaImage) {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let scale = (fb.width as f32 / iw as f32).min(fb.height as f32 / ih as f32);
    let w = ((iw as f32 * scale).round() as u32).max(1);
    let h = ((ih as f32 * scale).round() as u32).max(1);
    let scaled = imageops::resize(img, w, h, FilterType::Triangle);

    let ox = (fb.width.saturating_sub(w as usize)) / 2;
    let oy = (fb.height.saturating_sub(h as usize)) / 2;
    for (x, y, p) in scaled.enumerate_pixels() {
        let (px, py) = (ox + x as usize, oy + y as usize);
        if px >= fb.width || py >= fb.height {
            continue;
        }
        let idx = py * fb.width + px;
        let [r, g, b, a] = p.0;
        let rgb = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        fb.pixels[idx] = mix(rgb, fb.pixels[idx], a as u32);
    }
}

/// Blend `top` over `bottom` with alpha `a` in 0..=255, per channel.
#[inline]
fn mix(top: u32, bottom: u32, a: u32) -> u32 {
    let ch = |shift: u32| {
        let t = (top >> shift) & 0xFF;
        let b = (bottom >> shift) & 0xFF;
        (t * a + b * (255 - a) + 127) / 255
    };
    (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

/* ---------- Software drawing: pixels, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Return a 5x7 glyph bitmap. Lowercase is drawn as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Width in pixels of `text` drawn with the 5x7 font.
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * 6
}

/// Draw a text string using 5x7 glyphs (5 px glyph + 1 px spacing).
/// Characters without a glyph leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}
