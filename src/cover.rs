// The scratch-off cover: load a texture and tile it over the surface.
// Visual: the grey foil the user scratches through. Only its colours live
// here; which pixels are still covered is the mask's job.

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::FrameBuffer;

/// Solid foil colour used when the texture can't be loaded.
pub const FALLBACK_COVER_COLOR: u32 = 0x00_B4_B4_B4;

const BUILTIN_SIDE: u32 = 32;

/// Grey speckle used when the config names no cover texture.
pub fn builtin_texture() -> RgbaImage {
    RgbaImage::from_fn(BUILTIN_SIDE, BUILTIN_SIDE, |x, y| {
        // Cheap integer hash; any fixed noise will do.
        let h = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
        let h = (h ^ (h >> 13)).wrapping_mul(0x5bd1_e995);
        let v = 160 + ((h >> 24) % 48) as u8;
        Rgba([v, v, v.saturating_add(6), 255])
    })
}

/// Decode a texture from disk.
pub fn load_texture(path: &str) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Stretch `texture` over a `width` x `height` surface.
///
/// Scale per axis is `surface / texture`, so the texture spans the surface
/// whatever its native size; sample lookups wrap so the pattern repeats if
/// the scale ever rounds past an edge. Translucent texels are laid over the
/// fallback colour: the cover is always fully opaque.
pub fn rasterize(texture: &RgbaImage, width: usize, height: usize) -> FrameBuffer {
    let (tw, th) = texture.dimensions();
    if tw == 0 || th == 0 {
        return FrameBuffer::filled(width, height, FALLBACK_COVER_COLOR);
    }
    let (tw, th) = (tw as usize, th as usize);

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let ty = (y * th / height) % th;
        for x in 0..width {
            let tx = (x * tw / width) % tw;
            let Rgba([r, g, b, a]) = *texture.get_pixel(tx as u32, ty as u32);
            pixels.push(over_fallback(r, g, b, a));
        }
    }
    FrameBuffer { width, height, pixels }
}

/// Build the cover for one round.
///
/// `fg = None` uses the built-in texture. A texture that fails to load still
/// yields a solid opaque cover so the card stays scratchable.
pub fn cover_layer(fg: Option<&str>, width: usize, height: usize) -> FrameBuffer {
    let texture = match fg {
        None => builtin_texture(),
        Some(path) => match load_texture(path) {
            Ok(tex) => {
                debug!(path, w = tex.width(), h = tex.height(), "cover texture loaded");
                tex
            }
            Err(e) => {
                warn!(path, error = %e, "cover texture unavailable, using plain cover");
                return FrameBuffer::filled(width, height, FALLBACK_COVER_COLOR);
            }
        },
    };
    rasterize(&texture, width, height)
}

#[inline]
fn over_fallback(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let mix = |src: u8, shift: u32| -> u32 {
        let dst = (FALLBACK_COVER_COLOR >> shift) & 0xFF;
        let a = a as u32;
        (src as u32 * a + dst * (255 - a) + 127) / 255
    };
    (mix(r, 16) << 16) | (mix(g, 8) << 8) | mix(b, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_fills_the_whole_surface() {
        let cover = rasterize(&builtin_texture(), 250, 120);
        assert_eq!(cover.width, 250);
        assert_eq!(cover.height, 120);
        assert_eq!(cover.pixels.len(), 250 * 120);
    }

    #[test]
    fn small_texture_is_stretched_per_axis() {
        // 2x1 texture: left half red, right half blue.
        let mut tex = RgbaImage::new(2, 1);
        tex.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        tex.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let cover = rasterize(&tex, 10, 4);
        assert_eq!(cover.pixels[0], 0x00_FF_00_00);
        assert_eq!(cover.pixels[4], 0x00_FF_00_00);
        assert_eq!(cover.pixels[5], 0x00_00_00_FF);
        assert_eq!(cover.pixels[3 * 10 + 9], 0x00_00_00_FF);
    }

    #[test]
    fn transparent_texels_show_the_fallback_foil() {
        let tex = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let cover = rasterize(&tex, 3, 3);
        assert!(cover.pixels.iter().all(|&p| p == FALLBACK_COVER_COLOR));
    }

    #[test]
    fn missing_texture_falls_back_to_plain_cover() {
        let cover = cover_layer(Some("/definitely/not/here/cover.png"), 40, 30);
        assert_eq!(cover, FrameBuffer::filled(40, 30, FALLBACK_COVER_COLOR));
    }

    #[test]
    fn no_texture_uses_builtin() {
        let cover = cover_layer(None, 16, 16);
        assert_eq!(cover, rasterize(&builtin_texture(), 16, 16));
    }
}
