// How much of the cover has been scratched away.
//
// This walks the whole mask, so callers run it once per pointer sample and
// not once per erased pixel. Win detection is therefore only as fresh as the
// last interaction, which is all the card needs.

use crate::mask::{Mask, TRANSPARENT};

/// Number of pixels with opacity 0.
pub fn transparent_pixels(mask: &Mask) -> usize {
    mask.opacity().iter().filter(|&&a| a == TRANSPARENT).count()
}

/// Percentage of fully transparent pixels, in `[0, 100]`.
/// An empty mask reports 0.
pub fn coverage(mask: &Mask) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    transparent_pixels(mask) as f64 / mask.len() as f64 * 100.0
}

/// True when at least `threshold` percent of the mask is transparent.
///
/// Compares `cleared * 100` against `threshold * total` so whole-number
/// thresholds are exact; dividing first can land a hair under (29/100*100
/// is 28.999...).
pub fn meets_threshold(mask: &Mask, threshold: f64) -> bool {
    if mask.is_empty() {
        return threshold <= 0.0;
    }
    transparent_pixels(mask) as f64 * 100.0 >= threshold * mask.len() as f64
}
