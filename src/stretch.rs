//! Pixel arithmetic for the range stretch
//!
//! The functions here are shared by the controller's transition logic and by
//! [`stretch`], a whole-image reference model the simulation is checked
//! against.

use crate::types::{Byte, Delta, ShiftLevel};

/// Initial running maximum, below every pixel
pub const MAX_INIT: Byte = 0;

/// Initial running minimum, all ones
pub const MIN_INIT: Byte = Byte::MAX;

/// Map a delta onto its shift level using fixed threshold bands.
///
/// Roughly `8 - floor(log2(delta))`; the bands are compared explicitly and
/// must stay that way to reproduce the controller bit for bit.
#[must_use]
pub fn shift_level(delta: Delta) -> ShiftLevel {
    let d = delta.value();
    let level = if d == 256 {
        0
    } else if d > 127 {
        1
    } else if d > 63 {
        2
    } else if d > 31 {
        3
    } else if d > 15 {
        4
    } else if d > 7 {
        5
    } else if d > 3 {
        6
    } else if d > 1 {
        7
    } else {
        8
    };
    ShiftLevel::from_band(level)
}

/// Scale one pixel: `(pixel - min) << shift` in a 16-bit accumulator,
/// clamped to 255 when the result leaves the byte range.
#[inline]
#[must_use]
pub fn scale_pixel(pixel: Byte, min: Byte, shift: ShiftLevel) -> Byte {
    let acc = u16::from(pixel)
        .wrapping_sub(u16::from(min))
        .wrapping_shl(u32::from(shift.value()));
    if acc >= 256 { Byte::MAX } else { acc as Byte }
}

/// Running (max, min) over `pixels`, starting from (0, 255)
#[inline]
#[must_use]
pub fn find_max_min(pixels: &[Byte]) -> (Byte, Byte) {
    pixels
        .iter()
        .fold((MAX_INIT, MIN_INIT), |(max, min), &p| (max.max(p), min.min(p)))
}

/// Result of the reference model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchResult {
    pub max: Byte,
    pub min: Byte,
    pub delta: Delta,
    pub shift: ShiftLevel,
    pub pixels: Vec<Byte>,
}

/// Whole-image reference model of one controller pass
#[must_use]
pub fn stretch(pixels: &[Byte]) -> StretchResult {
    let (max, min) = find_max_min(pixels);
    let delta = Delta::from_range(max, min);
    let shift = shift_level(delta);
    let pixels = pixels.iter().map(|&p| scale_pixel(p, min, shift)).collect();

    StretchResult {
        max,
        min,
        delta,
        shift,
        pixels,
    }
}
