//! Palette module - hit points to pixel color

use crate::types::{Rgb, DEFENDER_COLOR, MAX_HIT_POINTS, SHIP_PALETTE};

/// Color of a grid slot holding a ship with `hit_points` left.
///
/// Zero is an empty slot (black).
#[inline]
pub fn ship_color(hit_points: u8) -> Rgb {
    SHIP_PALETTE[hit_points.min(MAX_HIT_POINTS) as usize]
}

/// Color of the defender pixels.
#[inline]
pub fn defender_color() -> Rgb {
    DEFENDER_COLOR
}
