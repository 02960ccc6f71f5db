//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input transport).
//!
//! # Matrix Dimensions
//!
//! The reference playfield is a 4-lane board drawn onto a small pixel matrix:
//!
//! - **Grid**: 4 columns x 14 rows of ship slots
//! - **Scale**: each grid column is 2 pixels wide (8 pixels total)
//! - **Score row**: 1 reserved pixel row above the grid (15 pixel rows total)
//! - **Display bounds**: the physical matrix is at most 9 x 17 pixels
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds of simulation time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAMERATE` | 15 | Ticks per second |
//! | `BASE_ANIM_STEP_MS` | 800 | Gravity interval before any kill |
//! | `ANIM_STEP_PER_LEVEL_MS` | 100 | Gravity speed-up per level |
//! | `MIN_ANIM_STEP_MS` | 100 | Gravity interval floor |
//! | `SPAWN_STEP_MS` | 2000 | Time between spawns |
//! | `SCROLL_STEP_MS` | 50 | Time per text scroll step |
//! | `END_VIEW_PAUSE_MS` | 2500 | Losing frame stays visible this long |
//! | `END_HOLD_PAUSE_MS` | 1500 | Pause after the score message |
//!
//! # Examples
//!
//! ```
//! use matrix_shooter_types::{Button, Direction, Rgb, GRID_COLUMNS, PIXEL_SCALE};
//!
//! // Parse a command byte from the arcade controller
//! assert_eq!(Button::from_byte(b'U'), Some(Button::Fire));
//! assert_eq!(Button::from_byte(b'?'), None);
//!
//! // Movement buttons carry a direction
//! assert_eq!(Button::Left.direction(), Some(Direction::Left));
//! assert_eq!(Button::Fire.direction(), None);
//!
//! // Matrix geometry
//! assert_eq!(GRID_COLUMNS * PIXEL_SCALE, 8);
//! assert_eq!(Rgb::BLACK, Rgb::new(0, 0, 0));
//! ```

/// Grid width in ship lanes (4 columns)
pub const GRID_COLUMNS: usize = 4;

/// Grid height in ship slots (14 rows)
pub const GRID_ROWS: usize = 14;

/// Pixel columns per grid column
pub const PIXEL_SCALE: usize = 2;

/// Pixel rows reserved above the grid (the score row lives here)
pub const VERTICAL_OFFSET: usize = 1;

/// Widest matrix the display driver accepts
pub const MAX_DISPLAY_WIDTH: usize = 9;

/// Tallest matrix the display driver accepts
pub const MAX_DISPLAY_HEIGHT: usize = 17;

/// Toughest ship; also the last palette index
pub const MAX_HIT_POINTS: u8 = 6;

/// Kills needed to advance one level
pub const LEVEL_DIFFERENCE: u32 = 10;

/// Default tick rate (ticks per second)
pub const DEFAULT_FRAMERATE: u32 = 15;

/// Gravity interval at the start of a round
pub const BASE_ANIM_STEP_MS: u64 = 800;

/// Gravity interval reduction per level
pub const ANIM_STEP_PER_LEVEL_MS: u64 = 100;

/// Gravity interval floor
pub const MIN_ANIM_STEP_MS: u64 = 100;

/// Time between ship spawns
pub const SPAWN_STEP_MS: u64 = 2000;

/// Time to slide scrolling text one pixel to the left
pub const SCROLL_STEP_MS: u64 = 50;

/// How long the losing frame stays up before the score message
pub const END_VIEW_PAUSE_MS: u64 = 2500;

/// Pause after the score message before going idle
pub const END_HOLD_PAUSE_MS: u64 = 1500;

/// Starting position of scrolling text (negative = still off screen)
pub const TEXT_START_POS: i32 = -10;

/// Horizontal advance of one glyph in pixels
pub const GLYPH_ADVANCE: i32 = 5;

/// Message scrolled while waiting for a player
pub const IDLE_TEXT: &str = "P L A Y";

/// Prefix of the message scrolled after a round
pub const GAME_OVER_TEXT: &str = "SCORE: ";

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }
}

/// Ship colors indexed by remaining hit points
///
/// Index 0 is an empty slot and must stay black.
pub const SHIP_PALETTE: [Rgb; MAX_HIT_POINTS as usize + 1] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 175, 175),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 255, 0),
];

/// Defender color
pub const DEFENDER_COLOR: Rgb = Rgb::new(0, 255, 0);

/// Lit score bits
pub const SCORE_COLOR: Rgb = Rgb::new(255, 200, 0);

/// Horizontal direction for defender movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Arcade buttons delivered by the input transport
///
/// The set is closed: anything else on the wire is dropped before it
/// reaches the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Move the defender one lane left
    Left,
    /// Move the defender one lane right
    Right,
    /// Shoot up the defender's lane
    Fire,
}

impl Button {
    /// Parse a command byte from the arcade controller
    ///
    /// The controller sends `L`, `R` and `U` (up = fire).
    ///
    /// # Examples
    ///
    /// ```
    /// use matrix_shooter_types::Button;
    ///
    /// assert_eq!(Button::from_byte(b'L'), Some(Button::Left));
    /// assert_eq!(Button::from_byte(b'R'), Some(Button::Right));
    /// assert_eq!(Button::from_byte(b'U'), Some(Button::Fire));
    /// assert_eq!(Button::from_byte(b'D'), None);
    /// ```
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'L' => Some(Button::Left),
            b'R' => Some(Button::Right),
            b'U' => Some(Button::Fire),
            _ => None,
        }
    }

    /// Wire byte for this button
    pub fn as_byte(&self) -> u8 {
        match self {
            Button::Left => b'L',
            Button::Right => b'R',
            Button::Fire => b'U',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Fire => "fire",
        }
    }

    /// Movement direction, if this is a movement button
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Button::Left => Some(Direction::Left),
            Button::Right => Some(Direction::Right),
            Button::Fire => None,
        }
    }
}
