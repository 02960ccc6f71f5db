//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the shooter rules, the board, and the tick-driven
//! state machine. It has **no dependencies** on terminals, sockets, or wall
//! clock time, making it:
//!
//! - **Deterministic**: Same seed and same inputs per tick produce the same game
//! - **Testable**: Minutes of game time run instantly in unit tests
//! - **Portable**: Any display or input transport can sit on top
//!
//! # Module Structure
//!
//! - [`palette`]: hit points to color
//! - [`board`]: ship grid, defender, and the pixel framebuffer
//! - [`controller`]: idle / playing / ending state machine, score and difficulty
//! - [`clock`]: tick-derived simulation time and event cadences
//! - [`config`]: geometry and tuning, validated against the display bounds
//! - [`notify`]: milestone notifications (game start, score, game over)
//! - [`rng`]: the seeded generator behind every spawn
//! - [`snapshot`]: immutable frames and overlay text handed to presentation
//!
//! # Game Rules
//!
//! - Ships spawn on the top row of a random lane every 2 s
//! - Every gravity tick moves all ships one row down (800 ms, faster per level)
//! - The defender shoots the lowest ship in its lane; each shot removes one hit point
//! - A destroyed ship scores 1; every 10 points is a new level
//! - A ship reaching the defender's row ends the round
//!
//! # Example
//!
//! ```
//! use matrix_shooter_core::{Controller, NullNotifier, Phase, ShooterConfig};
//! use matrix_shooter_types::Button;
//!
//! let config = ShooterConfig { seed: Some(7), ..Default::default() };
//! let mut game = Controller::new(config, NullNotifier).unwrap();
//! assert_eq!(game.phase(), Phase::Idle);
//!
//! // Any button starts a round
//! game.on_button(Button::Fire);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // 15 ticks = 1 s at the default framerate: one gravity step
//! let updates = (0..15).filter(|_| game.tick().update).count();
//! assert_eq!(updates, 1);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod controller;
pub mod notify;
pub mod palette;
pub mod rng;
pub mod snapshot;

pub use matrix_shooter_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SpawnOutcome};
pub use clock::{Cadence, SimClock};
pub use config::{ConfigError, ShooterConfig};
pub use controller::{Controller, Phase, Status, TickReport};
pub use notify::{FanoutNotifier, LogNotifier, Milestone, Notifier, NullNotifier, RecordingNotifier};
pub use rng::SimpleRng;
pub use snapshot::{PixelFrame, ScrollText};
