//! Terminal input module.
//!
//! Maps `crossterm` key events into [`Button`](crate::types::Button)s so a
//! keyboard can stand in for the arcade controller. Key repeat is left to the
//! terminal: every press is one button.

pub mod map;

pub use matrix_shooter_types as types;

pub use map::{handle_key_event, should_quit};
