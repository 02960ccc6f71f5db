//! Terminal presentation for the shooter.
//!
//! The LED matrix is emulated with colored block glyphs. Rendering goes
//! through a small cell framebuffer so that only changed cells are written:
//!
//! - [`fb`]: styled cell grid
//! - [`matrix_view`]: pure layout of matrix, ticker and status line
//! - [`renderer`]: crossterm flushing with run-length diffs
//! - [`sink`]: the [`PresentationSink`](crate::engine::PresentationSink) tying them together

pub mod fb;
pub mod matrix_view;
pub mod renderer;
pub mod sink;

pub use matrix_shooter_core as core;
pub use matrix_shooter_engine as engine;
pub use matrix_shooter_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use matrix_view::{MatrixScreen, MatrixView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
pub use sink::TerminalSink;
