//! Engine module - runs the simulation at a fixed rate.
//!
//! [`Runner`] owns the [`Controller`](crate::core::Controller), drains the
//! input queue once per tick, and forwards changed pixels to a
//! [`PresentationSink`]. The lifecycle is explicit:
//!
//! 1. build a `Controller` from a validated config
//! 2. hand it, the input receiver and a sink to `Runner::new`
//! 3. `run` until the shutdown flag is set (or drive `step` yourself)

pub mod runner;
pub mod sink;

pub use matrix_shooter_core as core;
pub use matrix_shooter_types as types;

pub use runner::{
    input_channel, input_channel_with_capacity, Runner, INPUT_QUEUE_CAPACITY, MAX_INPUTS_PER_TICK,
};
pub use sink::{FrameForwarder, MemorySink, PresentationSink};
