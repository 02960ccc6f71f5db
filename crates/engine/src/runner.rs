//! Fixed-rate tick loop.
//!
//! The runner is the only place that mutates the game. Input producers (TCP
//! listener task, keyboard thread) push [`Button`]s into a bounded channel;
//! each tick drains it, applies the buttons, ticks the controller, and
//! forwards the frame if anything visible changed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::{Controller, TickReport};
use crate::sink::{FrameForwarder, PresentationSink};
use crate::types::Button;

/// Inputs applied per tick; the rest wait for the next tick
pub const MAX_INPUTS_PER_TICK: usize = 16;

/// Bounded input queue capacity
pub const INPUT_QUEUE_CAPACITY: usize = 64;

/// Create the input queue shared by all producers
pub fn input_channel() -> (mpsc::Sender<Button>, mpsc::Receiver<Button>) {
    input_channel_with_capacity(INPUT_QUEUE_CAPACITY)
}

pub fn input_channel_with_capacity(
    capacity: usize,
) -> (mpsc::Sender<Button>, mpsc::Receiver<Button>) {
    mpsc::channel(capacity.max(1))
}

pub struct Runner<S: PresentationSink> {
    controller: Controller,
    inputs: mpsc::Receiver<Button>,
    sink: S,
    forwarder: FrameForwarder,
    tick_interval: Duration,
    inputs_closed: bool,
}

impl<S: PresentationSink> Runner<S> {
    pub fn new(controller: Controller, inputs: mpsc::Receiver<Button>, sink: S) -> Self {
        let tick_interval = controller.config().tick_interval();
        Self {
            controller,
            inputs,
            sink,
            forwarder: FrameForwarder::new(),
            tick_interval,
            inputs_closed: false,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Resend the whole frame on the next redraw (e.g. after a terminal resize)
    pub fn invalidate(&mut self) {
        self.forwarder.invalidate();
    }

    fn drain_inputs(&mut self) -> ArrayVec<Button, MAX_INPUTS_PER_TICK> {
        let mut batch = ArrayVec::new();
        while !batch.is_full() {
            match self.inputs.try_recv() {
                Ok(button) => batch.push(button),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    if !self.inputs_closed {
                        warn!("all input producers are gone");
                        self.inputs_closed = true;
                    }
                    break;
                }
            }
        }
        batch
    }

    /// One tick: apply queued input, advance, forward if needed
    pub fn step(&mut self) -> Result<TickReport> {
        for button in self.drain_inputs() {
            debug!(button = button.as_str(), "input");
            self.controller.on_button(button);
        }

        let report = self.controller.tick();
        if report.redraw {
            let text = self.controller.overlay_text();
            self.forwarder.forward(
                self.controller.display(),
                text.as_ref(),
                self.controller.status(),
                &mut self.sink,
            )?;
        }
        Ok(report)
    }

    /// Tick at the configured framerate until `shutdown` is set
    ///
    /// The loop never catches up on missed ticks; a late tick just resets
    /// the schedule.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<()> {
        let mut next_tick = Instant::now();
        while !shutdown.load(Ordering::Relaxed) {
            self.step()?;

            next_tick += self.tick_interval;
            let now = Instant::now();
            match next_tick.checked_duration_since(now) {
                Some(wait) => std::thread::sleep(wait),
                None => next_tick = now,
            }
        }
        debug!(ticks = self.controller.ticks(), "tick loop stopped");
        Ok(())
    }

    /// Tear down, returning the controller and sink
    pub fn into_parts(self) -> (Controller, S) {
        (self.controller, self.sink)
    }
}
