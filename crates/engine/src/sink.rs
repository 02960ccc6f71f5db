//! Presentation sink and dirty-pixel forwarding.
//!
//! A sink is whatever shows the matrix: a real LED driver, a terminal
//! emulation, or a test buffer. The engine only ever hands it pixels inside
//! the display, and after the first frame only the pixels that changed.

use anyhow::Result;

use crate::core::{PixelFrame, ScrollText, Status};
use crate::types::Rgb;

/// Receives frames from the tick loop
pub trait PresentationSink {
    /// One changed pixel; `x < width`, `y < height` always hold
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);

    /// Scrolling text and the score line for this frame
    fn set_overlay(&mut self, text: Option<&ScrollText>, status: Status);

    /// All pixels of the frame have been delivered
    fn present(&mut self) -> Result<()>;
}

/// Remembers the last forwarded frame and sends the difference
#[derive(Debug, Default)]
pub struct FrameForwarder {
    last: Option<PixelFrame>,
}

impl FrameForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next forward to send every pixel
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Push `frame` into `sink`, returning how many pixels were sent
    pub fn forward<S: PresentationSink + ?Sized>(
        &mut self,
        frame: &PixelFrame,
        text: Option<&ScrollText>,
        status: Status,
        sink: &mut S,
    ) -> Result<usize> {
        let mut sent = 0usize;

        match &self.last {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                for ((x, y, color), old) in frame.iter().zip(prev.pixels()) {
                    if color != *old {
                        sink.set_pixel(x, y, color);
                        sent += 1;
                    }
                }
            }
            _ => {
                for (x, y, color) in frame.iter() {
                    sink.set_pixel(x, y, color);
                    sent += 1;
                }
            }
        }

        sink.set_overlay(text, status);
        sink.present()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(frame),
            None => self.last = Some(frame.clone()),
        }
        Ok(sent)
    }
}

/// In-memory sink (headless runs, tests)
#[derive(Debug, Clone)]
pub struct MemorySink {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    pub text: Option<ScrollText>,
    pub status: Option<Status>,
    pub pixel_writes: usize,
    pub presents: usize,
}

impl MemorySink {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            text: None,
            status: None,
            pixel_writes: 0,
            presents: 0,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

impl PresentationSink for MemorySink {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x] = color;
        self.pixel_writes += 1;
    }

    fn set_overlay(&mut self, text: Option<&ScrollText>, status: Status) {
        self.text = text.cloned();
        self.status = Some(status);
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}
