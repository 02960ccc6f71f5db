//! Terminal emulation of the LED matrix.

use anyhow::Result;

use crate::core::{ScrollText, Status};
use crate::engine::PresentationSink;
use crate::matrix_view::{MatrixScreen, MatrixView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::Rgb;

/// Presentation sink that draws the matrix with crossterm.
///
/// Pixels accumulate in a [`MatrixScreen`]; `present` lays the screen out
/// for the current terminal size and flushes the changed cells.
pub struct TerminalSink {
    screen: MatrixScreen,
    view: MatrixView,
    renderer: TerminalRenderer,
    active: bool,
}

impl TerminalSink {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            screen: MatrixScreen::new(width, height),
            view: MatrixView::default(),
            renderer: TerminalRenderer::new(),
            active: false,
        }
    }

    pub fn screen(&self) -> &MatrixScreen {
        &self.screen
    }

    /// Switch to the alternate screen in raw mode
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal; safe to call twice
    pub fn exit(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.renderer.exit()?;
        }
        Ok(())
    }

    /// Full redraw on the next present (terminal resized)
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

impl PresentationSink for TerminalSink {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.screen.set_pixel(x, y, color);
    }

    fn set_overlay(&mut self, text: Option<&ScrollText>, status: Status) {
        self.screen.set_overlay(text, status);
    }

    fn present(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = self.view.render(&self.screen, Viewport::new(w, h));
        self.renderer.draw(fb)
    }
}
