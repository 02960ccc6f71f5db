//! Read-only views handed to presentation.
//!
//! Nothing here can be mutated from outside the crate. Presentation gets a
//! shared borrow or a copy of a frame, never write access.

use crate::types::Rgb;

/// Immutable grid of pixel colors, row-major (`y * width + x`).
///
/// `x` grows left to right, `y` grows top to bottom, matching the display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelFrame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelFrame {
    /// All-black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Color at (x, y), `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterate `(x, y, color)` over every pixel.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        let w = self.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % w, i / w, c))
    }

    pub fn is_all_black(&self) -> bool {
        self.pixels.iter().all(Rgb::is_black)
    }

    /// Writes are engine-internal. Out-of-range coordinates are a scaling bug.
    pub(crate) fn set(&mut self, x: usize, y: usize, color: Rgb) {
        let i = self
            .idx(x, y)
            .unwrap_or_else(|| panic!("pixel ({x}, {y}) outside {}x{}", self.width, self.height));
        self.pixels[i] = color;
    }

    pub(crate) fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Copy `src` into this frame with its top-left corner at row `y_offset`.
    pub(crate) fn blit_rows(&mut self, src: &PixelFrame, y_offset: usize) {
        for (x, y, c) in src.iter() {
            if x < self.width && y + y_offset < self.height {
                self.set(x, y + y_offset, c);
            }
        }
    }
}

/// Scrolling message overlay.
///
/// `position` is how many pixels the text has slid left; negative values
/// mean it has not reached the left edge yet. Drawing glyphs is up to the
/// presentation side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollText {
    pub text: String,
    pub position: i32,
}
