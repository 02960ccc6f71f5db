//! MatrixView: maps the LED matrix into a terminal framebuffer.
//!
//! Pure (no I/O), so layout can be unit-tested. One matrix pixel is drawn as
//! `cell_w` terminal columns to compensate for the glyph aspect ratio.

use crate::core::{Phase, ScrollText, Status};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the terminal currently shows, fed pixel by pixel by the engine.
#[derive(Debug, Clone)]
pub struct MatrixScreen {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    text: Option<ScrollText>,
    status: Option<Status>,
}

impl MatrixScreen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            text: None,
            status: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Ignores pixels outside the matrix.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn set_overlay(&mut self, text: Option<&ScrollText>, status: Status) {
        self.text = text.cloned();
        self.status = Some(status);
    }

    pub fn text(&self) -> Option<&ScrollText> {
        self.text.as_ref()
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }
}

pub struct MatrixView {
    /// Terminal columns per matrix pixel
    cell_w: u16,
}

impl Default for MatrixView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

const BORDER: CellStyle = CellStyle::new(Rgb::new(110, 110, 130), Rgb::BLACK);
const TICKER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::BLACK).bold();
const HINT: CellStyle = CellStyle::new(Rgb::new(120, 120, 120), Rgb::BLACK);
const HINT_TEXT: &str = "<-/-> move  space fire  q quit";

/// Rows below the matrix box: ticker, status, hint.
const FOOTER_ROWS: u16 = 3;

impl MatrixView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Size of the bordered matrix box in terminal cells.
    pub fn box_size(&self, screen: &MatrixScreen) -> (u16, u16) {
        let w = screen.width() as u16 * self.cell_w + 2;
        let h = screen.height() as u16 + 2;
        (w, h)
    }

    /// Render the whole screen into a fresh framebuffer of viewport size.
    pub fn render(&self, screen: &MatrixScreen, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let (box_w, box_h) = self.box_size(screen);
        let total_h = box_h + FOOTER_ROWS;

        // Centered when it fits, top-left otherwise.
        let x0 = viewport.width.saturating_sub(box_w) / 2;
        let y0 = viewport.height.saturating_sub(total_h) / 2;

        draw_border(&mut fb, x0, y0, box_w, box_h, BORDER);
        for y in 0..screen.height() {
            for x in 0..screen.width() {
                let color = screen.get(x, y).unwrap_or(Rgb::BLACK);
                let (ch, style) = if color.is_black() {
                    (' ', CellStyle::solid(Rgb::BLACK))
                } else {
                    ('█', CellStyle::new(color, Rgb::BLACK))
                };
                let tx = x0 + 1 + x as u16 * self.cell_w;
                fb.fill_rect(tx, y0 + 1 + y as u16, self.cell_w, 1, ch, style);
            }
        }

        let inner_x = x0 + 1;
        let inner_w = box_w.saturating_sub(2);
        let footer_y = y0 + box_h;

        if let Some(text) = screen.text() {
            // Text position is the matrix column of the first glyph, negated.
            let start = inner_x as i32 - text.position;
            fb.put_str_clipped(start, footer_y, &text.text, inner_x, inner_w, TICKER);
        }

        if let Some(status) = screen.status() {
            let line = status_line(status);
            let sx = x0 + box_w.saturating_sub(line.chars().count() as u16) / 2;
            let style = CellStyle::new(status_color(status.phase), Rgb::BLACK);
            fb.put_str(sx, footer_y + 1, &line, style);
        }

        fb.put_str(x0, footer_y + 2, HINT_TEXT, HINT);
        fb
    }
}

fn status_line(status: Status) -> String {
    match status.phase {
        Phase::Idle => "PRESS ANY KEY".to_string(),
        Phase::Playing => format!("{} L{}", status.score, status.level),
        Phase::Ending => format!("OVER {}", status.score),
    }
}

fn status_color(phase: Phase) -> Rgb {
    match phase {
        Phase::Idle => Rgb::new(200, 200, 200),
        Phase::Playing => crate::types::SCORE_COLOR,
        Phase::Ending => Rgb::new(255, 80, 80),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
