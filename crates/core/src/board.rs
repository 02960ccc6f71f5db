//! Board module - ship grid, defender, and the derived framebuffer
//!
//! The board is a `columns x rows` grid of ship hit points (0 = empty slot).
//! Ships enter at row 0 and fall towards the last row, where the defender
//! sits. Every mutation re-renders the touched slot straight into the pixel
//! framebuffer, so the framebuffer is never stale.
//!
//! Coordinates: (col, row) where col grows left to right and row grows top to
//! bottom. Each lane is `scale` pixels wide; the framebuffer is
//! `columns * scale` by `rows` pixels.

use tracing::debug;

use crate::config::ShooterConfig;
use crate::palette::{defender_color, ship_color};
use crate::rng::SimpleRng;
use crate::snapshot::PixelFrame;
use crate::types::{Direction, Rgb, MAX_HIT_POINTS};

/// Result of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new ship entered the top row
    Spawned { column: usize, hit_points: u8 },
    /// The chosen lane's top slot was taken; nothing was overwritten
    Blocked { column: usize },
}

/// The shooter board
#[derive(Debug, Clone)]
pub struct Board {
    columns: usize,
    rows: usize,
    scale: usize,
    /// Flat array of hit points, row-major order (row * columns + col)
    cells: Vec<u8>,
    defender: usize,
    defender_active: bool,
    frame: PixelFrame,
    rng: SimpleRng,
}

impl Board {
    /// Create an empty board
    ///
    /// Geometry must already be validated (see [`ShooterConfig::validate`]).
    pub fn new(columns: usize, rows: usize, scale: usize, rng: SimpleRng) -> Self {
        assert!(columns > 0 && rows > 1 && scale > 0, "invalid board geometry");
        Self {
            columns,
            rows,
            scale,
            cells: vec![0; columns * rows],
            defender: 0,
            defender_active: false,
            frame: PixelFrame::new(columns * scale, rows),
            rng,
        }
    }

    /// Build from a validated config, seeding from `config.seed` or the clock
    pub fn from_config(config: &ShooterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        };
        debug!(seed = rng.seed(), "board rng seeded");
        Self::new(config.columns, config.rows, config.scale, rng)
    }

    #[inline(always)]
    fn index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.columns && row < self.rows);
        row * self.columns + col
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn last_row(&self) -> usize {
        self.rows - 1
    }

    /// Hit points at (col, row), `None` if out of bounds
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.cells[self.index(col, row)])
    }

    pub fn defender(&self) -> usize {
        self.defender
    }

    pub fn defender_active(&self) -> bool {
        self.defender_active
    }

    /// Number of live ships
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&hp| hp > 0).count()
    }

    /// Color of the slot, with the defender drawn over the last row
    fn slot_color(&self, col: usize, row: usize) -> Rgb {
        if self.defender_active && row == self.last_row() && col == self.defender {
            defender_color()
        } else {
            ship_color(self.cells[self.index(col, row)])
        }
    }

    fn render_slot(&mut self, col: usize, row: usize) {
        let color = self.slot_color(col, row);
        for dx in 0..self.scale {
            self.frame.set(col * self.scale + dx, row, color);
        }
    }

    /// Write hit points and re-render the slot
    fn update_ship(&mut self, col: usize, row: usize, hit_points: u8) {
        let idx = self.index(col, row);
        self.cells[idx] = hit_points;
        self.render_slot(col, row);
    }

    fn update_defender(&mut self, col: usize) {
        let old = self.defender;
        self.defender = col;
        let last = self.last_row();
        self.render_slot(old, last);
        self.render_slot(col, last);
    }

    /// Clear every ship and blank the framebuffer; the defender is hidden
    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.defender_active = false;
        self.frame.fill(Rgb::BLACK);
    }

    /// Drop the defender into a random lane for a new round
    pub fn start_round(&mut self) {
        let col = self.rng.next_index(self.columns);
        self.defender_active = true;
        self.update_defender(col);
        debug!(column = col, "round started");
    }

    /// Spawn a ship in a random lane on the top row
    ///
    /// Hit points are a uniform draw from `0..=level`, clamped into
    /// `1..=MAX_HIT_POINTS`. An occupied top slot blocks the spawn.
    pub fn add_ship(&mut self, level: u32) -> SpawnOutcome {
        let column = self.rng.next_index(self.columns);
        let roll = self.rng.next_range(level.saturating_add(1).max(1));
        let hit_points = roll.clamp(1, MAX_HIT_POINTS as u32) as u8;

        if self.cells[self.index(column, 0)] > 0 {
            debug!(column, "spawn blocked");
            return SpawnOutcome::Blocked { column };
        }

        self.update_ship(column, 0, hit_points);
        debug!(column, hit_points, "spawn");
        SpawnOutcome::Spawned { column, hit_points }
    }

    /// Move every ship one row down
    ///
    /// Returns true (game over) when any lane has a ship in the last row
    /// afterwards. A ship already in the last row stays where it is, so the
    /// losing frame stays on screen. A ship whose target slot is still
    /// occupied (only possible right behind that last-row ship) waits in
    /// place; every other ship moves.
    pub fn shift_down(&mut self) -> bool {
        let last = self.last_row();
        let mut game_over = false;

        for col in 0..self.columns {
            // Bottom to top, so a ship never lands on one not yet moved.
            for row in (0..last).rev() {
                let hp = self.cells[self.index(col, row)];
                if hp > 0 && self.cells[self.index(col, row + 1)] == 0 {
                    self.update_ship(col, row + 1, hp);
                    self.update_ship(col, row, 0);
                }
            }
            if self.cells[self.index(col, last)] > 0 {
                game_over = true;
            }
        }

        game_over
    }

    /// Step the defender one lane, clamped to the board
    pub fn move_defender(&mut self, direction: Direction) {
        let col = match direction {
            Direction::Left => self.defender.saturating_sub(1),
            Direction::Right => (self.defender + 1).min(self.columns - 1),
        };
        self.update_defender(col);
    }

    /// Fire up the defender's lane
    ///
    /// The lowest ship loses one hit point. Returns true only when that
    /// destroyed it; a wounding hit or an empty lane returns false.
    pub fn shoot(&mut self) -> bool {
        let col = self.defender;
        let Some(row) = (0..self.rows)
            .rev()
            .find(|&row| self.cells[self.index(col, row)] > 0)
        else {
            return false;
        };

        let hit_points = self.cells[self.index(col, row)] - 1;
        self.update_ship(col, row, hit_points);
        hit_points == 0
    }

    /// Copy of the framebuffer
    pub fn colors(&self) -> PixelFrame {
        self.frame.clone()
    }

    /// Borrow the framebuffer without copying
    pub fn frame(&self) -> &PixelFrame {
        &self.frame
    }

    /// Put a ship at an exact slot (scripted rounds, tests)
    ///
    /// Hit points are clamped to `MAX_HIT_POINTS`; 0 clears the slot.
    /// Returns false if out of bounds.
    pub fn place_ship(&mut self, col: usize, row: usize, hit_points: u8) -> bool {
        if col >= self.columns || row >= self.rows {
            return false;
        }
        self.update_ship(col, row, hit_points.min(MAX_HIT_POINTS));
        true
    }

    /// Put the defender in an exact lane (clamped)
    pub fn set_defender(&mut self, col: usize) {
        self.update_defender(col.min(self.columns - 1));
    }
}
