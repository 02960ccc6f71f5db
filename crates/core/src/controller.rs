//! Game controller - the tick-driven state machine
//!
//! Owns simulation time, the gravity/spawn/scroll cadences, score and level,
//! and the idle → playing → ending lifecycle. It drives the [`Board`] only
//! through its public operations.
//!
//! Call [`Controller::tick`] once per frame and [`Controller::on_button`] for
//! each queued input, both from the same loop. Nothing here sleeps: the
//! pauses at the end of a round are deadlines in simulation time.

use tracing::{debug, info};

use crate::board::Board;
use crate::clock::{Cadence, SimClock};
use crate::config::{ConfigError, ShooterConfig};
use crate::notify::{Milestone, Notifier};
use crate::snapshot::{PixelFrame, ScrollText};
use crate::types::{
    Button, Direction, Rgb, GAME_OVER_TEXT, GLYPH_ADVANCE, IDLE_TEXT, SCORE_COLOR, TEXT_START_POS,
};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a player; "P L A Y" scrolls
    Idle,
    /// Round in progress
    Playing,
    /// Round lost; losing frame, then the score message
    Ending,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Ending => "ending",
        }
    }
}

/// Sub-steps of the ending phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndStage {
    /// Blank board stays up until the deadline
    Viewing { until_ms: u64 },
    /// Score message crossing the display
    Scrolling,
    /// Message gone, waiting before going idle
    Holding { until_ms: u64 },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Gravity, spawn or round-end reset changed the board this tick
    pub update: bool,
    /// The composed display or overlay changed and should be forwarded
    pub redraw: bool,
    /// Phase after the tick
    pub phase: Phase,
}

/// Score line for status displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
}

pub struct Controller {
    config: ShooterConfig,
    board: Board,
    clock: SimClock,
    phase: Phase,
    /// Set on the game-over tick, consumed by the next ending tick
    entering_end: bool,
    end_stage: EndStage,
    score: u32,
    level: u32,
    anim_step_ms: u64,
    gravity: Cadence,
    spawn: Cadence,
    scroll: Cadence,
    text_pos: i32,
    redraw_pending: bool,
    /// Board shifted below the reserved rows, plus the score bits
    display: PixelFrame,
    notifier: Box<dyn Notifier + Send>,
}

impl Controller {
    /// Validate `config` and build an idle controller with a fresh board
    pub fn new(
        config: ShooterConfig,
        notifier: impl Notifier + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::from_config(&config);
        Ok(Self {
            clock: SimClock::new(config.framerate),
            display: PixelFrame::new(config.pixel_width(), config.display_height()),
            anim_step_ms: config.start_anim_step_ms(),
            board,
            phase: Phase::Idle,
            entering_end: false,
            end_stage: EndStage::Scrolling,
            score: 0,
            level: 1,
            gravity: Cadence::default(),
            spawn: Cadence::default(),
            scroll: Cadence::default(),
            text_pos: TEXT_START_POS,
            redraw_pending: true,
            notifier: Box::new(notifier),
            config,
        })
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current gravity interval
    pub fn anim_step_ms(&self) -> u64 {
        self.anim_step_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// True between the game-over tick and the tick that clears the board
    pub fn entering_end(&self) -> bool {
        self.entering_end
    }

    pub fn status(&self) -> Status {
        Status {
            phase: self.phase,
            score: self.score,
            level: self.level,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Scripted-round hook: mutable board access outside normal play.
    ///
    /// Not part of the game API. Any change made through it is shown on the
    /// next tick.
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        self.redraw_pending = true;
        &mut self.board
    }

    /// Last composed display (refreshed on ticks that report `redraw`)
    pub fn display(&self) -> &PixelFrame {
        &self.display
    }

    /// Scrolling text to draw over the display, if any
    pub fn overlay_text(&self) -> Option<ScrollText> {
        let text = match (self.phase, self.end_stage) {
            (Phase::Idle, _) => IDLE_TEXT.to_string(),
            (Phase::Ending, EndStage::Scrolling) if !self.entering_end => self.game_over_text(),
            _ => return None,
        };
        Some(ScrollText {
            text,
            position: self.text_pos,
        })
    }

    fn game_over_text(&self) -> String {
        format!("{}{}", GAME_OVER_TEXT, self.score)
    }

    /// Handle one arcade button
    ///
    /// Idle or ending: any button starts a round. Playing: move or fire.
    pub fn on_button(&mut self, button: Button) {
        match (self.phase, button) {
            (Phase::Idle | Phase::Ending, _) => self.start_game(),
            (Phase::Playing, Button::Left) => self.board.move_defender(Direction::Left),
            (Phase::Playing, Button::Right) => self.board.move_defender(Direction::Right),
            (Phase::Playing, Button::Fire) => self.fire(),
        }
        self.redraw_pending = true;
    }

    fn start_game(&mut self) {
        let now = self.clock.now_ms();
        self.board.reset();
        self.board.start_round();
        self.score = 0;
        self.level = 1;
        self.anim_step_ms = self.config.start_anim_step_ms();
        self.gravity.rearm(now);
        self.spawn.rearm(now);
        self.text_pos = TEXT_START_POS;
        self.entering_end = false;
        self.phase = Phase::Playing;
        info!("new game starting");
        self.notifier.notify(Milestone::GameStarted);
    }

    fn fire(&mut self) {
        if !self.board.shoot() {
            return;
        }
        self.score += 1;
        self.level = self.config.level_for_score(self.score);
        self.anim_step_ms = self.config.anim_step_for_level(self.level);
        debug!(score = self.score, level = self.level, "hit");
        self.notifier.notify(Milestone::ScoreChanged {
            score: self.score,
            level: self.level,
        });
    }

    /// Advance one tick of `1 / framerate` seconds
    pub fn tick(&mut self) -> TickReport {
        self.clock.advance();
        let now = self.clock.now_ms();

        let update = match self.phase {
            Phase::Idle => {
                self.step_idle(now);
                false
            }
            Phase::Playing => self.step_playing(now),
            Phase::Ending => self.step_ending(now),
        };

        let redraw = update || std::mem::take(&mut self.redraw_pending);
        if redraw {
            self.compose_display();
        }

        TickReport {
            update,
            redraw,
            phase: self.phase,
        }
    }

    fn step_idle(&mut self, now: u64) {
        if !self.scroll.fire(now, self.config.scroll_step_ms) {
            return;
        }
        self.text_pos += 1;
        // Full text width plus about a second of blank display.
        let wrap = GLYPH_ADVANCE * IDLE_TEXT.len() as i32
            + (1000 / self.config.scroll_step_ms.max(1)) as i32;
        if self.text_pos > wrap {
            self.text_pos = TEXT_START_POS;
        }
        self.redraw_pending = true;
    }

    fn step_playing(&mut self, now: u64) -> bool {
        let mut update = false;

        if self.gravity.fire(now, self.anim_step_ms) {
            update = true;
            if self.board.shift_down() {
                // Keep the losing frame; the next tick clears it.
                info!(score = self.score, "game over");
                self.notifier
                    .notify(Milestone::GameOver { score: self.score });
                self.entering_end = true;
                self.phase = Phase::Ending;
                return true;
            }
        }

        if self.spawn.fire(now, self.config.spawn_step_ms) {
            update = true;
            self.board.add_ship(self.level);
        }

        update
    }

    fn step_ending(&mut self, now: u64) -> bool {
        if self.entering_end {
            self.entering_end = false;
            self.board.reset();
            self.end_stage = EndStage::Viewing {
                until_ms: now + self.config.end_view_pause_ms,
            };
            return true;
        }

        match self.end_stage {
            EndStage::Viewing { until_ms } => {
                if now >= until_ms {
                    self.end_stage = EndStage::Scrolling;
                    self.text_pos = TEXT_START_POS;
                    self.scroll.rearm(now);
                    self.redraw_pending = true;
                }
            }
            EndStage::Scrolling => {
                if self.scroll.fire(now, self.config.scroll_step_ms) {
                    self.text_pos += 1;
                    let len = self.game_over_text().len() as i32;
                    if self.text_pos > GLYPH_ADVANCE * len + 8 {
                        self.end_stage = EndStage::Holding {
                            until_ms: now + self.config.end_hold_pause_ms,
                        };
                    }
                    self.redraw_pending = true;
                }
            }
            EndStage::Holding { until_ms } => {
                if now >= until_ms {
                    debug!("back to idle");
                    self.phase = Phase::Idle;
                    self.text_pos = TEXT_START_POS;
                    self.scroll.rearm(now);
                    self.redraw_pending = true;
                }
            }
        }

        false
    }

    /// Rebuild the display: board under the reserved rows, score bits on top
    fn compose_display(&mut self) {
        self.display.fill(Rgb::BLACK);
        self.display
            .blit_rows(self.board.frame(), self.config.vertical_offset);

        if self.phase == Phase::Idle || self.config.vertical_offset == 0 {
            return;
        }
        // Bit i lights x = width - 1 - i: least significant bit on the right.
        let width = self.display.width();
        for bit in 0..width.min(u32::BITS as usize) {
            if self.score & (1 << bit) != 0 {
                self.display.set(width - 1 - bit, 0, SCORE_COLOR);
            }
        }
    }
}
