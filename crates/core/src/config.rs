//! Game configuration.
//!
//! Defaults reproduce the reference arcade tuning (see the crate-level
//! constants in `types`). A JSON file named by `SHOOTER_CONFIG` may override
//! any field, and `SHOOTER_FRAMERATE` / `SHOOTER_SEED` override those two on
//! top of that. Every path ends in [`ShooterConfig::validate`], so a config
//! that reaches the board is known to fit the display.

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    ANIM_STEP_PER_LEVEL_MS, BASE_ANIM_STEP_MS, DEFAULT_FRAMERATE, END_HOLD_PAUSE_MS,
    END_VIEW_PAUSE_MS, GRID_COLUMNS, GRID_ROWS, LEVEL_DIFFERENCE, MAX_DISPLAY_HEIGHT,
    MAX_DISPLAY_WIDTH, MIN_ANIM_STEP_MS, PIXEL_SCALE, SCROLL_STEP_MS, SPAWN_STEP_MS,
    VERTICAL_OFFSET,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("base_anim_step_ms {base} is below the {floor} ms gravity floor")]
    StepBelowFloor { base: u64, floor: u64 },
    #[error("grid needs at least 2 rows, got {0}")]
    TooFewRows(usize),
    #[error("matrix is {width}x{height} pixels but the display allows at most {max_width}x{max_height}")]
    DoesNotFit {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },
}

/// Geometry, pacing and difficulty of one shooter instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShooterConfig {
    /// Ship lanes (also the defender's reachable columns)
    pub columns: usize,
    /// Ship slots per lane; the last one is the defender's row
    pub rows: usize,
    /// Pixel columns per lane
    pub scale: usize,
    /// Pixel rows above the grid; the top one carries the score bits
    pub vertical_offset: usize,
    pub max_display_width: usize,
    pub max_display_height: usize,
    /// Ticks per second
    pub framerate: u32,
    pub level_difference: u32,
    pub base_anim_step_ms: u64,
    pub anim_step_per_level_ms: u64,
    pub min_anim_step_ms: u64,
    pub spawn_step_ms: u64,
    pub scroll_step_ms: u64,
    pub end_view_pause_ms: u64,
    pub end_hold_pause_ms: u64,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u32>,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            scale: PIXEL_SCALE,
            vertical_offset: VERTICAL_OFFSET,
            max_display_width: MAX_DISPLAY_WIDTH,
            max_display_height: MAX_DISPLAY_HEIGHT,
            framerate: DEFAULT_FRAMERATE,
            level_difference: LEVEL_DIFFERENCE,
            base_anim_step_ms: BASE_ANIM_STEP_MS,
            anim_step_per_level_ms: ANIM_STEP_PER_LEVEL_MS,
            min_anim_step_ms: MIN_ANIM_STEP_MS,
            spawn_step_ms: SPAWN_STEP_MS,
            scroll_step_ms: SCROLL_STEP_MS,
            end_view_pause_ms: END_VIEW_PAUSE_MS,
            end_hold_pause_ms: END_HOLD_PAUSE_MS,
            seed: None,
        }
    }
}

impl ShooterConfig {
    /// Load from the environment (file + overrides) and validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("SHOOTER_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };

        if let Ok(v) = env::var("SHOOTER_FRAMERATE") {
            config.framerate = parse_env("SHOOTER_FRAMERATE", &v)?;
        }
        if let Ok(v) = env::var("SHOOTER_SEED") {
            config.seed = Some(parse_env("SHOOTER_SEED", &v)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reject configurations the board or the display cannot hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nonzero: [(&'static str, u64); 6] = [
            ("columns", self.columns as u64),
            ("scale", self.scale as u64),
            ("framerate", self.framerate as u64),
            ("level_difference", self.level_difference as u64),
            ("min_anim_step_ms", self.min_anim_step_ms),
            ("scroll_step_ms", self.scroll_step_ms),
        ];
        if let Some(&(field, _)) = nonzero.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Zero { field });
        }
        if self.base_anim_step_ms < self.min_anim_step_ms {
            return Err(ConfigError::StepBelowFloor {
                base: self.base_anim_step_ms,
                floor: self.min_anim_step_ms,
            });
        }
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.pixel_width() > self.max_display_width
            || self.display_height() > self.max_display_height
        {
            return Err(ConfigError::DoesNotFit {
                width: self.pixel_width(),
                height: self.display_height(),
                max_width: self.max_display_width,
                max_height: self.max_display_height,
            });
        }
        Ok(())
    }

    /// Board framebuffer width in pixels
    pub fn pixel_width(&self) -> usize {
        self.columns * self.scale
    }

    /// Full display height including the reserved rows
    pub fn display_height(&self) -> usize {
        self.rows + self.vertical_offset
    }

    /// Wall-clock length of one tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.framerate.max(1) as u64)
    }

    /// Gravity interval at game start, before any kill
    pub fn start_anim_step_ms(&self) -> u64 {
        self.base_anim_step_ms.max(self.min_anim_step_ms)
    }

    /// Gravity interval at `level`, never below the floor
    pub fn anim_step_for_level(&self, level: u32) -> u64 {
        self.base_anim_step_ms
            .saturating_sub(self.anim_step_per_level_ms.saturating_mul(level as u64))
            .max(self.min_anim_step_ms)
    }

    /// Level reached with `score` kills
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.level_difference.max(1) + 1
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        var,
        value: value.to_string(),
    })
}
