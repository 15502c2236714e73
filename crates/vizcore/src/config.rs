//! Display configuration
//!
//! Loaded from the `display` block of a JSON document. Every field has a
//! default so partial documents are accepted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Canvas geometry and pacing, immutable for the renderer's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Maximum presented frames per second
    pub update_frequency: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            update_frequency: 60.0,
        }
    }
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32, update_frequency: f64) -> Self {
        Self {
            width,
            height,
            update_frequency,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VizError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        self.frame_period().map(|_| ())
    }

    /// Time budget of one frame at `update_frequency`
    pub fn frame_period(&self) -> Result<Duration> {
        frame_period(self.update_frequency)
    }
}

/// Period of a `frequency` Hz frame rate. The frequency must be positive and
/// its period must fit in a [`Duration`].
pub fn frame_period(frequency: f64) -> Result<Duration> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(VizError::InvalidConfig(format!(
            "update frequency must be positive, got {frequency}"
        )));
    }
    Duration::try_from_secs_f64(1.0 / frequency).map_err(|_| {
        VizError::InvalidConfig(format!("update frequency {frequency} is too low to pace frames"))
    })
}

/// The `display` block of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(flatten)]
    pub canvas: CanvasConfig,
    /// Window title
    pub title: String,
    /// TrueType font for the text panels; the bundled UI font when absent
    pub font_path: Option<PathBuf>,
    /// Text panel font size in pixels
    pub font_size: f32,
    /// Draw the agent panel below the run statistics when an agent snapshot is given
    pub show_agent_panel: bool,
    /// Draw the per-motor action percentages in the bottom-left corner
    pub show_action_panel: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            title: "Drone".to_string(),
            font_path: None,
            font_size: 20.0,
            show_agent_panel: true,
            show_action_panel: false,
        }
    }
}

impl DisplayConfig {
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    pub display: DisplayConfig,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl VisConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: VisConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded display configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.display.validate()?;
        self.level_filter().map(|_| ())
    }

    /// Parse `log_level` into a filter for the logger backend
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| VizError::InvalidConfig(format!("unknown log level {:?}", self.log_level)))
    }
}
