//! Runtime configuration
//!
//! Loaded from a JSON document with human-readable durations:
//!
//! ```json
//! {
//!   "profile": "navigation",
//!   "history_size": 5,
//!   "base_debounce": "500ms",
//!   "hold_tick": "50ms",
//!   "global_cooldown": "1500ms",
//!   "frame_buffer": 8,
//!   "holds": { "thumbs_up": 2.5 },
//!   "log": { "filter": "info,signlink_gesture=debug", "json": false }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use signlink_core::{GestureLabel, SignLinkError, SignLinkResult};
use signlink_gesture::{ClassifierThresholds, EngineConfig, GestureTable};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "SIGNLINK_LOG";

/// Which call site's gesture table and timing to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Assistant page: open hand and fist need a 2 s hold
    #[default]
    Assistant,
    /// Global page navigation: immediate actions, 1.5 s global cooldown
    Navigation,
}

/// Logging output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub profile: Profile,
    pub engine: EngineConfig,
    pub table: GestureTable,
    /// Frames buffered between detector callback and engine task
    pub frame_buffer: usize,
    pub log: LogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawThresholds {
    thumb_extension: Option<f32>,
    point_displacement: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    profile: Profile,
    history_size: Option<usize>,
    base_debounce: Option<String>,
    hold_tick: Option<String>,
    /// Duration string, or "off"
    global_cooldown: Option<String>,
    frame_buffer: Option<usize>,
    /// Hold seconds per gesture name
    holds: BTreeMap<String, f64>,
    thresholds: RawThresholds,
    log: LogConfig,
}

impl RuntimeConfig {
    /// Built-in defaults for a profile
    pub fn for_profile(profile: Profile) -> Self {
        let (engine, table) = match profile {
            Profile::Assistant => (EngineConfig::default(), GestureTable::assistant()),
            Profile::Navigation => (EngineConfig::navigation(), GestureTable::navigation()),
        };
        RuntimeConfig {
            profile,
            engine,
            table,
            frame_buffer: 8,
            log: LogConfig::default(),
        }
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> SignLinkResult<Self> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| SignLinkError::InvalidConfig(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> SignLinkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn from_raw(raw: RawConfig) -> SignLinkResult<Self> {
        let mut config = Self::for_profile(raw.profile);

        if let Some(size) = raw.history_size {
            config.engine.history_size = size;
        }
        if let Some(value) = raw.base_debounce {
            config.engine.base_debounce = parse_duration(&value)?;
        }
        if let Some(value) = raw.hold_tick {
            config.engine.hold_tick = parse_duration(&value)?;
        }
        if let Some(value) = raw.global_cooldown {
            config.engine.global_cooldown = match value.trim() {
                "off" | "none" => None,
                other => Some(parse_duration(other)?),
            };
        }
        if let Some(buffer) = raw.frame_buffer {
            if buffer == 0 {
                return Err(SignLinkError::InvalidConfig(
                    "frame_buffer must be at least 1".to_string(),
                ));
            }
            config.frame_buffer = buffer;
        }

        let defaults = ClassifierThresholds::default();
        config.engine.thresholds = ClassifierThresholds {
            thumb_extension: raw.thresholds.thumb_extension.unwrap_or(defaults.thumb_extension),
            point_displacement: raw
                .thresholds
                .point_displacement
                .unwrap_or(defaults.point_displacement),
        };

        for (name, seconds) in &raw.holds {
            let label: GestureLabel = name.parse()?;
            config.table = config.table.with_hold_secs(label, *seconds)?;
        }

        config.log = raw.log;
        config.engine.validate()?;
        Ok(config)
    }

    /// Apply `SIGNLINK_LOG` if set
    pub fn apply_env(self) -> Self {
        let filter = std::env::var(LOG_ENV).ok();
        self.with_log_override(filter)
    }

    pub fn with_log_override(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.log.filter = filter;
        }
        self
    }
}

fn parse_duration(value: &str) -> SignLinkResult<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| SignLinkError::InvalidDuration {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
