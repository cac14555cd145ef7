//! Stage configuration
//!
//! Every field has a default, so an empty RON document (`()`) is a valid
//! configuration:
//!
//! ```ron
//! (
//!     latency_offset: 0.3,
//!     transition: Slow,
//!     visibility: (bridge: 4.0),
//! )
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How quickly instruments of one family slide into their stacked slots
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionSpeed {
    /// Snap straight to the target slot
    None,
    Fast,
    #[default]
    Normal,
    Slow,
}

impl TransitionSpeed {
    /// Easing divisor, `None` for an instant move
    pub fn divisor(&self) -> Option<f64> {
        match self {
            TransitionSpeed::None => None,
            TransitionSpeed::Fast => Some(200.0),
            TransitionSpeed::Normal => Some(500.0),
            TransitionSpeed::Slow => Some(1000.0),
        }
    }
}

/// When a melodic instrument is on stage, in seconds around its hits
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    /// Appear this long before the next hit
    pub lead: f64,
    /// Stay this long after the previous hit
    pub tail: f64,
    /// Stay through gaps between hits shorter than this
    pub bridge: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            lead: 1.0,
            tail: 1.0,
            bridge: 7.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Seconds the transport is started ahead of the frame clock
    pub latency_offset: f64,
    /// Countdown before playback, in seconds
    pub pre_roll: f64,
    /// The first frame longer than this is treated as a loading stall
    pub stall_threshold: f64,
    /// Seconds the session keeps running after the last event
    pub end_padding: f64,
    pub transition: TransitionSpeed,
    pub visibility: VisibilityConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            latency_offset: 0.25,
            pre_roll: 2.0,
            stall_threshold: 1.0,
            end_padding: 3.0,
            transition: TransitionSpeed::default(),
            visibility: VisibilityConfig::default(),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(feature = "serde")]
impl StageConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source)?;
        log::info!(target: "config", "loaded stage config from {}", path.display());
        Ok(config)
    }
}
