//! TOML Configuration File Support
//!
//! Loads the switcher's tunables from `~/.config/tabswitch/tabswitch.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [header]
//! height = 100.0
//! content_top = 20.0
//! clamp = "none"
//!
//! [transition]
//! duration_ms = 700
//! completion_threshold = 0.5
//! easing = "ease_in_out"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::EasingFunction;
use crate::header::HeaderClamp;

/// Default header height (also the scroll inset given to every screen)
pub const DEFAULT_HEADER_HEIGHT: f32 = 100.0;

/// Default timed slide duration
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(700);

/// Progress a swipe must exceed to complete on release
pub const DEFAULT_COMPLETION_THRESHOLD: f32 = 0.5;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Structures
// =============================================================================

/// `[header]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderToml {
    /// Header height and screen inset
    pub height: Option<f32>,

    /// Resting top edge of the header's content area
    pub content_top: Option<f32>,

    /// Header clamp policy
    pub clamp: Option<HeaderClamp>,
}

/// `[transition]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionToml {
    /// Timed slide duration in milliseconds
    pub duration_ms: Option<u64>,

    /// Swipe completion threshold (exclusive)
    pub completion_threshold: Option<f32>,

    /// Timed slide easing
    pub easing: Option<EasingFunction>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSwitchToml {
    /// Header section
    pub header: HeaderToml,

    /// Transition section
    pub transition: TransitionToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Resolved switcher configuration
#[derive(Clone, Debug, PartialEq)]
pub struct NavigatorConfig {
    /// Header height; every registered screen gets this as its top inset
    pub header_height: f32,

    /// Resting top edge of the header's content area
    pub content_top: f32,

    /// Bounds applied to the header's vertical position
    pub header_clamp: HeaderClamp,

    /// Timed slide duration
    pub animation_duration: Duration,

    /// Progress a swipe must exceed to complete on release
    pub completion_threshold: f32,

    /// Timed slide easing
    pub easing: EasingFunction,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            content_top: 0.0,
            header_clamp: HeaderClamp::None,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            easing: EasingFunction::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl NavigatorConfig {
    /// Primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.header_height.is_finite() && self.header_height > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "header height must be positive, got {}",
                self.header_height
            )));
        }
        if self.animation_duration.is_zero() {
            return Err(ConfigError::ValidationError(
                "animation duration must be non-zero".to_string(),
            ));
        }
        if !(self.completion_threshold > 0.0 && self.completion_threshold < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "completion threshold must be between 0 and 1, got {}",
                self.completion_threshold
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default configuration file path
///
/// `$XDG_CONFIG_HOME/tabswitch/tabswitch.toml`, or the platform equivalent.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tabswitch").join("tabswitch.toml"))
}

/// Load configuration from the default path, environment, and defaults
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resolved values are out of range.
pub fn load_config() -> Result<NavigatorConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// A missing file is not an error; defaults and environment are used.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// resolved values are out of range.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<NavigatorConfig, ConfigError> {
    load_with_env(path, |name| std::env::var(name).ok())
}

fn load_with_env(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<NavigatorConfig, ConfigError> {
    let mut config = NavigatorConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: TabSwitchToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut NavigatorConfig, toml: &TabSwitchToml) {
    if let Some(height) = toml.header.height {
        config.header_height = height;
    }
    if let Some(top) = toml.header.content_top {
        config.content_top = top;
    }
    if let Some(clamp) = toml.header.clamp {
        config.header_clamp = clamp;
    }
    if let Some(ms) = toml.transition.duration_ms {
        config.animation_duration = Duration::from_millis(ms);
    }
    if let Some(threshold) = toml.transition.completion_threshold {
        config.completion_threshold = threshold;
    }
    if let Some(easing) = toml.transition.easing {
        config.easing = easing;
    }
}

fn env_parse<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

fn apply_env_config(config: &mut NavigatorConfig, env: impl Fn(&str) -> Option<String>) {
    let mut touched = false;

    if let Some(height) = env_parse::<f32>(&env, "TABSWITCH_HEADER_HEIGHT") {
        config.header_height = height;
        touched = true;
    }
    if let Some(top) = env_parse::<f32>(&env, "TABSWITCH_CONTENT_TOP") {
        config.content_top = top;
        touched = true;
    }
    if let Some(ms) = env_parse::<u64>(&env, "TABSWITCH_DURATION_MS") {
        config.animation_duration = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(threshold) = env_parse::<f32>(&env, "TABSWITCH_COMPLETION_THRESHOLD") {
        config.completion_threshold = threshold;
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
    }
}

/// CLI-level overrides, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Header height override
    pub header_height: Option<f32>,
    /// Content top override
    pub content_top: Option<f32>,
    /// Duration override in milliseconds
    pub duration_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the header height
    #[must_use]
    pub fn with_header_height(mut self, height: f32) -> Self {
        self.header_height = Some(height);
        self
    }

    /// Override the timed slide duration
    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Apply to a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an override puts a value out of range.
    pub fn apply(&self, config: &mut NavigatorConfig) -> Result<(), ConfigError> {
        let mut touched = false;
        if let Some(height) = self.header_height {
            config.header_height = height;
            touched = true;
        }
        if let Some(top) = self.content_top {
            config.content_top = top;
            touched = true;
        }
        if let Some(ms) = self.duration_ms {
            config.animation_duration = Duration::from_millis(ms);
            touched = true;
        }
        if touched {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}
