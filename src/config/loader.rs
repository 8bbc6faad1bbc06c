//! Configuration file loading with precedence handling.

use crate::engine::{DisplayMode, EngineConfig};
use crate::formatter::JoinStyle;
use crate::resolver::BoundaryPolicy;
use crate::scroll::{LatchReset, ScrollPolicy, DEFAULT_TOP_PADDING};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CUESYNC_CONFIG";

/// Environment variable overriding the boundary policy.
pub const BOUNDARY_POLICY_ENV_VAR: &str = "CUESYNC_BOUNDARY_POLICY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cuesync/config.toml`:
///
/// ```toml
/// boundary_policy = "nearest-fallback"
/// join_style = "trim-after-break"
/// display_mode = "paragraph"
/// always_auto_scroll = false
/// disable_on_touch = true
/// top_padding = 50.0
/// animated_scroll = true
/// latch_reset = "source-change"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Gap policy between cues.
    #[serde(default)]
    pub boundary_policy: Option<BoundaryPolicy>,

    /// Join style after paragraph breaks.
    #[serde(default)]
    pub join_style: Option<JoinStyle>,

    /// Paragraph or list transcript.
    #[serde(default)]
    pub display_mode: Option<DisplayMode>,

    /// Scroll to the active line even when the viewport is past it.
    #[serde(default)]
    pub always_auto_scroll: Option<bool>,

    /// Stop auto-scrolling after a user touch-scroll.
    #[serde(default)]
    pub disable_on_touch: Option<bool>,

    /// Space kept above the active line.
    #[serde(default)]
    pub top_padding: Option<f64>,

    /// Animate emitted scrolls.
    #[serde(default)]
    pub animated_scroll: Option<bool>,

    /// When the touch latch re-opens.
    #[serde(default)]
    pub latch_reset: Option<LatchReset>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Gap policy between cues.
    pub boundary_policy: BoundaryPolicy,
    /// Join style after paragraph breaks.
    pub join_style: JoinStyle,
    /// Paragraph or list transcript.
    pub display_mode: DisplayMode,
    /// Always auto-scroll.
    pub always_auto_scroll: bool,
    /// Disable auto-scroll on touch.
    pub disable_on_touch: bool,
    /// Space kept above the active line.
    pub top_padding: f64,
    /// Animate emitted scrolls.
    pub animated_scroll: bool,
    /// When the touch latch re-opens.
    pub latch_reset: LatchReset,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let scroll = ScrollPolicy::default();
        Self {
            boundary_policy: BoundaryPolicy::default(),
            join_style: JoinStyle::default(),
            display_mode: DisplayMode::default(),
            always_auto_scroll: scroll.always_auto_scroll,
            disable_on_touch: scroll.disable_on_touch,
            top_padding: DEFAULT_TOP_PADDING,
            animated_scroll: scroll.animated,
            latch_reset: LatchReset::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Engine settings carried by this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            boundary_policy: self.boundary_policy,
            join_style: self.join_style,
            display_mode: self.display_mode,
            scroll: ScrollPolicy {
                always_auto_scroll: self.always_auto_scroll,
                disable_on_touch: self.disable_on_touch,
                top_padding: self.top_padding,
                animated: self.animated_scroll,
            },
            latch_reset: self.latch_reset,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cuesync/cuesync.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cuesync").join("cuesync.log")
    } else {
        PathBuf::from("cuesync.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cuesync/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cuesync").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CUESYNC_CONFIG` environment variable
/// 3. Default path `~/.config/cuesync/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `CUESYNC_BOUNDARY_POLICY`. Unrecognized values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(BOUNDARY_POLICY_ENV_VAR) {
        match raw.parse::<BoundaryPolicy>() {
            Ok(policy) => config.boundary_policy = policy,
            Err(err) => warn!(error = %err, "Ignoring {}", BOUNDARY_POLICY_ENV_VAR),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        boundary_policy: config.boundary_policy.unwrap_or(defaults.boundary_policy),
        join_style: config.join_style.unwrap_or(defaults.join_style),
        display_mode: config.display_mode.unwrap_or(defaults.display_mode),
        always_auto_scroll: config
            .always_auto_scroll
            .unwrap_or(defaults.always_auto_scroll),
        disable_on_touch: config.disable_on_touch.unwrap_or(defaults.disable_on_touch),
        top_padding: config.top_padding.unwrap_or(defaults.top_padding),
        animated_scroll: config.animated_scroll.unwrap_or(defaults.animated_scroll),
        latch_reset: config.latch_reset.unwrap_or(defaults.latch_reset),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    policy_override: Option<BoundaryPolicy>,
    display_override: Option<DisplayMode>,
    always_scroll_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(policy) = policy_override {
        config.boundary_policy = policy;
    }

    if let Some(mode) = display_override {
        config.display_mode = mode;
    }

    if let Some(always) = always_scroll_override {
        config.always_auto_scroll = always;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
