// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interceptor configuration.
//!
//! There are two shapes here:
//!
//! * [`Settings`] is the raw, externally bound form: an `enabled` flag and a free-form
//!   `level` string.  It derives [`serde::Deserialize`], so it can be read out of whatever
//!   configuration format the host application already uses, or out of the process
//!   environment with [`Settings::from_env`].
//! * [`Config`] is the normalized form the interceptor actually consults.  The level has
//!   been parsed into a [`Severity`] exactly once, and the value is immutable from then on.
//!
//! Resolving never fails.  A level that names no severity falls back to the default level,
//! and the resolution reports a [`ConfigFallback`] so the caller can say so.
//!
//! ```
//! use callwise::{Config, Settings, Severity};
//!
//! let settings = Settings { level: "debug".to_string(), ..Settings::default() };
//! let (config, fallback) = settings.resolve();
//! assert!(fallback.is_none());
//! assert_eq!(config.minimum_level(), Severity::Debug);
//!
//! let settings = Settings { level: "loud".to_string(), ..Settings::default() };
//! let (config, fallback) = settings.resolve();
//! assert_eq!(config.minimum_level(), Severity::Info);
//! assert_eq!(fallback.unwrap().rejected(), "loud");
//! ```

use crate::severity::{ParseSeverityError, Severity};
use serde::Deserialize;

/// Environment variable read by [`Settings::from_env`] for the enabled flag.
pub const ENABLED_VAR: &str = "LOG_ENABLED";
/// Environment variable read by [`Settings::from_env`] for the level.
pub const LEVEL_VAR: &str = "LOG_LEVEL";

/// How a record's severity is compared against the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// A record is emitted only when its severity equals the configured level.
    ///
    /// Configuring `INFO` suppresses `DEBUG` records *and* the `ERROR` records of
    /// exception advice.  This is the compatible behavior and the default.
    #[default]
    ExactMatch,
    /// A record is emitted when its severity is at or above the configured level.
    Threshold,
}

/**
Normalized interceptor configuration.

Built once at startup and shared by reference; nothing mutates it afterwards.  To change
configuration, build a new [`Interceptor`](crate::Interceptor).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    enabled: bool,
    level: Severity,
    mode: GateMode,
}

impl Config {
    /// A configuration using [`GateMode::ExactMatch`].
    pub const fn new(enabled: bool, level: Severity) -> Self {
        Self {
            enabled,
            level,
            mode: GateMode::ExactMatch,
        }
    }

    /// A copy of this configuration with a different gate.
    pub const fn with_mode(self, mode: GateMode) -> Self {
        Self { mode, ..self }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn minimum_level(&self) -> Severity {
        self.level
    }

    pub const fn mode(&self) -> GateMode {
        self.mode
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(true, Severity::Info)
    }
}

/// Raw configuration, as bound from an external source.
///
/// Missing keys take their defaults: enabled, `"INFO"`, exact-match gating.
///
/// ```
/// # use callwise::{GateMode, Settings};
/// let json = r#"{"level": "error", "mode": "threshold"}"#;
/// let settings: Settings = serde_json::from_str(json).unwrap();
/// assert!(settings.enabled);
/// assert_eq!(settings.mode, GateMode::Threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enabled: bool,
    pub level: String,
    pub mode: GateMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Severity::default().as_str().to_string(),
            mode: GateMode::default(),
        }
    }
}

impl Settings {
    /**
    Reads [`ENABLED_VAR`] and [`LEVEL_VAR`] from the process environment.

    Unset variables keep their defaults.  An enabled flag other than `true`/`false`
    (any case) also keeps the default; the level is kept verbatim and checked by
    [`Settings::resolve`].
    */
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(enabled) = lookup(ENABLED_VAR) {
            let enabled = enabled.trim();
            if enabled.eq_ignore_ascii_case("true") {
                settings.enabled = true;
            } else if enabled.eq_ignore_ascii_case("false") {
                settings.enabled = false;
            }
        }
        if let Some(level) = lookup(LEVEL_VAR) {
            settings.level = level;
        }
        settings
    }

    /// Normalizes these settings into a [`Config`].
    ///
    /// An unrecognized level resolves to the default level, and the second element
    /// describes what was rejected.
    pub fn resolve(&self) -> (Config, Option<ConfigFallback>) {
        match self.level.parse::<Severity>() {
            Ok(level) => (Config::new(self.enabled, level).with_mode(self.mode), None),
            Err(error) => {
                let level = Severity::default();
                let config = Config::new(self.enabled, level).with_mode(self.mode);
                (config, Some(ConfigFallback { error, level }))
            }
        }
    }
}

/// Describes a level that could not be parsed and the level used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFallback {
    error: ParseSeverityError,
    level: Severity,
}

impl ConfigFallback {
    /// The level string that was rejected.
    pub fn rejected(&self) -> &str {
        self.error.input()
    }

    /// The level used in its place.
    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn error(&self) -> &ParseSeverityError {
        &self.error
    }
}
