//! Shared preferences for the mutectl CLI and TUI.
//!
//! One flat TOML file, merged with `MUTECTL_*` environment variables.
//! Both binaries read the same file; the CLI's `config` command is the
//! only thing that writes it. Consumers receive a validated [`Preferences`]
//! value — nothing in the client layer reads configuration ambiently.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Preferences ─────────────────────────────────────────────────────

/// Process-wide configuration, read-only from the client's perspective.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)] // mirrors the controller's preference surface
pub struct Preferences {
    /// Controller base URL.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Status poll cadence for the live view, in seconds.
    #[serde(default = "default_refresh_interval")]
    pub status_refresh_interval: u64,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Ask before leaving a meeting.
    #[serde(default = "default_true")]
    pub confirm_leave: bool,

    /// Ask before toggling the microphone while presenting or recording.
    #[serde(default = "default_true")]
    pub confirm_mute_in_presentation: bool,

    /// Ask before toggling the camera while presenting or recording.
    #[serde(default = "default_true")]
    pub confirm_video_in_presentation: bool,

    /// Emit outcome notices after commands. Errors always surface.
    #[serde(default = "default_true")]
    pub show_toasts: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            status_refresh_interval: default_refresh_interval(),
            timeout: default_timeout(),
            confirm_leave: true,
            confirm_mute_in_presentation: true,
            confirm_video_in_presentation: true,
            show_toasts: true,
        }
    }
}

fn default_api_endpoint() -> String {
    "http://localhost:3491".into()
}
fn default_refresh_interval() -> u64 {
    1
}
fn default_timeout() -> u64 {
    3
}
fn default_true() -> bool {
    true
}

impl Preferences {
    /// Check cross-field invariants after loading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api_endpoint).is_err() {
            return Err(ConfigError::Validation {
                field: "api_endpoint".into(),
                reason: format!("not a valid URL: {}", self.api_endpoint),
            });
        }
        if self.status_refresh_interval == 0 {
            return Err(ConfigError::Validation {
                field: "status_refresh_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "mutectl", "mutectl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("mutectl");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load preferences from defaults + config file + environment, validated.
pub fn load_preferences() -> Result<Preferences, ConfigError> {
    load_preferences_from(&config_path())
}

/// Load preferences from an explicit file path (testing seam).
pub fn load_preferences_from(path: &Path) -> Result<Preferences, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Preferences::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MUTECTL_"));

    let prefs: Preferences = figment.extract()?;
    prefs.validate()?;
    Ok(prefs)
}

/// Load preferences, falling back to defaults when the file is absent or bad.
pub fn load_preferences_or_default() -> Preferences {
    load_preferences().unwrap_or_default()
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize preferences to TOML and write to the canonical config path.
pub fn save_preferences(prefs: &Preferences) -> Result<(), ConfigError> {
    save_preferences_to(prefs, &config_path())
}

/// Write preferences to an explicit path (testing seam).
pub fn save_preferences_to(prefs: &Preferences, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(prefs)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{Preferences, load_preferences_from, save_preferences_to};

    #[test]
    fn defaults_point_at_localhost() {
        let prefs = Preferences::default();
        assert_eq!(prefs.api_endpoint, "http://localhost:3491");
        assert_eq!(prefs.status_refresh_interval, 1);
        assert_eq!(prefs.timeout, 3);
        assert!(prefs.confirm_leave);
        assert!(prefs.show_toasts);
        prefs.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let prefs: Preferences =
            toml::from_str("api_endpoint = \"http://10.0.0.5:3491\"\nconfirm_leave = false\n")
                .unwrap();
        assert_eq!(prefs.api_endpoint, "http://10.0.0.5:3491");
        assert!(!prefs.confirm_leave);
        assert_eq!(prefs.status_refresh_interval, 1);
        assert!(prefs.confirm_mute_in_presentation);
    }

    #[test]
    fn bad_endpoint_fails_validation() {
        let prefs = Preferences {
            api_endpoint: "not a url".into(),
            ..Preferences::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let prefs = Preferences {
            status_refresh_interval: 0,
            ..Preferences::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let prefs = Preferences {
            status_refresh_interval: 5,
            show_toasts: false,
            ..Preferences::default()
        };
        save_preferences_to(&prefs, &path).unwrap();

        let loaded = load_preferences_from(&path).unwrap();
        assert_eq!(loaded.status_refresh_interval, 5);
        assert!(!loaded.show_toasts);
        assert_eq!(loaded.api_endpoint, prefs.api_endpoint);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");
        let loaded = load_preferences_from(&path).unwrap();
        assert_eq!(loaded.api_endpoint, Preferences::default().api_endpoint);
    }
}
