//! Configuration for the covtrack TUI.
//!
//! A flat TOML file under the platform config dir, overridden by
//! `COVTRACK_*` environment variables, then translated into
//! `covtrack_core::TrackerConfig`. CLI flags are layered on top by the
//! binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use covtrack_core::{Metric, SelectionState, TimeWindow, TrackerConfig};

/// Prefix for environment overrides, e.g. `COVTRACK_BASE_URL`.
pub const ENV_PREFIX: &str = "COVTRACK_";

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

// ── TOML config ─────────────────────────────────────────────────────

/// Everything `config.toml` may contain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// API root; must end up resolving `us/daily.json` beneath it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Metric shown when data first loads.
    #[serde(default)]
    pub default_metric: Metric,

    /// Time window shown when data first loads.
    #[serde(default)]
    pub default_window: TimeWindow,

    /// Log file; the binary falls back to `covtrack.log` in the temp dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            default_metric: Metric::default(),
            default_window: TimeWindow::default(),
            log_file: None,
        }
    }
}

fn default_base_url() -> String {
    covtrack_core::DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Validate and translate into the runtime config core consumes.
    pub fn to_tracker_config(&self) -> Result<TrackerConfig, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("{e}: {}", self.base_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected http or https, got '{}'", base_url.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(TrackerConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            default_selection: SelectionState::new(self.default_metric, self.default_window),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "covtrack", "covtrack").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("covtrack");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still honoring `COVTRACK_*` overrides.
/// A missing file is not an error; defaults fill in.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.base_url, "https://api.covidtracking.com/v1/");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.default_metric, Metric::Positive);
        assert_eq!(cfg.default_window, TimeWindow::All);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_metric = \"death\"\ndefault_window = \"week\"\n").unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.default_metric, Metric::Death);
        assert_eq!(cfg.default_window, TimeWindow::Week);
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn max_is_accepted_for_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_window = \"max\"\n").unwrap();
        assert_eq!(load_config_from(&path).unwrap().default_window, TimeWindow::All);
    }

    #[test]
    fn bad_value_is_a_figment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_metric = \"recovered\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            base_url: "http://localhost:8080/v1/".into(),
            timeout_secs: 5,
            default_metric: Metric::Negative,
            default_window: TimeWindow::Month,
            log_file: Some(PathBuf::from("/tmp/covtrack.log")),
        };

        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn translates_to_tracker_config() {
        let cfg = Config {
            timeout_secs: 12,
            default_metric: Metric::Death,
            ..Config::default()
        };
        let tracker = cfg.to_tracker_config().unwrap();
        assert_eq!(tracker.timeout, Duration::from_secs(12));
        assert_eq!(tracker.default_selection.metric, Metric::Death);
        assert_eq!(tracker.base_url.as_str(), "https://api.covidtracking.com/v1/");
    }

    #[test]
    fn rejects_bad_base_url() {
        let cfg = Config {
            base_url: "ftp://example.com/".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.to_tracker_config(),
            Err(ConfigError::Validation { ref field, .. }) if field == "base_url"
        ));

        let cfg = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(cfg.to_tracker_config().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(cfg.to_tracker_config().is_err());
    }
}
