//! Configuration loading
//!
//! Read from `--config <path>`, or `<config dir>/life-planner/config.toml`
//! when that file exists. A missing default file means defaults.

use planner_model::{PlanLimits, VisionRecord};
use planner_wizard::YEAR_HORIZONS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application directory name under the platform config and data dirs
pub(crate) const APP_DIR: &str = "life-planner";

/// Default config filename
pub(crate) const CONFIG_FILENAME: &str = "config.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Planner settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlannerConfig {
    /// Directory holding one JSON file per record
    pub(crate) data_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset
    pub(crate) log_level: String,
    /// Horizon written into a new plan's vision
    pub(crate) default_years_from_now: u32,
    /// Focus-area cap
    pub(crate) max_focus_areas: usize,
    /// Priority strategies per focus area
    pub(crate) max_priority_actions: usize,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "warn".to_string(),
            default_years_from_now: VisionRecord::DEFAULT_YEARS,
            max_focus_areas: PlanLimits::DEFAULT_MAX_FOCUS_AREAS,
            max_priority_actions: PlanLimits::DEFAULT_MAX_PRIORITY_ACTIONS,
        }
    }
}

impl PlannerConfig {
    /// Load from an explicit path, or the default location if present
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/life-planner/config.toml`
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILENAME))
    }

    /// Load from a specific file
    pub(crate) fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !YEAR_HORIZONS.contains(&self.default_years_from_now) {
            return Err(ConfigError::Invalid(format!(
                "default_years_from_now must be one of {YEAR_HORIZONS:?}"
            )));
        }
        if self.max_focus_areas == 0 || self.max_priority_actions == 0 {
            return Err(ConfigError::Invalid("limits must be at least 1".into()));
        }
        Ok(())
    }

    /// With data directory
    #[must_use]
    pub(crate) fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With log level
    #[must_use]
    pub(crate) fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Limits for the record store
    pub(crate) fn limits(&self) -> PlanLimits {
        PlanLimits::new()
            .with_max_focus_areas(self.max_focus_areas)
            .with_max_priority_actions(self.max_priority_actions)
    }
}
