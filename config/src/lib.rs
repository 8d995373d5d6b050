//! Configuration loading for Moebius.
//!
//! `~/.moebius/config.toml` is parsed into raw structs with `Option` fields,
//! then resolved into validated [`EvalSettings`]. A missing file means
//! defaults; an unreadable or malformed file is reported and the caller
//! falls back to defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use moebius_types::{EvalSettings, SettingsError, Strategy};

/// Overrides `[eval] step_budget` when set to a positive integer.
pub const STEP_BUDGET_ENV: &str = "MOEBIUS_STEP_BUDGET";

const DEFAULT_CONSTANT: &str = "pi";
const DEFAULT_MAX_PRECISION: u32 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct MoebiusConfig {
    pub eval: Option<EvalConfig>,
    pub demo: Option<DemoConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvalConfig {
    /// `fair`, `refine` or `overlap`.
    pub strategy: Option<String>,
    /// Absorption steps per evaluation; absent means unlimited.
    pub step_budget: Option<u64>,
    pub max_nesting: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DemoConfig {
    pub constant: Option<String>,
    pub max_precision: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [eval] settings: {0}")]
    Invalid(#[from] SettingsError),
}

impl MoebiusConfig {
    /// Loads the user config. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolved evaluation settings, honouring [`STEP_BUDGET_ENV`].
    pub fn eval_settings(&self) -> Result<EvalSettings, ConfigError> {
        self.resolve_eval(step_budget_override())
    }

    fn resolve_eval(&self, budget_override: Option<u64>) -> Result<EvalSettings, ConfigError> {
        let eval = self.eval.as_ref();
        let strategy = match eval.and_then(|e| e.strategy.as_deref()) {
            Some(raw) => Strategy::parse(raw).unwrap_or_else(|| {
                tracing::warn!("Unknown strategy in config: {raw}");
                Strategy::default()
            }),
            None => Strategy::default(),
        };
        let step_budget = budget_override.or(eval.and_then(|e| e.step_budget));
        let max_nesting = eval.and_then(|e| e.max_nesting);
        Ok(EvalSettings::resolve(strategy, step_budget, max_nesting)?)
    }

    #[must_use]
    pub fn demo_constant(&self) -> &str {
        self.demo
            .as_ref()
            .and_then(|d| d.constant.as_deref())
            .unwrap_or(DEFAULT_CONSTANT)
    }

    #[must_use]
    pub fn max_precision(&self) -> u32 {
        self.demo
            .as_ref()
            .and_then(|d| d.max_precision)
            .unwrap_or(DEFAULT_MAX_PRECISION)
    }
}

fn step_budget_override() -> Option<u64> {
    let raw = env::var(STEP_BUDGET_ENV).ok()?;
    match raw.trim().parse() {
        Ok(steps) => Some(steps),
        Err(err) => {
            tracing::warn!("Ignoring {STEP_BUDGET_ENV}={raw:?}: {err}");
            None
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".moebius").join("config.toml"))
}
