// ABOUTME: Environment configuration for the calorie tracker run
// ABOUTME: Daily limit, data directory, estimator endpoint/model/timeout and git sync settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every component receives its settings from a [`TrackerConfig`] built once at
//! startup; nothing reads the environment or the working directory later on.
//!
//! | Variable                   | Default                                 |
//! |----------------------------|-----------------------------------------|
//! | `CALORIE_DAILY_LIMIT`      | `3000`                                  |
//! | `CALORIE_DATA_DIR`         | `tracker`                               |
//! | `CALORIE_LLM_URL`          | `http://localhost:11434/api/generate`   |
//! | `CALORIE_LLM_MODEL`        | `qwen3:8b`                              |
//! | `CALORIE_LLM_TIMEOUT_SECS` | `30`                                    |
//! | `CALORIE_SYNC`             | `true`                                  |
//! | `CALORIE_GIT_REMOTE`       | `origin`                                |
//! | `CALORIE_GIT_BRANCH`       | `main`                                  |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::errors::{AppError, AppResult};

/// Environment variable for the daily calorie limit
pub const DAILY_LIMIT_ENV: &str = "CALORIE_DAILY_LIMIT";
/// Environment variable for the ledger directory
pub const DATA_DIR_ENV: &str = "CALORIE_DATA_DIR";
/// Environment variable for the estimation endpoint
pub const LLM_URL_ENV: &str = "CALORIE_LLM_URL";
/// Environment variable for the estimation model
pub const LLM_MODEL_ENV: &str = "CALORIE_LLM_MODEL";
/// Environment variable for the estimation request timeout
pub const LLM_TIMEOUT_ENV: &str = "CALORIE_LLM_TIMEOUT_SECS";
/// Environment variable toggling git synchronization
pub const SYNC_ENV: &str = "CALORIE_SYNC";
/// Environment variable for the git remote name
pub const GIT_REMOTE_ENV: &str = "CALORIE_GIT_REMOTE";
/// Environment variable for the git branch name
pub const GIT_BRANCH_ENV: &str = "CALORIE_GIT_BRANCH";

/// Default daily calorie budget
pub const DEFAULT_DAILY_LIMIT: u32 = 3000;
/// Default ledger directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "tracker";
/// Default Ollama generate endpoint
pub const DEFAULT_LLM_URL: &str = "http://localhost:11434/api/generate";
/// Default model used for estimation
pub const DEFAULT_LLM_MODEL: &str = "qwen3:8b";
/// Default bound on one estimation request
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
/// Default git remote
pub const DEFAULT_GIT_REMOTE: &str = "origin";
/// Default git branch
pub const DEFAULT_GIT_BRANCH: &str = "main";

/// Daily calorie budget, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyLimit(u32);

impl DailyLimit {
    /// Create a limit; zero is rejected
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `kcal` is zero.
    pub fn new(kcal: u32) -> AppResult<Self> {
        if kcal == 0 {
            return Err(AppError::config("daily calorie limit must be greater than zero"));
        }
        Ok(Self(kcal))
    }

    /// Limit in kilocalories
    #[must_use]
    pub const fn kcal(&self) -> u32 {
        self.0
    }

    /// Limit as a float for budget arithmetic
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for DailyLimit {
    fn default() -> Self {
        Self(DEFAULT_DAILY_LIMIT)
    }
}

impl fmt::Display for DailyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Estimation service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Full URL of the generate endpoint
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Upper bound on one request, connect included
    pub timeout: Duration,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LLM_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

/// Git synchronization settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Pull before reading and push after writing
    pub enabled: bool,
    /// Remote to pull from and push to
    pub remote: String,
    /// Branch to pull and push
    pub branch: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            remote: DEFAULT_GIT_REMOTE.to_owned(),
            branch: DEFAULT_GIT_BRANCH.to_owned(),
        }
    }
}

/// Complete configuration of one tracker run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Daily calorie budget
    pub daily_limit: DailyLimit,
    /// Directory holding one `YY-MM-DD.json` file per day
    pub data_dir: PathBuf,
    /// Estimation service settings
    pub estimator: EstimatorConfig,
    /// Remote synchronization settings
    pub sync: SyncConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            daily_limit: DailyLimit::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            estimator: EstimatorConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a numeric or boolean variable cannot be
    /// parsed, or if the resulting configuration fails [`TrackerConfig::validate`].
    pub fn from_env() -> AppResult<Self> {
        let daily_limit = match env::var(DAILY_LIMIT_ENV) {
            Ok(raw) => DailyLimit::new(parse_number(DAILY_LIMIT_ENV, &raw)?)?,
            Err(_) => DailyLimit::default(),
        };
        let timeout_secs = match env::var(LLM_TIMEOUT_ENV) {
            Ok(raw) => parse_number(LLM_TIMEOUT_ENV, &raw)?,
            Err(_) => DEFAULT_LLM_TIMEOUT_SECS,
        };
        let enabled = match env::var(SYNC_ENV) {
            Ok(raw) => parse_flag(SYNC_ENV, &raw)?,
            Err(_) => true,
        };

        let config = Self {
            daily_limit,
            data_dir: PathBuf::from(env_var_or(DATA_DIR_ENV, DEFAULT_DATA_DIR)),
            estimator: EstimatorConfig {
                endpoint: env_var_or(LLM_URL_ENV, DEFAULT_LLM_URL),
                model: env_var_or(LLM_MODEL_ENV, DEFAULT_LLM_MODEL),
                timeout: Duration::from_secs(timeout_secs),
            },
            sync: SyncConfig {
                enabled,
                remote: env_var_or(GIT_REMOTE_ENV, DEFAULT_GIT_REMOTE),
                branch: env_var_or(GIT_BRANCH_ENV, DEFAULT_GIT_BRANCH),
            },
        };
        config.validate()?;

        debug!(
            limit = %config.daily_limit,
            data_dir = %config.data_dir.display(),
            endpoint = %config.estimator.endpoint,
            model = %config.estimator.model,
            sync = config.sync.enabled,
            "Loaded tracker configuration"
        );
        Ok(config)
    }

    /// Check values that cannot be expressed in the types alone
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable or non-HTTP endpoint, an
    /// empty model name, a zero timeout, or an empty data directory.
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.estimator.endpoint).map_err(|e| {
            AppError::config(format!(
                "invalid estimation endpoint '{}': {e}",
                self.estimator.endpoint
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "estimation endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.estimator.model.trim().is_empty() {
            return Err(AppError::config("model name cannot be empty"));
        }
        if self.estimator.timeout.is_zero() {
            return Err(AppError::config("estimation timeout must be greater than zero"));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::config("data directory cannot be empty"));
        }
        Ok(())
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be a whole number, got '{raw}'")))
}

fn parse_flag(key: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{key} must be true or false, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag("X", "Yes").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }

    #[test]
    fn test_parse_number_rejects_fraction() {
        assert!(parse_number::<u32>("X", "2500.5").is_err());
        assert_eq!(parse_number::<u32>("X", " 2500 ").unwrap(), 2500);
    }
}
