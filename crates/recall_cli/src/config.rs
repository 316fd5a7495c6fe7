//! TOML configuration for the CLI.
//!
//! Every section and key is optional; a missing file means all defaults.

use anyhow::{Context, Result};
use recall_core::{default_log_level, SchedulingPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "recall.toml";
const CONFIG_ENV_VAR: &str = "RECALL_CONFIG";
const DEFAULT_DB_FILE: &str = "recall.sqlite3";
const DEFAULT_UPCOMING_HORIZON_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub level: Option<String>,
    /// Log directory; defaults to `logs/` next to the database.
    pub dir: Option<PathBuf>,
}

/// `[schedule]` keys; the policy keys mirror `SchedulingPolicy`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub upcoming_horizon_days: u32,
    pub growth_factor: f64,
    pub min_interval_days: u32,
    pub max_interval_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let policy = SchedulingPolicy::default();
        Self {
            upcoming_horizon_days: DEFAULT_UPCOMING_HORIZON_DAYS,
            growth_factor: policy.growth_factor,
            min_interval_days: policy.min_interval_days,
            max_interval_days: policy.max_interval_days,
        }
    }
}

impl ScheduleConfig {
    pub fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy {
            growth_factor: self.growth_factor,
            min_interval_days: self.min_interval_days,
            max_interval_days: self.max_interval_days,
        }
    }
}

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("parsing TOML config")?;
        config
            .schedule
            .policy()
            .validate()
            .context("invalid [schedule] settings")?;
        Ok(config)
    }

    /// Loads config from `explicit`, `RECALL_CONFIG`, or `recall.toml`.
    ///
    /// Only the implicit `recall.toml` may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_path(&path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_path(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("loading config from {}", path.display()))
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(default_log_level())
    }

    /// Absolute log directory, resolved against `cwd` when relative.
    pub fn log_dir(&self, cwd: &Path) -> PathBuf {
        let dir = match &self.logging.dir {
            Some(dir) => dir.clone(),
            None => self
                .storage
                .db_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("logs"),
        };
        if dir.is_absolute() {
            dir
        } else {
            cwd.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::path::Path;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.storage.db_path, Path::new("recall.sqlite3"));
        assert_eq!(config.schedule.upcoming_horizon_days, 7);
        assert_eq!(config.schedule.policy().growth_factor, 2.0);
        assert_eq!(config.schedule.policy().max_interval_days, 365);
        assert_eq!(config.log_dir(Path::new("/srv")), Path::new("/srv/logs"));
    }

    #[test]
    fn schedule_section_overrides_policy() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            db_path = "/data/recall.sqlite3"

            [logging]
            level = "warn"

            [schedule]
            upcoming_horizon_days = 14
            growth_factor = 2.5
            max_interval_days = 180
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.schedule.upcoming_horizon_days, 14);
        assert_eq!(config.schedule.policy().growth_factor, 2.5);
        assert_eq!(config.schedule.policy().min_interval_days, 1);
        assert_eq!(config.schedule.policy().max_interval_days, 180);
        assert_eq!(config.log_dir(Path::new("/srv")), Path::new("/data/logs"));
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let err = AppConfig::from_toml_str("[schedule]\ngrowth_factor = 0.5\n").unwrap_err();
        assert!(format!("{err:#}").contains("growth factor"));
    }

    #[test]
    fn unknown_storage_key_is_rejected() {
        assert!(AppConfig::from_toml_str("[storage]\npath = \"x\"\n").is_err());
    }

    #[test]
    fn misspelled_schedule_key_is_rejected() {
        let err = AppConfig::from_toml_str("[schedule]\ngrowth_factr = 3.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("growth_factr"));
    }
}
