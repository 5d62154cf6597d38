//! Load and validate runtime configuration.

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::error::{JournalError, Result};
use crate::state::Settings;
use crate::types::{PnlBasis, DEFAULT_OPTION_MULTIPLIER};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageCfg {
    pub dir: Option<PathBuf>, // defaults to the platform data dir
}

fn default_user() -> String {
    "default".into()
}

fn default_multiplier() -> f64 {
    DEFAULT_OPTION_MULTIPLIER
}

#[derive(Debug, Deserialize, Clone)]
pub struct JournalCfg {
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default)]
    pub pnl_basis: PnlBasis, // "per_unit" or "position"
    #[serde(default = "default_multiplier")]
    pub option_multiplier: f64,
}

impl Default for JournalCfg {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            pnl_basis: PnlBasis::default(),
            option_multiplier: DEFAULT_OPTION_MULTIPLIER,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageCfg,
    #[serde(default)]
    pub journal: JournalCfg,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: Self = serde_yaml::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// A missing file means defaults; a present but broken one is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        self.default_settings().validate()?;
        if self.journal.default_user.trim().is_empty() {
            return Err(JournalError::Parse("default_user must not be empty".into()));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "trade-journal")
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Settings given to newly created journals.
    pub fn default_settings(&self) -> Settings {
        Settings {
            option_multiplier: self.journal.option_multiplier,
            pnl_basis: self.journal.pnl_basis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg: AppConfig = serde_yaml::from_str(
            "storage:\n  dir: /tmp/journal\njournal:\n  default_user: alex\n  pnl_basis: position\n  option_multiplier: 10\n",
        )
        .unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.data_dir(), PathBuf::from("/tmp/journal"));
        assert_eq!(cfg.journal.default_user, "alex");
        assert_eq!(cfg.default_settings().pnl_basis, PnlBasis::Position);
        assert_eq!(cfg.default_settings().option_multiplier, 10.0);
    }

    #[test]
    fn sections_are_optional() {
        let cfg: AppConfig = serde_yaml::from_str("journal: {}\n").unwrap();
        assert_eq!(cfg.journal.default_user, "default");
        assert_eq!(cfg.journal.option_multiplier, 100.0);
        assert_eq!(cfg.journal.pnl_basis, PnlBasis::PerUnit);
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "journal:\n  option_multiplier: 0\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(JournalError::InvalidSettings(_))));
        assert!(AppConfig::load_or_default(dir.path().join("missing.yaml")).is_ok());
    }
}
