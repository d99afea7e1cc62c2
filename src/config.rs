use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum cards shown in one study session, 0 for no limit (default: 5)
    #[serde(default = "default_cards_per_session")]
    pub cards_per_session: usize,

    /// Shuffle cards before each study session (default: true)
    #[serde(default = "default_shuffle_cards")]
    pub shuffle_cards: bool,

    /// Allow only one completed quiz per calendar day (default: true)
    #[serde(default = "default_one_quiz_per_day")]
    pub one_quiz_per_day: bool,

    /// Path to database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_cards_per_session() -> usize {
    5
}

fn default_shuffle_cards() -> bool {
    true
}

fn default_one_quiz_per_day() -> bool {
    true
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("leitner").join("leitner.db"))
        .unwrap_or_else(|| PathBuf::from("leitner.db"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cards_per_session: default_cards_per_session(),
            shuffle_cards: default_shuffle_cards(),
            one_quiz_per_day: default_one_quiz_per_day(),
            db_path: default_db_path(),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(suffix) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(suffix);
    }
    path.to_path_buf()
}

impl Config {
    /// Load config from the default location or return defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.db_path = expand_tilde(&config.db_path);
        Ok(config)
    }

    /// Path to config file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("leitner").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Ensure required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cards_per_session, 5);
        assert!(config.shuffle_cards);
        assert!(config.one_quiz_per_day);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "cards_per_session = 0").unwrap();
        writeln!(file, "shuffle_cards = false").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.cards_per_session, 0);
        assert!(!config.shuffle_cards);
        assert!(config.one_quiz_per_day);
        assert_eq!(config.db_path, default_db_path());
    }

    #[test]
    fn test_tilde_in_db_path() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "db_path = \"~/cards/leitner.db\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.db_path, home.join("cards/leitner.db"));
        }
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "cards_per_session = \"many\"").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_ensure_dirs_creates_parent() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            db_path: dir.path().join("nested").join("leitner.db"),
            ..Config::default()
        };
        config.ensure_dirs().unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
