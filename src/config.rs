use crate::{session::SessionConfig, supply::DEFAULT_MODEL};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u32,
    pub word_count: usize,
    pub model: String,
    pub offline: bool,
    pub shuffle_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: crate::session::DEFAULT_DURATION_SECS,
            word_count: 25,
            model: DEFAULT_MODEL.to_string(),
            offline: false,
            shuffle_fallback: true,
        }
    }
}

impl Config {
    /// Word count to ask the supply for; never zero
    pub fn requested_words(&self) -> usize {
        self.word_count.max(1)
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            duration_secs: cfg.duration_secs.max(1),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "minetype") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("minetype_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            duration_secs: 90,
            word_count: 40,
            model: "gemini-2.5-pro".into(),
            offline: true,
            shuffle_fallback: false,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());

        let path = dir.path().join("corrupt.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"duration_secs": 30}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.duration_secs, 30);
        assert_eq!(cfg.word_count, 25);
        assert_eq!(cfg.model, DEFAULT_MODEL);
    }

    #[test]
    fn session_config_never_zero() {
        let cfg = Config {
            duration_secs: 0,
            ..Config::default()
        };
        assert_eq!(SessionConfig::from(&cfg).duration_secs, 1);
        assert_eq!(SessionConfig::from(&Config::default()).duration_secs, 60);
    }

    #[test]
    fn requested_words_never_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"word_count": 0}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.word_count, 0);
        assert_eq!(cfg.requested_words(), 1);
        assert_eq!(Config::default().requested_words(), 25);
    }
}
