use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RaceError;
use crate::session::{Mode, SessionConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default = "default_mode_option")]
    pub mode_option: u32,
    #[serde(default)]
    pub prompt: Option<String>,
}

fn default_mode() -> Mode {
    Mode::Time
}

fn default_mode_option() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            mode_option: default_mode_option(),
            prompt: None,
        }
    }
}

impl Config {
    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(self.mode, self.mode_option)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config, RaceError>;
    fn save(&self, cfg: &Config) -> Result<(), RaceError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typerace") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typerace_config.json")
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
    /// A missing file yields the defaults; an unreadable one is an error.
    fn load(&self) -> Result<Config, RaceError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }

    fn save(&self, cfg: &Config) -> Result<(), RaceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            mode: Mode::Words,
            mode_option: 50,
            prompt: Some("the quick brown fox".into()),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mode": "quote" }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.mode, Mode::Quote);
        assert_eq!(cfg.mode_option, 30);
        assert_eq!(cfg.prompt, None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(RaceError::Config(_))
        );
    }

    #[test]
    fn session_from_config() {
        let cfg = Config::default();
        assert_eq!(cfg.session().ceiling(), Some(30));
    }
}
