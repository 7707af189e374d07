// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use anywho::{Error, anywho};
use serde::{Deserialize, Serialize};

use crate::{
    api::{DEFAULT_API_BASE_URL, DEFAULT_ARTWORK_BASE_URL},
    catalog::DEFAULT_LIST_LIMIT,
};

pub const APP_ID: &str = "dev.pokecatalog.PokeCatalog";

const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub artwork_base_url: String,
    pub list_limit: usize,
    /// Where the overrides are kept, the platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            artwork_base_url: String::from(DEFAULT_ARTWORK_BASE_URL),
            list_limit: DEFAULT_LIST_LIMIT,
            data_dir: None,
        }
    }
}

impl Config {
    /// `<config dir>/<app id>/config.ron`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join(CONFIG_FILE))
    }

    /// Loads the config file at `path`, a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        match std::fs::read_to_string(path) {
            Ok(contents) => ron::from_str(&contents)
                .map_err(|e| anywho!("Invalid config file {}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the config from the default location
    pub fn load() -> Result<Self, Error> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        let serialized = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// The directory the overrides are stored in
    pub fn data_dir(&self) -> Result<PathBuf, Error> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_ID))
                .ok_or_else(|| anywho!("Could not determine the data directory")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.ron")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.list_limit, 100);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(list_limit: 20)").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.list_limit, 20);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let config = Config {
            api_base_url: String::from("http://localhost:8000/api/v2"),
            list_limit: 151,
            data_dir: Some(dir.path().join("data")),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(list_limit: \"many\")").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/pokecatalog")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/pokecatalog"));
    }
}
