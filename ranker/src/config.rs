use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ranker_core::{Catalog, CollectionStore, SortBy, bs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub spotify: Spotify,
    pub storage: Storage,
    pub view: View,
}
impl Config {
    pub const FILENAME: &str = "ranker-config.toml";

    /// Load the config at `path`, falling back to defaults if there isn't one.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using default config");
                Ok(Config::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Write the default config to `path`, refusing to replace an existing file.
    ///
    /// Credentials from the environment are never written out.
    pub fn init(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        Config::default().save(path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }

    /// Let credentials come from the environment rather than the file.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(client_id) = lookup("SPOTIFY_CLIENT_ID").filter(|v| !v.is_empty()) {
            self.spotify.client_id = client_id;
        }
        if let Some(client_secret) = lookup("SPOTIFY_CLIENT_SECRET").filter(|v| !v.is_empty()) {
            self.spotify.client_secret = client_secret;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Spotify {
    pub client_id: String,
    pub client_secret: String,
    pub timeout_secs: u64,
}
impl Default for Spotify {
    fn default() -> Self {
        Self {
            client_id: "YOUR_CLIENT_ID".to_string(),
            client_secret: "YOUR_CLIENT_SECRET".to_string(),
            timeout_secs: Catalog::<bs::Client>::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}
impl Spotify {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Storage {
    pub data_file: PathBuf,
}
impl Default for Storage {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(CollectionStore::DEFAULT_FILENAME),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct View {
    pub sort_by: SortBy,
    pub search_limit: u32,
}
impl Default for View {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            search_limit: Catalog::<bs::Client>::DEFAULT_SEARCH_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(Config::FILENAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.view.search_limit, 8);
        assert_eq!(config.spotify.timeout_secs, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Config::FILENAME);
        let config = Config {
            view: View {
                sort_by: SortBy::ArtistAsc,
                search_limit: 5,
            },
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            data_file = "ratings/albums.json"

            [view]
            sort_by = "added"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_file, PathBuf::from("ratings/albums.json"));
        assert_eq!(config.view.sort_by, SortBy::InsertionOrder);
        assert_eq!(config.view.search_limit, 8);
        assert_eq!(config.spotify, Spotify::default());
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Config::FILENAME);
        std::fs::write(&path, "[view]\nsort_by = \"sideways\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_environment_overrides_credentials() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "SPOTIFY_CLIENT_ID" => Some("id-from-env".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.spotify.client_id, "id-from-env");
        assert_eq!(config.spotify.client_secret, "YOUR_CLIENT_SECRET");
    }
}
