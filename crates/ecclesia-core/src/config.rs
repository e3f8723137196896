//! Project configuration.
//!
//! Read from `<project>/.ecclesia/config.toml` when present. Environment
//! variables override the file, and command-line flags override both.

use crate::error::{ChurchError, ChurchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project state directory.
pub const STATE_DIR: &str = ".ecclesia";
pub const CONFIG_FILE: &str = "config.toml";
pub const DB_FILE: &str = "ecclesia.db";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file. Relative paths are resolved against the project.
    pub database: Option<PathBuf>,
    /// Email of the signed-in user. No user means the views require sign-in.
    pub user: Option<String>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(STATE_DIR).join(CONFIG_FILE)
    }

    /// Load the project's config file (defaults when absent), then apply
    /// environment overrides.
    pub fn load(project_dir: &Path) -> ChurchResult<Self> {
        let path = Self::config_path(project_dir);
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), "loading config");
            toml::from_str(&text)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `ECCLESIA_*` overrides looked up through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> ChurchResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = var("ECCLESIA_DB") {
            self.database = Some(PathBuf::from(db));
        }
        if let Some(user) = var("ECCLESIA_USER") {
            self.user = Some(user).filter(|u| !u.trim().is_empty());
        }
        if let Some(host) = var("ECCLESIA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("ECCLESIA_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ChurchError::Config(format!("invalid ECCLESIA_PORT: {}", port)))?;
        }
        Ok(())
    }

    /// Database file for `project_dir`.
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        match &self.database {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => project_dir.join(path),
            None => project_dir.join(STATE_DIR).join(DB_FILE),
        }
    }

    /// Write the config file, creating the state directory.
    pub fn save(&self, project_dir: &Path) -> ChurchResult<PathBuf> {
        let path = Self::config_path(project_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| ChurchError::Config(e.to_string()))?;
        std::fs::write(&path, text)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(
            config.db_path(dir.path()),
            dir.path().join(".ecclesia").join("ecclesia.db")
        );
    }

    #[test]
    fn file_then_overrides() {
        let dir = tempdir().unwrap();
        let config = Config {
            database: Some(PathBuf::from("data/church.db")),
            user: Some("pastor@church.org".to_string()),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
        };
        config.save(dir.path()).unwrap();

        let mut loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.db_path(dir.path()), dir.path().join("data/church.db"));

        let env: HashMap<&str, &str> = [("ECCLESIA_PORT", "9000"), ("ECCLESIA_USER", "")]
            .into_iter()
            .collect();
        loaded
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.user, None);

        let bad = |k: &str| (k == "ECCLESIA_PORT").then(|| "http".to_string());
        assert!(matches!(
            loaded.apply_overrides(bad),
            Err(ChurchError::Config(_))
        ));
    }

    #[test]
    fn malformed_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(STATE_DIR)).unwrap();
        std::fs::write(Config::config_path(dir.path()), "server = 3").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(ChurchError::Toml(_))));
    }
}
