use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable holding the process-wide default API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

const DATABASE_FILE: &str = "workoutdatabase.json";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub youtube: YouTubeConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub search_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load config: user file (if exists) replaces the built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            Self::parse(&user_str)
        } else {
            Self::parse(DEFAULT_CONFIG)
        }
    }

    pub fn parse(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The process-wide default credential: `YOUTUBE_API_KEY`, else the
    /// configured key. Blank values are ignored.
    pub fn default_api_key(&self) -> Option<String> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        self.default_api_key_with(env_key.as_deref())
    }

    fn default_api_key_with(&self, env_key: Option<&str>) -> Option<String> {
        env_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| {
                self.youtube
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
            })
            .map(str::to_string)
    }

    /// Where the exercise database lives.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(Self::default_database_path)
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn default_database_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join(DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "vidmatch")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.youtube.search_limit, 5);
        assert_eq!(config.youtube.api_key.as_deref(), Some(""));
        assert_eq!(config.default_api_key_with(None), None);
    }

    #[test]
    fn test_env_key_wins() {
        let config = AppConfig::parse(
            r#"
            [youtube]
            api_key = "from-file"
            search_limit = 5

            [database]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_api_key_with(Some("from-env")).as_deref(), Some("from-env"));
        assert_eq!(config.default_api_key_with(Some("  ")).as_deref(), Some("from-file"));
        assert_eq!(config.default_api_key_with(None).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_database_path() {
        let mut config = AppConfig::default();
        assert!(config.database_path().ends_with("workoutdatabase.json"));

        config.database.path = Some(PathBuf::from("/tmp/db.json"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/db.json"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AppConfig::parse("[youtube]\nsearch_limit = \"many\""),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.youtube.search_limit, 5);

        let mut config = AppConfig::default();
        config.youtube.api_key = Some("saved-key".into());
        config.youtube.search_limit = 12;
        config.database.path = Some(PathBuf::from("/data/db.json"));
        config.save_to(&path).unwrap();

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.youtube.search_limit, 12);
        assert_eq!(reloaded.default_api_key_with(None).as_deref(), Some("saved-key"));
        assert_eq!(reloaded.database_path(), PathBuf::from("/data/db.json"));
    }
}
