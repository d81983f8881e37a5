use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/users";
pub const BASE_URL_ENV: &str = "USERS_API_URL";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Value sent in the `X-Demo-Token` header on every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_token: Option<String>,
    /// Run local form checks before create and update
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            demo_token: None,
            validate: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| DirectoryError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| DirectoryError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "users")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DirectoryError::NoConfigDir)
    }

    /// Resolve the collection URL: explicit flag, then env var, then file, then default.
    pub fn base_url(&self, explicit: Option<&str>) -> String {
        let from_env = std::env::var(BASE_URL_ENV).ok();
        self.resolve_base_url(explicit, from_env.as_deref())
    }

    fn resolve_base_url(&self, explicit: Option<&str>, from_env: Option<&str>) -> String {
        explicit
            .or(from_env)
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    /// Render as a config file.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::parse(
            r#"
base_url = "http://localhost:8000/api/v1/users"
demo_token = "12345"
validate = false
"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8000/api/v1/users"));
        assert_eq!(config.demo_token.as_deref(), Some("12345"));
        assert!(!config.validate);
    }

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            base_url: Some("http://file".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_base_url(Some("http://flag"), Some("http://env")),
            "http://flag"
        );
        assert_eq!(config.resolve_base_url(None, Some("http://env")), "http://env");
        assert_eq!(config.resolve_base_url(None, None), "http://file");
        assert_eq!(
            Config::default().resolve_base_url(None, None),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_written_config_reads_back() {
        let config = Config {
            base_url: Some("http://localhost:8080/api/v1/users".to_string()),
            demo_token: None,
            validate: false,
        };
        let text = config.to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
