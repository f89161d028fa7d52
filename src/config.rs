use crate::model::dashboard::DEFAULT_AGE_RANGE;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Cleaned manifest CSV
    pub data_path: String,
    /// Image shown in the dashboard header
    pub image_path: String,
    /// Initial position of the age range slider
    pub age_range: (f64, f64),
    pub show_splash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: "clean_titanic.csv".to_string(),
            image_path: "titanic.jpg".to_string(),
            age_range: DEFAULT_AGE_RANGE,
            show_splash: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".titanic-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Read the config file, if there is one
    ///
    /// An unreadable or invalid file is logged and treated as absent.
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                return None;
            }
        };
        Self::parse(&contents)
            .map_err(|e| tracing::warn!("Ignoring invalid {}: {}", config_path.display(), e))
            .ok()
    }

    pub fn parse(contents: &str) -> serde_json::Result<Config> {
        serde_json::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(r#"{ "data_path": "data/train.csv" }"#).unwrap();
        assert_eq!(config.data_path, "data/train.csv");
        assert_eq!(config.image_path, "titanic.jpg");
        assert_eq!(config.age_range, (25.0, 75.0));
        assert!(config.show_splash);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"{
                "data_path": "a.csv",
                "image_path": "b.png",
                "age_range": [10.0, 20.0],
                "show_splash": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.age_range, (10.0, 20.0));
        assert!(!config.show_splash);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(Config::parse("{ not json").is_err());
    }
}
