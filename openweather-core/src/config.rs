use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::client::ClientOptions;
use crate::model::{Language, UnitSystem};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Settings stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit_system = "metric"
/// language = "uk"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub unit_system: Option<UnitSystem>,
    pub language: Option<Language>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "owm")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// API key from `OPENWEATHER_API_KEY`, falling back to the stored one.
    pub fn resolved_api_key(&self) -> Result<String> {
        self.api_key_with_override(env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_override(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `owm configure` or set {API_KEY_ENV}."
                )
            })
    }

    /// Client options with the stored unit system and language applied.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            unit_system: self.unit_system.unwrap_or_default(),
            language: self.language,
            ..ClientOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key_with_override(None).unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn environment_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED");

        assert_eq!(cfg.api_key_with_override(None).unwrap(), "STORED");
        assert_eq!(cfg.api_key_with_override(Some("FROM_ENV".into())).unwrap(), "FROM_ENV");
        assert_eq!(cfg.api_key_with_override(Some("  ".into())).unwrap(), "STORED");
    }

    #[test]
    fn parses_stored_settings() {
        let cfg = Config::from_toml(
            r#"
            api_key = "KEY"
            unit_system = "imperial"
            language = "zh_cn"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.unit_system, Some(UnitSystem::Imperial));
        assert_eq!(cfg.language, Some(Language::ChineseSimplified));
    }

    #[test]
    fn unknown_unit_system_fails_to_parse() {
        assert!(Config::from_toml(r#"unit_system = "nautical""#).is_err());
    }

    #[test]
    fn saved_toml_reads_back() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            unit_system: Some(UnitSystem::Metric),
            language: Some(Language::Ukrainian),
        };

        let toml = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&toml).unwrap(), cfg);
    }

    #[test]
    fn client_options_use_stored_defaults() {
        let options = Config::default().client_options();
        assert_eq!(options.unit_system, UnitSystem::Standard);
        assert_eq!(options.language, None);

        let cfg = Config {
            unit_system: Some(UnitSystem::Metric),
            language: Some(Language::French),
            ..Config::default()
        };
        let options = cfg.client_options();
        assert_eq!(options.unit_system, UnitSystem::Metric);
        assert_eq!(options.language, Some(Language::French));
    }
}
