use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Environment variable holding the API read access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowfallMode {
    /// Only during the new-year window
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub snowfall: SnowfallMode,
}

fn default_token_env() -> String {
    "TMDB_ACCESS_TOKEN".to_string()
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w342".to_string()
}

fn default_accent_color() -> String {
    "yellow".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_base: default_api_base(),
            image_base: default_image_base(),
            poster_size: default_poster_size(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            snowfall: SnowfallMode::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "marquee").ok_or(Error::NoConfigDir)
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

pub fn cache_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.cache_dir().to_path_buf())
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn language_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("language.json"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tmdb.token_env, "TMDB_ACCESS_TOKEN");
        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.ui.snowfall, SnowfallMode::Auto);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            snowfall = "never"

            [tmdb]
            poster_size = "w500"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.snowfall, SnowfallMode::Never);
        assert_eq!(config.ui.accent_color, "yellow");
        assert_eq!(config.tmdb.poster_size, "w500");
        assert_eq!(config.tmdb.image_base, "https://image.tmdb.org/t/p");
    }

    #[test]
    fn test_config_roundtrip_is_stable() {
        let content = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.ui.accent_color, "yellow");
    }
}
