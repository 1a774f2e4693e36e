use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::workout::DEFAULT_WORKOUT_NAME;

/// Optional colour overrides, each a `#RRGGBB` or `#RGB` string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name given to the routine at startup
    #[serde(default = "default_workout_name")]
    pub workout_name: String,

    /// Print the last saved routine as JSON after the TUI exits
    #[serde(default)]
    pub print_on_exit: bool,

    /// Desktop notification when a routine is saved
    #[serde(default)]
    pub notify_on_save: bool,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_workout_name() -> String {
    DEFAULT_WORKOUT_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workout_name: default_workout_name(),
            print_on_exit: false,
            notify_on_save: false,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("liftbook");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
            // Keep a broken file around for the user to fix
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            workout_name: "Leg Day".to_string(),
            print_on_exit: true,
            notify_on_save: false,
            theme: ThemeConfig {
                accent: Some("#ffc107".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config, deserialized);
        assert!(!serialized.contains("danger"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = AppConfig::parse("notify_on_save = true\n").unwrap();
        assert_eq!(config.workout_name, "Workout Name");
        assert!(config.notify_on_save);
        assert!(!config.print_on_exit);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_theme_table() {
        let config = AppConfig::parse("[theme]\ninput_bg = \"#123\"\n").unwrap();
        assert_eq!(config.theme.input_bg.as_deref(), Some("#123"));
    }
}
