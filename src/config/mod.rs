use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::controls::SelectionBehavior;
use crate::pages::{CHOOSE_CATEGORY, CHOOSE_JUDGE, HOME};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tournament data export used when --data is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Page shown at startup
    #[serde(default = "default_start_page")]
    pub start_page: String,

    /// Pixels per terminal column, used to derive the viewport width
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Keep selections and entered scores between runs
    #[serde(default)]
    pub persist_selection: bool,

    /// What choosing a judging group does
    #[serde(default = "default_judging_group")]
    pub judging_group: SelectionBehavior,

    /// What choosing a category does
    #[serde(default = "default_category")]
    pub category: SelectionBehavior,
}

fn default_start_page() -> String {
    HOME.to_string()
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_judging_group() -> SelectionBehavior {
    SelectionBehavior::navigate_to(CHOOSE_CATEGORY)
}

fn default_category() -> SelectionBehavior {
    SelectionBehavior::navigate_to(CHOOSE_JUDGE)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            start_page: default_start_page(),
            cell_width: default_cell_width(),
            persist_selection: false,
            judging_group: default_judging_group(),
            category: default_category(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("scorekeep");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, creating it on first run
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(mut config) => {
                        config.sanitize();
                        return Ok(config);
                    }
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut clean_config = self.clone();
        clean_config.sanitize();

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace a zero, negative or non-finite cell width with the default
    fn sanitize(&mut self) {
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            tracing::warn!("Ignoring cell_width {}", self.cell_width);
            self.cell_width = default_cell_width();
        }
    }

    /// Viewport width in pixels for a terminal `columns` wide
    pub fn viewport_width(&self, columns: u16) -> f64 {
        f64::from(columns) * self.cell_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("/srv/fll/tournament.json")),
            start_page: "choose-judging-group".to_string(),
            cell_width: 10.0,
            persist_selection: true,
            judging_group: SelectionBehavior {
                confirm_before_navigate: true,
                navigate_target: None,
            },
            category: default_category(),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("persist_selection = true\n").unwrap();

        assert!(config.persist_selection);
        assert_eq!(config.start_page, HOME);
        assert_eq!(config.judging_group.navigate_target.as_deref(), Some(CHOOSE_CATEGORY));
        assert_eq!(config.viewport_width(128), 1024.0);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        std::fs::write(&path, "cell_width = 12.0\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().cell_width, 12.0);
    }

    #[test]
    fn test_unusable_cell_width_falls_back_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for value in ["nan", "inf", "-inf", "0.0", "-3.0"] {
            std::fs::write(&path, format!("cell_width = {}\n", value)).unwrap();
            let config = AppConfig::load_from(&path).unwrap();
            assert_eq!(config.cell_width, default_cell_width(), "cell_width = {}", value);
            assert!(crate::controls::scale::font_scale(config.viewport_width(100)) >= 1.0);
        }
    }
}
