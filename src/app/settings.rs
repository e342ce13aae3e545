use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Gemini API key, if the user saved one. The `GEMINI_API_KEY`
    /// environment variable takes precedence over this.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Last directory used in a save dialog (QR export, print document).
    #[serde(default)]
    pub last_save_directory: Option<String>,

    /// Refresh the preview pane on every edit. Disable on slow machines and
    /// refresh manually from the View menu.
    #[serde(default = "default_live_preview")]
    pub live_preview: bool,
}

fn default_live_preview() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            last_save_directory: None,
            live_preview: default_live_preview(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("menucraft");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.last_save_directory, None);
        assert!(settings.live_preview);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings {
            api_key: Some("abc123".to_string()),
            last_save_directory: Some("/tmp".to_string()),
            live_preview: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate old config missing new fields
        let json = r#"{"api_key": "k"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("k")); // Should use file value
        assert!(settings.live_preview); // Should use default
        assert_eq!(settings.last_save_directory, None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
