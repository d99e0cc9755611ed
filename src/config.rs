use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
///
/// Only the shell is configurable (which hotkey, whether to play sounds);
/// the cleaning rules themselves are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Hotkey chord
    pub hotkey_modifiers: Vec<String>,
    pub hotkey_key: String,

    // Feedback
    pub sound_feedback: bool,
    #[serde(default)]
    pub custom_audio_dir: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey_modifiers: vec!["KEY_LEFTCTRL".to_string(), "KEY_LEFTALT".to_string()],
            hotkey_key: "KEY_C".to_string(),
            sound_feedback: true,
            custom_audio_dir: dirs::data_dir()
                .unwrap_or_default()
                .join("cleanpaste/audio")
                .to_string_lossy()
                .to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cleanpaste")
        .join("config.json")
}
