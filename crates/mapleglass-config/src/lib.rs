use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::hotkeys::HotkeyConfig;
use self::ocr::OcrConfig;
use self::ui::UiConfig;

pub mod hotkeys;
pub mod ocr;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkeys: HotkeyConfig,
    pub ocr: OcrConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Path of `config.json` next to the executable, falling back to the
    /// working directory when the executable path cannot be resolved.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.json")
    }

    /// Load from `path`. A missing file yields defaults (and writes them
    /// back); a corrupt file yields defaults with a warning. Only plain IO
    /// failures while reading an existing file are surfaced.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("could not write default config to {}: {e}", path.display());
            }
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)?;
        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("config file {} is corrupt ({e}), using defaults", path.display());
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("mapleglass-config-test-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hotkeys.capture, HotkeyConfig::default().capture);
    }

    #[test]
    fn round_trip_preserves_fields() {
        let dir = std::env::temp_dir().join("mapleglass-config-test-roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let mut config = Config::default();
        config.ui.panel_x = 120.0;
        config.ui.panel_y = -30.5;
        config.hotkeys.capture = "F8".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.ui.panel_x, 120.0);
        assert_eq!(loaded.ui.panel_y, -30.5);
        assert_eq!(loaded.hotkeys.capture, "F8");
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = std::env::temp_dir().join("mapleglass-config-test-partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"hotkeys":{"exit":"F9"}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hotkeys.exit, "F9");
        assert_eq!(config.hotkeys.close, "Escape");
        assert_eq!(config.ocr.language, "kor");
    }
}
