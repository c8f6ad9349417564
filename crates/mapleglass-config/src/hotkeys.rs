use serde::{Deserialize, Serialize};

fn default_capture() -> String {
    "Grave".to_string()
}

fn default_manual_search() -> String {
    "BackSlash".to_string()
}

fn default_exit() -> String {
    "F10".to_string()
}

fn default_close() -> String {
    "Escape".to_string()
}

/// Global hotkeys, stored as `device_query` key-code names so the file stays
/// readable. Resolved to key codes by the input layer at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    #[serde(default = "default_capture")]
    pub capture: String,
    #[serde(default = "default_manual_search")]
    pub manual_search: String,
    #[serde(default = "default_exit")]
    pub exit: String,
    #[serde(default = "default_close")]
    pub close: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            capture: default_capture(),
            manual_search: default_manual_search(),
            exit: default_exit(),
            close: default_close(),
        }
    }
}
