use serde::{Deserialize, Serialize};

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_window_class() -> String {
    "MapleStoryClass".to_string()
}

fn default_window_title() -> String {
    "MapleStory".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Last position of the floating info panel, saved on move.
    pub panel_x: f64,
    pub panel_y: f64,
    /// Tick interval of the tracking/hotkey poll loop.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Game window the overlay follows; falls back to the primary screen
    /// when not found.
    #[serde(default = "default_window_class")]
    pub target_window_class: String,
    #[serde(default = "default_window_title")]
    pub target_window_title: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            panel_x: 0.0,
            panel_y: 0.0,
            poll_interval_ms: default_poll_interval_ms(),
            target_window_class: default_window_class(),
            target_window_title: default_window_title(),
        }
    }
}
