//! Global key and mouse sampling for the poll loop. Keys are sampled as
//! levels; edge detection lives in the overlay state machine so a held key
//! cannot repeat-fire.

use device_query::{DeviceQuery, DeviceState, Keycode};
use mapleglass_config::hotkeys::HotkeyConfig;

/// Resolved hotkey codes.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub capture: Keycode,
    pub manual_search: Keycode,
    pub exit: Keycode,
    pub close: Keycode,
}

impl KeyBindings {
    /// Resolves configured key names, falling back to the default binding
    /// (with a warning) for anything unparseable.
    pub fn from_config(config: &HotkeyConfig) -> Self {
        let defaults = HotkeyConfig::default();
        Self {
            capture: parse_key(&config.capture, &defaults.capture),
            manual_search: parse_key(&config.manual_search, &defaults.manual_search),
            exit: parse_key(&config.exit, &defaults.exit),
            close: parse_key(&config.close, &defaults.close),
        }
    }
}

fn parse_key(name: &str, fallback: &str) -> Keycode {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!("unknown key name '{name}', falling back to '{fallback}'");
        fallback
            .parse()
            .unwrap_or(Keycode::Escape)
    })
}

/// One poll tick's worth of input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub capture_down: bool,
    pub manual_search_down: bool,
    pub exit_down: bool,
    pub close_down: bool,
    pub mouse_pos: (i32, i32),
    pub left_button_down: bool,
}

pub struct InputSampler {
    device: DeviceState,
}

impl InputSampler {
    pub fn new() -> Self {
        Self {
            device: DeviceState::new(),
        }
    }

    pub fn sample(&self, keys: &KeyBindings) -> InputSnapshot {
        let pressed = self.device.get_keys();
        let mouse = self.device.get_mouse();
        InputSnapshot {
            capture_down: pressed.contains(&keys.capture),
            manual_search_down: pressed.contains(&keys.manual_search),
            exit_down: pressed.contains(&keys.exit),
            close_down: pressed.contains(&keys.close),
            mouse_pos: mouse.coords,
            left_button_down: mouse.button_pressed.get(1).copied().unwrap_or(false),
        }
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let keys = KeyBindings::from_config(&HotkeyConfig::default());
        assert_eq!(keys.capture, Keycode::Grave);
        assert_eq!(keys.manual_search, Keycode::BackSlash);
        assert_eq!(keys.exit, Keycode::F10);
        assert_eq!(keys.close, Keycode::Escape);
    }

    #[test]
    fn bad_key_name_falls_back_to_default() {
        let config = HotkeyConfig {
            capture: "NotAKey".to_string(),
            ..HotkeyConfig::default()
        };
        let keys = KeyBindings::from_config(&config);
        assert_eq!(keys.capture, Keycode::Grave);
    }
}
