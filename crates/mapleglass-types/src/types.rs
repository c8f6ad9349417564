use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle committed by a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    /// Rectangles below the minimum size are treated as accidental clicks.
    pub fn exceeds(&self, min_px: u32) -> bool {
        self.width > min_px && self.height > min_px
    }
}

/// What the selected region is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureMode {
    /// Item name text, fed into the remote item search.
    Item,
    /// Experience gauge, starts a tracking session.
    ExpStart,
    /// Experience gauge, updates the running session.
    ExpEnd,
}

impl CaptureMode {
    pub fn is_exp(self) -> bool {
        matches!(self, CaptureMode::ExpStart | CaptureMode::ExpEnd)
    }
}

/// One experience reading taken from the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpSample {
    pub value: u64,
    pub percent: f64,
}

/// Item search hit rendered into the info panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemView {
    pub name: String,
    pub requirements: String,
    pub stats: String,
    pub description: String,
    pub price: Option<u64>,
}

/// Events flowing between the poll loop, the event loop and panel state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A committed drag; the crop has already been taken from the frozen
    /// snapshot (the snapshot itself is gone by the time this is sent).
    RegionCommitted {
        mode: CaptureMode,
        crop: CroppedRegion,
    },
    /// A capture mode was chosen from the mode menu or the exp panel.
    ModeSelected(CaptureMode),
    /// Typed query from the manual search box.
    ManualSearch(String),
    /// Typed experience reading, bypassing OCR.
    ManualExp { sample: ExpSample, start: bool },
    /// Close hotkey: tear down panels and any selection in progress.
    CloseAllPanels,
    /// Exit hotkey.
    Shutdown,
}

/// Owned RGBA crop extracted from a frozen snapshot.
#[derive(Clone)]
pub struct CroppedRegion {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for CroppedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CroppedRegion")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_minimum_size() {
        let r = CaptureRegion { x: 0, y: 0, width: 10, height: 50 };
        assert!(!r.exceeds(10));
        let r = CaptureRegion { x: 0, y: 0, width: 11, height: 11 };
        assert!(r.exceeds(10));
    }
}
