//! Panel visibility and content bookkeeping. Rendering is someone else's
//! job; the orchestrator only needs to know what is on screen (for the
//! click-through toggle) and the event loop needs somewhere to put results.
//!
//! The search generation counter guards the asynchronous item lookup: a
//! completing lookup may only write into the panel it was started for. A
//! superseding search or a closed panel makes the result stale, and stale
//! results are dropped, not applied.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use mapleglass_types::ItemView;

/// Info (item) panel content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoContent {
    pub view: ItemView,
    /// Transient status line ("Searching...", error messages).
    pub status: String,
    /// Prefill for the manual search box (the recognized text).
    pub search_text: String,
}

#[derive(Default)]
pub struct PanelState {
    info_visible: AtomicBool,
    exp_visible: AtomicBool,
    menu_visible: AtomicBool,
    search_generation: AtomicU64,
    info: Mutex<InfoContent>,
    exp_status: Mutex<String>,
}

impl PanelState {
    pub fn info_visible(&self) -> bool {
        self.info_visible.load(Ordering::Acquire)
    }

    pub fn exp_visible(&self) -> bool {
        self.exp_visible.load(Ordering::Acquire)
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible.load(Ordering::Acquire)
    }

    /// Whether the overlay window must accept mouse input for a panel.
    pub fn any_visible(&self) -> bool {
        self.info_visible() || self.exp_visible() || self.menu_visible()
    }

    pub fn show_menu(&self) {
        self.menu_visible.store(true, Ordering::Release);
    }

    pub fn hide_menu(&self) {
        self.menu_visible.store(false, Ordering::Release);
    }

    pub fn show_exp(&self) {
        self.exp_visible.store(true, Ordering::Release);
    }

    pub fn set_exp_status(&self, status: impl Into<String>) {
        if let Ok(mut guard) = self.exp_status.lock() {
            *guard = status.into();
        }
        self.show_exp();
    }

    pub fn exp_status(&self) -> String {
        self.exp_status.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn open_info(&self, content: InfoContent) {
        if let Ok(mut guard) = self.info.lock() {
            *guard = content;
        }
        self.info_visible.store(true, Ordering::Release);
    }

    pub fn set_info_status(&self, status: impl Into<String>) {
        if let Ok(mut guard) = self.info.lock() {
            guard.status = status.into();
        }
    }

    pub fn info(&self) -> InfoContent {
        self.info.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Starts a new search, superseding any in-flight one.
    pub fn begin_search(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn search_current(&self, generation: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == generation && self.info_visible()
    }

    /// Applies a finished lookup unless it has been superseded or the
    /// panel has closed. Returns whether the result was applied.
    pub fn apply_search_result(&self, generation: u64, view: ItemView) -> bool {
        if !self.search_current(generation) {
            return false;
        }
        if let Ok(mut guard) = self.info.lock() {
            guard.view = view;
            guard.status.clear();
        }
        true
    }

    /// Same staleness rule for lookup failures.
    pub fn apply_search_failure(&self, generation: u64, message: impl Into<String>) -> bool {
        if !self.search_current(generation) {
            return false;
        }
        self.set_info_status(message);
        true
    }

    /// Close hotkey / teardown: hide everything.
    pub fn close_all(&self) {
        self.info_visible.store(false, Ordering::Release);
        self.exp_visible.store(false, Ordering::Release);
        self.menu_visible.store(false, Ordering::Release);
    }
}
