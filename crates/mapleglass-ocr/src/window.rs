//! Overlay window manipulation: click-through style bits and tracking of
//! the game window's rectangle. On non-Windows targets these degrade to
//! no-ops so the interaction flow stays testable anywhere.

/// Screen rectangle of a tracked window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The overlay's own window, as far as the orchestrator cares: where it is
/// and whether mouse input passes through it.
pub trait OverlayWindow: Send {
    fn set_click_through(&mut self, enabled: bool);
    fn set_bounds(&mut self, bounds: WindowBounds);
    fn click_through(&self) -> bool;
}

/// Stand-in used when no native overlay window handle is available (tests,
/// non-Windows). Tracks the requested state so callers behave identically.
#[derive(Debug)]
pub struct NullWindow {
    click_through: bool,
    bounds: Option<WindowBounds>,
}

impl NullWindow {
    pub fn new() -> Self {
        Self {
            click_through: true,
            bounds: None,
        }
    }

    pub fn bounds(&self) -> Option<WindowBounds> {
        self.bounds
    }
}

impl Default for NullWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayWindow for NullWindow {
    fn set_click_through(&mut self, enabled: bool) {
        if self.click_through != enabled {
            tracing::debug!("overlay click-through -> {enabled}");
        }
        self.click_through = enabled;
    }

    fn set_bounds(&mut self, bounds: WindowBounds) {
        self.bounds = Some(bounds);
    }

    fn click_through(&self) -> bool {
        self.click_through
    }
}

/// Finds the game window by class and title and returns its rectangle.
#[cfg(windows)]
pub fn find_target_window(class: &str, title: &str) -> Option<WindowBounds> {
    use windows::Win32::Foundation::RECT;
    use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, GetWindowRect};
    use windows::core::PCWSTR;

    let class_w = to_wide(class);
    let title_w = to_wide(title);

    unsafe {
        let hwnd = FindWindowW(PCWSTR(class_w.as_ptr()), PCWSTR(title_w.as_ptr())).ok()?;
        let mut rect = RECT::default();
        GetWindowRect(hwnd, &mut rect).ok()?;
        Some(WindowBounds {
            x: rect.left,
            y: rect.top,
            width: (rect.right - rect.left).max(0) as u32,
            height: (rect.bottom - rect.top).max(0) as u32,
        })
    }
}

#[cfg(not(windows))]
pub fn find_target_window(_class: &str, _title: &str) -> Option<WindowBounds> {
    None
}

/// Native overlay window driven through the Win32 extended style bits.
#[cfg(windows)]
pub struct Win32Window {
    hwnd: windows::Win32::Foundation::HWND,
    click_through: bool,
}

#[cfg(windows)]
impl Win32Window {
    const WS_EX_TRANSPARENT: isize = 0x20;
    const WS_EX_LAYERED: isize = 0x0008_0000;

    /// # Safety
    /// `hwnd` must be a live window handle owned by this process.
    pub unsafe fn from_handle(hwnd: windows::Win32::Foundation::HWND) -> Self {
        Self {
            hwnd,
            click_through: true,
        }
    }
}

#[cfg(windows)]
impl OverlayWindow for Win32Window {
    fn set_click_through(&mut self, enabled: bool) {
        use windows::Win32::UI::WindowsAndMessaging::{
            GWL_EXSTYLE, GetWindowLongPtrW, SetWindowLongPtrW,
        };

        unsafe {
            let style = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) | Self::WS_EX_LAYERED;
            let style = if enabled {
                style | Self::WS_EX_TRANSPARENT
            } else {
                style & !Self::WS_EX_TRANSPARENT
            };
            SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, style);
        }
        self.click_through = enabled;
    }

    fn set_bounds(&mut self, bounds: WindowBounds) {
        use windows::Win32::UI::WindowsAndMessaging::{HWND_TOPMOST, SWP_NOACTIVATE, SetWindowPos};

        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                bounds.x,
                bounds.y,
                bounds.width as i32,
                bounds.height as i32,
                SWP_NOACTIVATE,
            );
        }
    }

    fn click_through(&self) -> bool {
        self.click_through
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_window_tracks_requested_state() {
        let mut window = NullWindow::new();
        assert!(window.click_through());

        window.set_click_through(false);
        assert!(!window.click_through());

        let bounds = WindowBounds { x: 5, y: 6, width: 800, height: 600 };
        window.set_bounds(bounds);
        assert_eq!(window.bounds(), Some(bounds));
    }
}
