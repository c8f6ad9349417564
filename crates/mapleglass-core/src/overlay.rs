//! Capture/interaction state machine. Pure: the poll loop feeds it sampled
//! input edges and mouse positions, and carries out the effects it returns
//! (freezing the screen, running the pipeline, toggling panels). Keeping it
//! free of I/O lets the whole interaction flow run headless in tests.

use mapleglass_types::{CaptureMode, CaptureRegion};

/// Where the overlay currently is in a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Mode-selection menu is up, waiting for a choice.
    ModeMenu,
    /// Click-drag over the frozen snapshot.
    RegionSelecting(CaptureMode),
    /// Pipeline running against the committed region.
    Recognizing(CaptureMode),
    /// A result panel is showing and the window accepts mouse input.
    PanelOpen,
}

/// What the driving loop must do after a machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Show the mode-selection menu (closing other panels first).
    OpenMenu,
    /// Hide the mode-selection menu.
    CloseMenu,
    /// Freeze a full-screen snapshot and show the selection canvas.
    BeginSelection(CaptureMode),
    /// Drop the snapshot and hide the canvas; `reopen_exp` re-shows the exp
    /// panel when an exp capture was abandoned.
    CancelSelection { reopen_exp: bool },
    /// Crop the snapshot to `region` and run the recognition pipeline.
    RunPipeline {
        mode: CaptureMode,
        region: CaptureRegion,
    },
    /// Hide every panel, cancel any selection, restore click-through.
    TeardownAll,
}

/// Down-edge detector for a level-sampled key. Fires once when the key goes
/// down and re-arms only after it is released, so holding the key does not
/// repeat-fire across poll ticks.
#[derive(Debug, Default)]
pub struct KeyEdge {
    held: bool,
}

impl KeyEdge {
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }
}

/// Live drag rectangle anchored at the mouse-down point, normalized to
/// non-negative width/height regardless of drag direction.
#[derive(Debug, Clone, Copy)]
struct DragTracker {
    anchor: (i32, i32),
    current: (i32, i32),
}

impl DragTracker {
    fn new(x: i32, y: i32) -> Self {
        Self {
            anchor: (x, y),
            current: (x, y),
        }
    }

    fn update(&mut self, x: i32, y: i32) {
        self.current = (x, y);
    }

    fn region(&self) -> CaptureRegion {
        CaptureRegion {
            x: self.anchor.0.min(self.current.0),
            y: self.anchor.1.min(self.current.1),
            width: self.anchor.0.abs_diff(self.current.0),
            height: self.anchor.1.abs_diff(self.current.1),
        }
    }
}

pub struct OverlayMachine {
    phase: Phase,
    min_region_px: u32,
    drag: Option<DragTracker>,
}

impl OverlayMachine {
    pub fn new(min_region_px: u32) -> Self {
        Self {
            phase: Phase::Idle,
            min_region_px,
            drag: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while the selection canvas should be visible and interactive.
    pub fn selection_active(&self) -> bool {
        matches!(self.phase, Phase::RegionSelecting(_))
    }

    /// Capture hotkey, already edge-detected by the caller. Toggles the
    /// mode menu; ignored outright while a pipeline is running.
    pub fn on_capture_key(&mut self) -> Effect {
        match self.phase {
            Phase::Recognizing(_) => Effect::None,
            Phase::ModeMenu => {
                self.phase = Phase::Idle;
                Effect::CloseMenu
            }
            _ => {
                self.drag = None;
                self.phase = Phase::ModeMenu;
                Effect::OpenMenu
            }
        }
    }

    /// A capture mode was chosen (menu click or exp-panel button).
    pub fn select_mode(&mut self, mode: CaptureMode) -> Effect {
        match self.phase {
            Phase::Recognizing(_) | Phase::RegionSelecting(_) => Effect::None,
            _ => {
                self.drag = None;
                self.phase = Phase::RegionSelecting(mode);
                Effect::BeginSelection(mode)
            }
        }
    }

    pub fn on_mouse_down(&mut self, x: i32, y: i32) {
        if self.selection_active() {
            self.drag = Some(DragTracker::new(x, y));
        }
    }

    pub fn on_mouse_move(&mut self, x: i32, y: i32) {
        if self.selection_active()
            && let Some(drag) = self.drag.as_mut()
        {
            drag.update(x, y);
        }
    }

    /// Mouse-up commits the rectangle. Too-small rectangles are treated as
    /// accidental clicks and cancel the selection.
    pub fn on_mouse_up(&mut self, x: i32, y: i32) -> Effect {
        let Phase::RegionSelecting(mode) = self.phase else {
            return Effect::None;
        };
        let Some(mut drag) = self.drag.take() else {
            return Effect::None;
        };
        drag.update(x, y);
        let region = drag.region();

        if region.exceeds(self.min_region_px) {
            self.phase = Phase::Recognizing(mode);
            Effect::RunPipeline { mode, region }
        } else {
            self.phase = Phase::Idle;
            Effect::CancelSelection {
                reopen_exp: mode.is_exp(),
            }
        }
    }

    /// Pipeline completion. Ignored when the session was torn down while
    /// the pipeline was still running.
    pub fn on_pipeline_done(&mut self, panel_open: bool) {
        if matches!(self.phase, Phase::Recognizing(_)) {
            self.phase = if panel_open { Phase::PanelOpen } else { Phase::Idle };
        }
    }

    /// Close hotkey: from any non-idle state, tear everything down.
    pub fn on_close_key(&mut self) -> Effect {
        if self.phase == Phase::Idle {
            return Effect::None;
        }
        self.drag = None;
        self.phase = Phase::Idle;
        Effect::TeardownAll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> OverlayMachine {
        OverlayMachine::new(10)
    }

    #[test]
    fn key_edge_fires_once_per_press() {
        let mut edge = KeyEdge::default();
        assert!(!edge.update(false));
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }

    #[test]
    fn drag_normalizes_reverse_direction() {
        let mut m = machine();
        m.select_mode(CaptureMode::Item);
        m.on_mouse_down(100, 80);
        m.on_mouse_move(40, 20);
        let Effect::RunPipeline { region, .. } = m.on_mouse_up(40, 20) else {
            panic!("expected pipeline run");
        };
        assert_eq!(region, CaptureRegion { x: 40, y: 20, width: 60, height: 60 });
    }

    #[test]
    fn small_commit_is_a_noop() {
        let mut m = machine();
        m.on_capture_key();
        m.select_mode(CaptureMode::Item);
        m.on_mouse_down(10, 10);
        let effect = m.on_mouse_up(15, 300);
        assert_eq!(effect, Effect::CancelSelection { reopen_exp: false });
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn small_exp_commit_reopens_exp_panel() {
        let mut m = machine();
        m.select_mode(CaptureMode::ExpStart);
        m.on_mouse_down(0, 0);
        let effect = m.on_mouse_up(5, 5);
        assert_eq!(effect, Effect::CancelSelection { reopen_exp: true });
    }

    #[test]
    fn capture_key_ignored_while_recognizing() {
        let mut m = machine();
        m.select_mode(CaptureMode::Item);
        m.on_mouse_down(0, 0);
        assert!(matches!(m.on_mouse_up(50, 20), Effect::RunPipeline { .. }));
        assert_eq!(m.phase(), Phase::Recognizing(CaptureMode::Item));

        assert_eq!(m.on_capture_key(), Effect::None);
        assert_eq!(m.phase(), Phase::Recognizing(CaptureMode::Item));

        m.on_pipeline_done(true);
        assert_eq!(m.phase(), Phase::PanelOpen);
        assert_eq!(m.on_capture_key(), Effect::OpenMenu);
    }

    #[test]
    fn full_capture_session() {
        let mut m = machine();
        assert_eq!(m.on_capture_key(), Effect::OpenMenu);
        assert_eq!(m.phase(), Phase::ModeMenu);

        assert_eq!(
            m.select_mode(CaptureMode::Item),
            Effect::BeginSelection(CaptureMode::Item)
        );

        m.on_mouse_down(200, 100);
        m.on_mouse_move(230, 110);
        let effect = m.on_mouse_up(250, 120);
        assert_eq!(
            effect,
            Effect::RunPipeline {
                mode: CaptureMode::Item,
                region: CaptureRegion { x: 200, y: 100, width: 50, height: 20 },
            }
        );

        m.on_pipeline_done(true);
        assert_eq!(m.phase(), Phase::PanelOpen);
    }

    #[test]
    fn capture_key_toggles_menu_closed() {
        let mut m = machine();
        m.on_capture_key();
        assert_eq!(m.on_capture_key(), Effect::CloseMenu);
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn close_key_tears_down_any_active_state() {
        let mut m = machine();
        assert_eq!(m.on_close_key(), Effect::None);

        m.select_mode(CaptureMode::ExpEnd);
        m.on_mouse_down(0, 0);
        assert_eq!(m.on_close_key(), Effect::TeardownAll);
        assert_eq!(m.phase(), Phase::Idle);

        // Mouse-up after teardown must not commit anything.
        assert_eq!(m.on_mouse_up(500, 500), Effect::None);
    }

    #[test]
    fn pipeline_done_after_teardown_is_ignored() {
        let mut m = machine();
        m.select_mode(CaptureMode::Item);
        m.on_mouse_down(0, 0);
        m.on_mouse_up(100, 100);
        m.on_close_key();
        m.on_pipeline_done(true);
        assert_eq!(m.phase(), Phase::Idle);
    }
}
