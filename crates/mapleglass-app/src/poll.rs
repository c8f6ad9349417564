//! The 50ms poll loop. Runs on a dedicated blocking thread: samples global
//! input, steps the overlay state machine, owns the frozen snapshot, and
//! keeps the overlay window glued to the game window. Everything slow
//! (recognition, network) is handed to the event loop over a channel.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use kanal::{Receiver, Sender};
use mapleglass_config::Config;
use mapleglass_core::overlay::{Effect, KeyEdge, OverlayMachine};
use mapleglass_ocr::{
    FrozenFrame, InputSampler, KeyBindings, OverlayWindow, WindowBounds, find_target_window,
    primary_screen_size,
};
use mapleglass_types::{AppEvent, CaptureMode};
use tokio_util::sync::CancellationToken;

use crate::panels::PanelState;

/// Lets the screen repaint after panels are hidden, so the frozen snapshot
/// does not contain the overlay itself.
const SETTLE_BEFORE_CAPTURE: Duration = Duration::from_millis(100);

/// Feedback from the event loop back into the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    /// A capture mode was chosen; begin region selection.
    SelectMode(CaptureMode),
    /// The recognition pipeline finished for the committed region.
    PipelineDone { panel_open: bool },
}

pub struct PollLoop {
    machine: OverlayMachine,
    frame: Option<FrozenFrame>,
    window: Box<dyn OverlayWindow>,
    sampler: InputSampler,
    keys: KeyBindings,
    panels: Arc<PanelState>,
    events: Sender<AppEvent>,
    commands: Receiver<PollCommand>,
    interval: Duration,
    target_class: String,
    target_title: String,

    capture_edge: KeyEdge,
    manual_edge: KeyEdge,
    exit_edge: KeyEdge,
    close_edge: KeyEdge,
    left_held: bool,
    last_bounds: Option<WindowBounds>,
}

impl PollLoop {
    pub fn new(
        config: &Config,
        window: Box<dyn OverlayWindow>,
        panels: Arc<PanelState>,
        events: Sender<AppEvent>,
        commands: Receiver<PollCommand>,
    ) -> Self {
        Self {
            machine: OverlayMachine::new(config.ocr.min_region_px),
            frame: None,
            window,
            sampler: InputSampler::new(),
            keys: KeyBindings::from_config(&config.hotkeys),
            panels,
            events,
            commands,
            interval: Duration::from_millis(config.ui.poll_interval_ms),
            target_class: config.ui.target_window_class.clone(),
            target_title: config.ui.target_window_title.clone(),
            capture_edge: KeyEdge::default(),
            manual_edge: KeyEdge::default(),
            exit_edge: KeyEdge::default(),
            close_edge: KeyEdge::default(),
            left_held: false,
            last_bounds: None,
        }
    }

    pub fn run(mut self, cancel: CancellationToken) -> Result<()> {
        tracing::info!("poll loop started at {:?} interval", self.interval);
        while !cancel.is_cancelled() {
            if !self.tick()? {
                break;
            }
            thread::sleep(self.interval);
        }
        tracing::info!("poll loop stopped");
        Ok(())
    }

    /// One poll tick; returns `false` on exit hotkey.
    fn tick(&mut self) -> Result<bool> {
        self.drain_commands()?;

        let input = self.sampler.sample(&self.keys);

        if self.exit_edge.update(input.exit_down) {
            tracing::info!("exit hotkey pressed");
            self.events.send(AppEvent::Shutdown)?;
            return Ok(false);
        }

        if self.close_edge.update(input.close_down) {
            let effect = self.machine.on_close_key();
            if effect == Effect::TeardownAll {
                self.apply_effect(effect)?;
            } else if self.panels.any_visible() {
                // Panels can outlive the machine's session (manual search,
                // exp tracker), so the close key still clears them.
                self.events.send(AppEvent::CloseAllPanels)?;
            }
        }

        if self.capture_edge.update(input.capture_down) {
            let effect = self.machine.on_capture_key();
            self.apply_effect(effect)?;
        }

        if self.manual_edge.update(input.manual_search_down) {
            self.events.send(AppEvent::ManualSearch(String::new()))?;
        }

        let (x, y) = input.mouse_pos;
        if input.left_button_down && !self.left_held {
            self.machine.on_mouse_down(x, y);
        } else if input.left_button_down {
            self.machine.on_mouse_move(x, y);
        } else if self.left_held {
            let effect = self.machine.on_mouse_up(x, y);
            self.apply_effect(effect)?;
        }
        self.left_held = input.left_button_down;

        self.track_game_window();
        self.reconcile_click_through();
        Ok(true)
    }

    fn drain_commands(&mut self) -> Result<()> {
        while let Ok(Some(command)) = self.commands.try_recv() {
            match command {
                PollCommand::SelectMode(mode) => {
                    let effect = self.machine.select_mode(mode);
                    self.apply_effect(effect)?;
                }
                PollCommand::PipelineDone { panel_open } => {
                    self.machine.on_pipeline_done(panel_open);
                }
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::None => {}
            Effect::OpenMenu => {
                self.panels.close_all();
                self.panels.show_menu();
            }
            Effect::CloseMenu => self.panels.hide_menu(),
            Effect::BeginSelection(mode) => self.begin_selection(mode)?,
            Effect::CancelSelection { reopen_exp } => {
                self.frame = None;
                if reopen_exp {
                    self.panels.show_exp();
                }
            }
            Effect::RunPipeline { mode, region } => {
                let crop = self.frame.take().and_then(|frame| frame.crop(region));
                match crop {
                    Some(crop) => {
                        self.events.send(AppEvent::RegionCommitted { mode, crop })?;
                    }
                    None => {
                        tracing::warn!("committed region {region:?} had no capturable area");
                        self.machine.on_pipeline_done(false);
                        if mode.is_exp() {
                            self.panels.show_exp();
                        }
                    }
                }
            }
            Effect::TeardownAll => {
                self.frame = None;
                self.events.send(AppEvent::CloseAllPanels)?;
            }
        }
        Ok(())
    }

    fn begin_selection(&mut self, mode: CaptureMode) -> Result<()> {
        // Panels must be off-screen before the snapshot is taken.
        self.panels.close_all();
        self.reconcile_click_through();
        thread::sleep(SETTLE_BEFORE_CAPTURE);

        match FrozenFrame::capture_primary() {
            Ok(frame) => {
                tracing::debug!(
                    "frozen {}x{} snapshot for {mode:?} selection",
                    frame.width(),
                    frame.height()
                );
                self.frame = Some(frame);
            }
            Err(e) => {
                tracing::error!("screen capture failed: {e:#}");
                let effect = self.machine.on_close_key();
                self.apply_effect(effect)?;
            }
        }
        Ok(())
    }

    /// Follows the game window, falling back to the primary monitor while
    /// the game is not running. Frozen during selection so the canvas does
    /// not move under the drag.
    fn track_game_window(&mut self) {
        if self.machine.selection_active() {
            return;
        }

        let bounds = find_target_window(&self.target_class, &self.target_title).or_else(|| {
            primary_screen_size()
                .ok()
                .map(|(width, height)| WindowBounds { x: 0, y: 0, width, height })
        });

        if let Some(bounds) = bounds
            && self.last_bounds != Some(bounds)
        {
            self.window.set_bounds(bounds);
            self.last_bounds = Some(bounds);
        }
    }

    /// The overlay eats mouse input only while something needs clicking.
    fn reconcile_click_through(&mut self) {
        let interactive = self.panels.any_visible() || self.machine.selection_active();
        if self.window.click_through() == interactive {
            self.window.set_click_through(!interactive);
        }
    }
}
