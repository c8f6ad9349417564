use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mapleglass_api::MapleApiClient;
use mapleglass_config::Config;
use mapleglass_ocr::OverlayWindow;
use mapleglass_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{EventContext, event_loop};
use crate::panels::PanelState;
use crate::poll::{PollCommand, PollLoop};
use crate::state::AppState;

/// Centralized channel management. The poll thread talks over the sync
/// halves of these channels; the event loop over the async halves.
pub struct ChannelSet {
    pub poll_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_poll: (AsyncSender<PollCommand>, AsyncReceiver<PollCommand>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            poll_to_app: kanal::bounded_async(64),
            app_to_poll: kanal::bounded_async(32),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle.
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    panels: Arc<PanelState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, panels: Arc<PanelState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            panels,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        config: &Config,
        window: Box<dyn OverlayWindow>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        let ctx = EventContext {
            state: Arc::clone(&self.state),
            panels: Arc::clone(&self.panels),
            api: MapleApiClient::new(),
            to_poll: self.channels.app_to_poll.0.clone(),
        };
        tasks.spawn(event_loop(ctx, self.channels.poll_to_app.1.clone()));

        // Input poll loop, on its own blocking thread. PollLoop's input
        // sampler holds a non-Send X11 handle, so it is constructed on the
        // blocking thread it runs on.
        let config = config.clone();
        let panels = Arc::clone(&self.panels);
        let events = self.channels.poll_to_app.0.clone().to_sync();
        let commands = self.channels.app_to_poll.1.clone().to_sync();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move {
            tokio::task::spawn_blocking(move || {
                let poll = PollLoop::new(&config, window, panels, events, commands);
                poll.run(cancel)
            })
            .await?
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
