//! Main event loop: receives events from the poll loop (and, in a full
//! build, the UI layer), runs the recognition pipeline, updates panels and
//! the exp session, and kicks off remote item lookups.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use kanal::{AsyncReceiver, AsyncSender};
use mapleglass_api::MapleApiClient;
use mapleglass_core::exp::ExpSession;
use mapleglass_core::{extract, item, text};
use mapleglass_types::{AppEvent, CaptureMode, CroppedRegion, ExpSample, ItemView};

use crate::panels::{InfoContent, PanelState};
use crate::pipeline;
use crate::poll::PollCommand;
use crate::state::AppState;

pub struct EventContext {
    pub state: Arc<AppState>,
    pub panels: Arc<PanelState>,
    pub api: MapleApiClient,
    pub to_poll: AsyncSender<PollCommand>,
}

pub async fn event_loop(ctx: EventContext, rx: AsyncReceiver<AppEvent>) -> Result<()> {
    tracing::info!("event loop started");
    loop {
        let event = rx.recv().await?;
        if !handle_event(&ctx, event).await? {
            return Ok(());
        }
    }
}

/// Handles one event; returns `false` on shutdown.
pub async fn handle_event(ctx: &EventContext, event: AppEvent) -> Result<bool> {
    match event {
        AppEvent::ModeSelected(mode) => {
            ctx.panels.hide_menu();
            ctx.to_poll.send(PollCommand::SelectMode(mode)).await?;
        }
        AppEvent::RegionCommitted { mode, crop } => {
            handle_region(ctx, mode, crop).await?;
        }
        AppEvent::ManualSearch(query) => {
            // The hotkey sends an empty query: just open the panel for
            // typing. A typed query goes straight to the lookup.
            if query.trim().is_empty() {
                ctx.panels.open_info(InfoContent {
                    view: ItemView {
                        name: "Item search".to_string(),
                        ..ItemView::default()
                    },
                    status: "Type a search term.".to_string(),
                    search_text: String::new(),
                });
            } else {
                ctx.panels.open_info(InfoContent {
                    view: ItemView {
                        name: "Item search".to_string(),
                        ..ItemView::default()
                    },
                    status: "Searching...".to_string(),
                    search_text: query.clone(),
                });
                start_search(ctx, query);
            }
        }
        AppEvent::ManualExp { sample, start } => {
            apply_exp_sample(ctx, sample, start);
        }
        AppEvent::CloseAllPanels => ctx.panels.close_all(),
        AppEvent::Shutdown => {
            tracing::info!("shutdown requested");
            return Ok(false);
        }
    }
    Ok(true)
}

async fn handle_region(ctx: &EventContext, mode: CaptureMode, crop: CroppedRegion) -> Result<()> {
    let (scale, debug_dump) = {
        let config = ctx.state.config.read().await;
        (config.ocr.scale, config.ocr.debug_dump)
    };

    let engine = Arc::clone(&ctx.state.engine);
    let recognized = tokio::task::spawn_blocking(move || {
        pipeline::recognize_region(&engine, &crop, mode, scale, debug_dump)
    })
    .await?;

    match mode {
        CaptureMode::Item => match recognized {
            Some(text) => {
                tracing::info!("recognized item text: {text}");
                ctx.panels.open_info(InfoContent {
                    view: ItemView {
                        name: format!("Recognized: [{text}]"),
                        ..ItemView::default()
                    },
                    status: "Searching...".to_string(),
                    search_text: text.clone(),
                });
                start_search(ctx, text);
            }
            None => {
                ctx.panels.open_info(InfoContent {
                    view: ItemView {
                        name: "Recognition failed".to_string(),
                        ..ItemView::default()
                    },
                    status: "Could not read the text; use the search box below.".to_string(),
                    search_text: String::new(),
                });
            }
        },
        CaptureMode::ExpStart | CaptureMode::ExpEnd => {
            let value = recognized.as_deref().and_then(extract::exp_value);
            match value {
                Some(value) => {
                    let percent = recognized.as_deref().map(extract::exp_percent).unwrap_or(0.0);
                    apply_exp_sample(
                        ctx,
                        ExpSample { value, percent },
                        mode == CaptureMode::ExpStart,
                    );
                }
                None => {
                    let status = match recognized {
                        Some(raw) => format!("could not parse '{raw}'"),
                        None => "(could not read)".to_string(),
                    };
                    ctx.panels.set_exp_status(status);
                }
            }
        }
    }

    // The panel (info or exp) is showing either a result or a failure
    // message, so the session always ends with an open panel.
    ctx.to_poll
        .send(PollCommand::PipelineDone { panel_open: true })
        .await?;
    Ok(())
}

fn apply_exp_sample(ctx: &EventContext, sample: ExpSample, start: bool) {
    let status = {
        let Ok(mut guard) = ctx.state.exp.lock() else {
            tracing::warn!("exp session lock poisoned");
            return;
        };
        match guard.as_mut() {
            Some(session) if !start => {
                session.update(sample);
                let stats = session.stats();
                format!(
                    "{} ({:.2}%) | gained {} ({:.2}%) | {} /hr | {}",
                    group_digits(sample.value),
                    sample.percent,
                    group_digits(stats.gained_value),
                    stats.gained_percent,
                    group_digits(stats.value_per_hour),
                    format_elapsed(stats.elapsed),
                )
            }
            _ => {
                *guard = Some(ExpSession::start(sample));
                format!(
                    "start {} ({:.2}%)",
                    group_digits(sample.value),
                    sample.percent
                )
            }
        }
    };
    ctx.panels.set_exp_status(status);
}

fn start_search(ctx: &EventContext, raw_query: String) {
    let Some(query) = text::sanitize_query(&raw_query) else {
        ctx.panels.set_info_status("Not a valid search term.");
        return;
    };

    let generation = ctx.panels.begin_search();
    let api = ctx.api.clone();
    let panels = Arc::clone(&ctx.panels);
    tokio::spawn(async move {
        match lookup_item(&api, &query).await {
            Ok(view) => {
                if !panels.apply_search_result(generation, view) {
                    tracing::debug!("dropping superseded item lookup for '{query}'");
                }
            }
            Err(e) => {
                if !panels.apply_search_failure(generation, format!("Lookup failed: {e}")) {
                    tracing::debug!("dropping superseded item lookup failure for '{query}'");
                }
            }
        }
    });
}

async fn lookup_item(api: &MapleApiClient, query: &str) -> Result<ItemView> {
    let results = api.search_items(query).await?;
    let Some(best) = MapleApiClient::best_match(&results, query) else {
        anyhow::bail!("no results for '{query}'");
    };

    let mut view = ItemView {
        name: if best.name.is_empty() {
            query.to_string()
        } else {
            best.name.clone()
        },
        description: best
            .description
            .clone()
            .unwrap_or_else(|| "No description.".to_string()),
        ..ItemView::default()
    };

    // Detail record carries the classic stats; the search record already
    // gave us name and flavor text, so a detail failure only loses stats.
    match api.item_detail(best.id).await {
        Ok(detail) => {
            view.requirements = item::requirements(&detail);
            view.stats = item::stat_bonuses(&detail);
            view.price = item::price(&detail);
            if best.name.is_empty()
                && let Some(name) = item::display_name(&detail)
            {
                view.name = name;
            }
            if best.description.is_none()
                && let Some(desc) = item::description_text(&detail)
            {
                view.description = desc;
            }
        }
        Err(e) => {
            tracing::warn!("detail lookup for item {} failed: {e:#}", best.id);
        }
    }
    Ok(view)
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(4_000_000), "4,000,000");
        assert_eq!(group_digits(12345), "12,345");
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "01:02:03");
    }
}
