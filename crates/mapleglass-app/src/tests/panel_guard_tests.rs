//! Staleness guard for asynchronous item lookups: a result may only land
//! in the panel generation it was started for.

use mapleglass_types::ItemView;

use crate::panels::{InfoContent, PanelState};

fn open_panel(panels: &PanelState, search_text: &str) {
    panels.open_info(InfoContent {
        view: ItemView::default(),
        status: "Searching...".to_string(),
        search_text: search_text.to_string(),
    });
}

fn view(name: &str) -> ItemView {
    ItemView {
        name: name.to_string(),
        ..ItemView::default()
    }
}

#[test]
fn superseded_lookup_result_is_dropped() {
    let panels = PanelState::default();
    open_panel(&panels, "zakum helmet");

    let first = panels.begin_search();
    let second = panels.begin_search();

    assert!(!panels.apply_search_result(first, view("stale")));
    assert!(panels.apply_search_result(second, view("fresh")));
    assert_eq!(panels.info().view.name, "fresh");
}

#[test]
fn result_for_closed_panel_is_dropped() {
    let panels = PanelState::default();
    open_panel(&panels, "maple shield");
    let generation = panels.begin_search();

    panels.close_all();
    assert!(!panels.apply_search_result(generation, view("late")));
    assert_eq!(panels.info().view.name, "");
}

#[test]
fn current_lookup_failure_sets_status() {
    let panels = PanelState::default();
    open_panel(&panels, "ilbi");
    let generation = panels.begin_search();

    assert!(panels.apply_search_failure(generation, "Lookup failed: timeout"));
    assert_eq!(panels.info().status, "Lookup failed: timeout");
}

#[test]
fn stale_failure_does_not_clobber_newer_result() {
    let panels = PanelState::default();
    open_panel(&panels, "ilbi");

    let first = panels.begin_search();
    let second = panels.begin_search();
    assert!(panels.apply_search_result(second, view("ilbi")));

    assert!(!panels.apply_search_failure(first, "Lookup failed: timeout"));
    assert_eq!(panels.info().view.name, "ilbi");
    assert_eq!(panels.info().status, "");
}

#[test]
fn successful_result_clears_the_searching_status() {
    let panels = PanelState::default();
    open_panel(&panels, "red whip");
    let generation = panels.begin_search();

    assert!(panels.apply_search_result(generation, view("red whip")));
    let info = panels.info();
    assert_eq!(info.view.name, "red whip");
    assert!(info.status.is_empty());
}
