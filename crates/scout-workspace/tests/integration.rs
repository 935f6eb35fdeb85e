//! Integration tests for ScoutWorkspace
//!
//! These tests verify the full workspace workflow including:
//! - Graph window lifecycle (open, reopen, minimize, close)
//! - Persistence of teams and window geometry across sessions
//! - Canvas pan/zoom and drag-library gestures
//! - Stacked-point badges and popups
//! - Auto-layout and deferred settle steps

use scout_workspace::persistence::{GRAPH_POSITIONS_KEY, SELECTED_TEAMS_KEY};
use scout_workspace::testing::{MemoryStore, RecordingChart};
use scout_workspace::{
    ChartDataset, ChartPoint, DragCallbacks, Gesture, GraphOpen, InputResult, KeyValueStore,
    PopupContent, ResizeHandle, ScoutWorkspace, SettleTask, Size, Vec2, WorkspaceConfig,
    WorkspaceError,
};

fn workspace(store: &MemoryStore) -> ScoutWorkspace {
    let mut ws = ScoutWorkspace::new(WorkspaceConfig::default(), Box::new(store.clone()));
    ws.init(1920.0, 1080.0);
    ws
}

fn point(x: f64, y: f64, team: u32, scouter: &str) -> ChartPoint {
    ChartPoint { x, y, team, scouter: scouter.to_string(), notes: String::new() }
}

fn two_team_chart() -> RecordingChart {
    RecordingChart::line(vec![
        ChartDataset {
            label: "Team 254".to_string(),
            color: "#5ca8ff".to_string(),
            points: vec![point(1.0, 4.0, 254, "ana"), point(2.0, 6.0, 254, "ana")],
        },
        ChartDataset {
            label: "Team 1114".to_string(),
            color: "#ff5252".to_string(),
            points: vec![point(1.0, 4.0, 1114, "bo"), point(2.0, 1.0, 1114, "bo")],
        },
    ])
}

// =============================================================================
// Window Lifecycle Tests
// =============================================================================

#[test]
fn test_graph_lifecycle_full() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);

    assert!(matches!(ws.open_graph("net", 0.0), Err(WorkspaceError::NoTeamsSelected)));
    ws.set_team(0, Some(254), 0.0);

    // Open
    let id = ws.open_graph("net", 0.0).unwrap().id();
    let window = ws.registry().get(id).unwrap();
    assert_eq!(window.title, "Net");
    assert!((window.position.x - 50.0).abs() < 0.001);
    assert!((window.position.y - 50.0).abs() < 0.001);
    assert!((window.size.width - 900.0).abs() < 0.001);
    assert!((window.size.height - 300.0).abs() < 0.001);

    // Second category cascades
    let second = ws.open_graph("processor", 0.0).unwrap().id();
    let window = ws.registry().get(second).unwrap();
    assert!((window.position.x - 80.0).abs() < 0.001);
    assert_eq!(ws.taskbar().len(), 2);

    // Reopening focuses instead of duplicating
    assert_eq!(ws.open_graph("net", 0.0).unwrap(), GraphOpen::Existing(id));
    assert_eq!(ws.registry().len(), 2);
    assert_eq!(ws.registry().focused(), Some(id));

    // Minimize keeps the taskbar entry
    ws.minimize_window(id);
    assert!(!ws.taskbar().entry(id).unwrap().visible);
    assert_eq!(ws.registry().focused(), Some(second));

    // Close both, then reopen at the cascade base
    ws.close_window(id);
    ws.close_window(second);
    assert!(ws.taskbar().is_empty());
    assert_eq!(store.raw(GRAPH_POSITIONS_KEY).as_deref(), Some("{}"));

    let reopened = ws.open_graph("net", 0.0).unwrap().id();
    assert_ne!(reopened, id);
    let window = ws.registry().get(reopened).unwrap();
    assert!((window.position.x - 50.0).abs() < 0.001);
    assert!((window.position.y - 50.0).abs() < 0.001);
}

#[test]
fn test_session_restores_teams_and_ids() {
    let store = MemoryStore::new();
    let first_id = {
        let mut ws = workspace(&store);
        ws.set_team(0, Some(254), 0.0);
        ws.add_team_selector();
        ws.set_team(1, Some(1114), 0.0);
        ws.open_graph("net", 0.0).unwrap().id()
    };
    assert_eq!(store.raw(SELECTED_TEAMS_KEY).as_deref(), Some("[254,1114]"));

    let mut ws = workspace(&store);
    assert_eq!(ws.selection().selected(), vec![254, 1114]);
    assert!(ws.registry().geometry().get(first_id).is_some());

    // New windows never reuse a persisted id
    let id = ws.open_graph("net", 0.0).unwrap().id();
    assert!(id > first_id);
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let store = MemoryStore::new();
    store.set(SELECTED_TEAMS_KEY, "not json").unwrap();
    store.set(GRAPH_POSITIONS_KEY, "{\"graph-1\": 12}").unwrap();

    let ws = workspace(&store);
    assert!(ws.selection().selected().is_empty());
    assert!(ws.registry().geometry().is_empty());
}

#[test]
fn test_store_failures_are_not_fatal() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    store.fail_writes(true);

    ws.set_team(0, Some(254), 0.0);
    let id = ws.open_graph("net", 0.0).unwrap().id();
    assert!(ws.registry().get(id).is_some());
    assert!(store.raw(SELECTED_TEAMS_KEY).is_none());
}

// =============================================================================
// Canvas and Drag Tests
// =============================================================================

#[test]
fn test_wheel_zoom_bounds() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);

    for _ in 0..50 {
        assert_eq!(ws.handle_wheel(400.0, 300.0, -100.0), InputResult::Handled);
    }
    assert!((ws.transform().scale - 3.0).abs() < 0.001);

    for _ in 0..50 {
        ws.handle_wheel(400.0, 300.0, 100.0);
    }
    assert!((ws.transform().scale - 0.3).abs() < 0.001);
}

#[test]
fn test_drag_and_resize_persist_on_end() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    let id = ws.open_graph("net", 0.0).unwrap().id();
    let writes = store.write_count();

    ws.on_start(id, Gesture::Move);
    ws.on_move(id, Vec2::new(10.0, 0.0));
    ws.on_move(id, Vec2::new(10.0, 0.0));
    assert_eq!(store.write_count(), writes);
    ws.on_end(id, 0.0);
    assert_eq!(store.write_count(), writes + 1);
    assert!(store.raw(GRAPH_POSITIONS_KEY).unwrap().contains("\"x\":70.0"));

    ws.on_start(id, Gesture::Resize(ResizeHandle::E));
    ws.on_move(id, Vec2::new(100.0, 0.0));
    ws.on_end(id, 0.0);
    assert!(store.raw(GRAPH_POSITIONS_KEY).unwrap().contains("\"width\":1000.0"));
}

#[test]
fn test_lock_blocks_window_gestures() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    let id = ws.open_graph("net", 0.0).unwrap().id();

    assert!(ws.toggle_lock());
    assert_eq!(ws.on_start(id, Gesture::Move), InputResult::Unhandled);
    assert_eq!(ws.on_start(id, Gesture::Resize(ResizeHandle::SE)), InputResult::Unhandled);
    assert_eq!(ws.handle_pointer_down(0.0, 0.0, 1), InputResult::Unhandled);
    assert_eq!(ws.handle_wheel(0.0, 0.0, -1.0), InputResult::Handled);

    assert!(!ws.toggle_lock());
    assert_eq!(ws.on_start(id, Gesture::Move), InputResult::Handled);
}

// =============================================================================
// Overlay Tests
// =============================================================================

#[test]
fn test_stacked_badge_and_popup() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    ws.add_team_selector();
    ws.set_team(1, Some(1114), 0.0);
    ws.open_graph("net", 0.0).unwrap();

    let request = ws.take_render_requests().pop().unwrap();
    assert_eq!(request.teams, vec![254, 1114]);
    ws.attach_chart(&request.ticket, Box::new(two_team_chart())).unwrap();

    let views = ws.badge_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].label, "2");

    let popup = ws
        .click_badge(request.ticket.window, 0, Vec2::new(300.0, 300.0), Size::new(1920.0, 1080.0))
        .unwrap();
    assert_eq!(popup.title(), "Match #1 - 2 Teams");
    assert!((popup.left - 310.0).abs() < 0.001);
    assert!((popup.top - 250.0).abs() < 0.001);

    // A single point opens the plain popup
    let popup = ws
        .click_point(request.ticket.window, 0, 1, Vec2::new(10.0, 10.0), Size::new(1920.0, 1080.0))
        .unwrap();
    assert!(matches!(popup.content, PopupContent::Point(_)));
    assert_eq!(popup.title(), "Match #2");
}

#[test]
fn test_badges_follow_resize_settle() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    let id = ws.open_graph("net", 0.0).unwrap().id();
    let ticket = ws.take_render_requests().remove(0).ticket;
    ws.attach_chart(&ticket, Box::new(two_team_chart())).unwrap();
    assert_eq!(ws.badges(id).len(), 1);

    ws.on_start(id, Gesture::Resize(ResizeHandle::SE));
    ws.on_move(id, Vec2::new(50.0, 50.0));
    assert!(ws.badges(id).is_empty());

    ws.on_end(id, 2000.0);
    assert!(ws.badges(id).is_empty());
    ws.tick(2050.0);
    assert_eq!(ws.badges(id).len(), 1);
}

#[test]
fn test_stale_render_is_discarded() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    ws.open_graph("net", 0.0).unwrap();
    let stale = ws.take_render_requests().remove(0).ticket;

    // Team change re-renders before the first load finished
    ws.add_team_selector();
    ws.set_team(1, Some(1114), 0.0);
    let current = ws.take_render_requests().remove(0).ticket;

    let chart = two_team_chart();
    let calls = chart.calls();
    assert!(matches!(
        ws.attach_chart(&stale, Box::new(chart)),
        Err(WorkspaceError::StaleRender(_))
    ));
    assert!(calls.destroyed());
    assert!(ws.attach_chart(&current, Box::new(two_team_chart())).is_ok());
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_auto_layout_then_settle() {
    let store = MemoryStore::new();
    let mut ws = workspace(&store);
    ws.set_team(0, Some(254), 0.0);
    for category in ["net", "processor", "climb", "auto_coral"] {
        ws.open_graph(category, 0.0).unwrap();
    }

    assert!(ws.auto_layout(1000.0));
    let rects = ws.registry().visible_rects();
    let centroid = rects.iter().fold(Vec2::ZERO, |acc, r| acc + r.center()) / rects.len() as f32;
    assert!(centroid.x.abs() < 0.001);
    assert!(centroid.y.abs() < 0.001);

    ws.tick(1100.0);
    assert!(!ws.pending_settle_tasks().contains(&SettleTask::ResetView));
    // capped at 1 even though (1920 - 100) / 1820 also fits
    assert!((ws.transform().scale - 1.0).abs() < 0.001);
    assert!(ws.canvas_view().transition_ms > 0.0);

    ws.tick(10_000.0);
    assert!(ws.is_settled());
}
