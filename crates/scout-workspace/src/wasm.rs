//! WASM exports for the graph workspace
//!
//! This module provides wasm-bindgen exports for [`ScoutWorkspace`], along
//! with the browser implementations of its seams: localStorage for the
//! key-value store, Chart.js instances for chart handles and the console for
//! logging.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::{self, ApiError, CategoryPoint, ClimbHistogram, TeamPerformancePoint, UploadOutcome};
use crate::chart::{ChartDataset, ChartHandle, ChartKind, ChartSpec, UpdateMode};
use crate::config::WorkspaceConfig;
use crate::engine::{RenderTicket, ScoutWorkspace};
use crate::input::{DragCallbacks, Gesture};
use crate::math::{Size, Vec2};
use crate::overlay::ChartSource;
use crate::persistence::{KeyValueStore, StoreError};
use crate::window::{ResizeHandle, WindowId};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

// =========================================================================
// Logging
// =========================================================================

/// `log` backend writing to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[scout-workspace] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route `log` output to the console; `debug` enables debug-level records
#[wasm_bindgen]
pub fn init_logging(debug: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if debug { log::LevelFilter::Debug } else { log::LevelFilter::Info });
    }
}

// =========================================================================
// localStorage
// =========================================================================

/// Key-value store backed by `window.localStorage`
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::QuotaExceeded(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}

// =========================================================================
// Chart.js handle
// =========================================================================

/// A Chart.js instance attached to a graph window or the performance chart
struct JsChart {
    chart: JsValue,
    kind: ChartKind,
    datasets: Vec<ChartDataset>,
}

impl JsChart {
    /// Wrap `chart`, keeping the kind and datasets of the spec it was built from
    fn from_spec_json(chart: JsValue, spec_json: &str) -> Result<Self, JsValue> {
        let spec: SpecDatasets = serde_json::from_str(spec_json).map_err(to_js_error)?;
        Ok(Self { chart, kind: spec.kind, datasets: spec.datasets })
    }

    fn call(&self, method: &str, args: &js_sys::Array) {
        let result = js_sys::Reflect::get(&self.chart, &method.into())
            .and_then(|f| f.dyn_into::<js_sys::Function>())
            .and_then(|f| js_sys::Reflect::apply(&f, &self.chart, args));
        if let Err(e) = result {
            log::warn!("chart.{} failed: {:?}", method, e);
        }
    }
}

fn get_f32(target: &JsValue, key: &str) -> Option<f32> {
    js_sys::Reflect::get(target, &key.into())
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
}

impl ChartHandle for JsChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn datasets(&self) -> &[ChartDataset] {
        &self.datasets
    }

    fn point_position(&self, dataset: usize, index: usize) -> Option<Vec2> {
        let get_meta = js_sys::Reflect::get(&self.chart, &"getDatasetMeta".into())
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        let meta = get_meta.call1(&self.chart, &JsValue::from(dataset as u32)).ok()?;
        let data = js_sys::Reflect::get(&meta, &"data".into()).ok()?;
        let element = js_sys::Reflect::get_u32(&data, index as u32).ok()?;
        if element.is_undefined() {
            return None;
        }
        Some(Vec2::new(get_f32(&element, "x")?, get_f32(&element, "y")?))
    }

    fn resize(&mut self) {
        self.call("resize", &js_sys::Array::new());
    }

    fn update(&mut self, mode: UpdateMode) {
        let args = match mode {
            UpdateMode::Default => js_sys::Array::new(),
            UpdateMode::Immediate => js_sys::Array::of1(&"none".into()),
        };
        self.call("update", &args);
    }

    fn destroy(&mut self) {
        self.call("destroy", &js_sys::Array::new());
    }
}

// =========================================================================
// Fetch
// =========================================================================

/// Send a request and read the whole body; returns `(status, body)`
async fn fetch_body(path: &str, init: Option<&web_sys::RequestInit>) -> Result<(u16, String), ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let request = match init {
        Some(init) => window.fetch_with_str_and_init(path, init),
        None => window.fetch_with_str(path),
    };
    let response = JsFuture::from(request)
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?
        .dyn_into::<web_sys::Response>()
        .map_err(|_| ApiError::Network("not a Response".to_string()))?;

    let text_promise = response.text().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?
        .as_string()
        .unwrap_or_default();
    Ok((response.status(), body))
}

/// GET `path` and return the body text
async fn fetch_text(path: &str) -> Result<String, ApiError> {
    let (status, body) = fetch_body(path, None).await?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, message: body });
    }
    Ok(body)
}

async fn fetch_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let body = fetch_text(path).await?;
    Ok(serde_json::from_str(&body)?)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Workspace configuration from JSON; empty input means defaults
fn parse_config(config_json: &str) -> Result<WorkspaceConfig, JsValue> {
    if config_json.trim().is_empty() {
        Ok(WorkspaceConfig::default())
    } else {
        WorkspaceConfig::from_json(config_json).map_err(to_js_error)
    }
}

fn parse_team_list(teams_json: &str) -> Result<Vec<u32>, JsValue> {
    api::parse_teams(teams_json).map_err(to_js_error)
}

/// Load the chart data for one category and build its chart description
async fn load_category_spec(category: &str, teams: &[u32], config: &WorkspaceConfig) -> Result<ChartSpec, ApiError> {
    if category == "climb" {
        let mut series = Vec::with_capacity(teams.len());
        for &team in teams {
            let histogram: ClimbHistogram = fetch_json(&api::category_performance_path(team, category)).await?;
            series.push((team, histogram));
        }
        return Ok(ChartSpec::climb(series, config));
    }

    let mut series = Vec::with_capacity(teams.len());
    for &team in teams {
        let points: Vec<CategoryPoint> = fetch_json(&api::category_performance_path(team, category)).await?;
        series.push((team, points));
    }
    Ok(ChartSpec::category(series, config))
}

/// List of team numbers as JSON
#[wasm_bindgen]
pub async fn load_teams() -> Result<String, JsValue> {
    let body = fetch_text(api::TEAMS_ENDPOINT).await.map_err(to_js_error)?;
    let teams = api::parse_teams(&body).map_err(to_js_error)?;
    serde_json::to_string(&teams).map_err(to_js_error)
}

/// Total-score chart description for the selected teams
///
/// `config_json` is the controller's [`get_config_json`](WorkspaceController::get_config_json).
#[wasm_bindgen]
pub async fn load_performance_spec(teams_json: String, config_json: String) -> Result<String, JsValue> {
    let teams = parse_team_list(&teams_json)?;
    let config = parse_config(&config_json)?;
    let mut series = Vec::with_capacity(teams.len());
    for team in teams {
        let points: Vec<TeamPerformancePoint> =
            fetch_json(&api::team_performance_path(team)).await.map_err(to_js_error)?;
        series.push((team, points));
    }
    serde_json::to_string(&ChartSpec::performance(series, &config)).map_err(to_js_error)
}

/// Interpret an upload response into `{ success, message }`
#[wasm_bindgen]
pub fn upload_outcome_json(status: u16, body: &str) -> String {
    let outcome = UploadOutcome::from_response(status, body);
    serde_json::json!({ "success": outcome.is_success(), "message": outcome.message() }).to_string()
}

/// POST scouting files (a form with `file` entries); resolves to `{ success, message }`
#[wasm_bindgen]
pub async fn upload_scouting(form: web_sys::FormData) -> Result<String, JsValue> {
    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form.into());
    let (status, body) = fetch_body(api::UPLOAD_ENDPOINT, Some(&init)).await.map_err(to_js_error)?;
    Ok(upload_outcome_json(status, &body))
}

/// Every raw scouting record as a JSON array
#[wasm_bindgen]
pub async fn load_raw_data() -> Result<String, JsValue> {
    let records: Vec<api::RawRecord> = fetch_json(api::RAW_DATA_ENDPOINT).await.map_err(to_js_error)?;
    serde_json::to_string(&records).map_err(to_js_error)
}

/// Filter and group raw records into `{ group: [record, ...] }`
///
/// `column` and `group_by` may be empty. Without grouping, everything lands in
/// a single group with an empty name.
#[wasm_bindgen]
pub fn raw_data_view_json(records_json: &str, query: &str, column: &str, group_by: &str) -> Result<String, JsValue> {
    let records: Vec<api::RawRecord> = serde_json::from_str(records_json).map_err(to_js_error)?;
    let column = (!column.is_empty()).then_some(column);
    let filtered = api::filter_records(&records, query, column);

    let view = if group_by.is_empty() {
        serde_json::json!({ "": filtered })
    } else {
        serde_json::to_value(api::group_records(&filtered, group_by)).map_err(to_js_error)?
    };
    Ok(view.to_string())
}

/// Display label of a raw-data column
#[wasm_bindgen]
pub fn raw_column_label(column: &str) -> String {
    api::column_label(column).to_string()
}

// =========================================================================
// Controller
// =========================================================================

/// Workspace controller for WASM - wraps ScoutWorkspace with a JS-friendly API
#[wasm_bindgen]
pub struct WorkspaceController {
    workspace: ScoutWorkspace,
}

#[wasm_bindgen]
impl WorkspaceController {
    /// Create a controller; `config_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WorkspaceController, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            workspace: ScoutWorkspace::new(config, Box::new(LocalStorageStore)),
        })
    }

    /// Effective configuration as JSON, for the chart loaders
    #[wasm_bindgen]
    pub fn get_config_json(&self) -> String {
        serde_json::to_string(self.workspace.config()).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    #[wasm_bindgen]
    pub fn init(&mut self, width: f32, height: f32) {
        self.workspace.init(width, height);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.workspace.resize_viewport(width, height);
    }

    /// Run due settle steps; call once per animation frame
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.workspace.tick(date_now())
    }

    // =========================================================================
    // Canvas
    // =========================================================================

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8) -> bool {
        self.workspace.handle_pointer_down(x, y, button).is_handled()
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.workspace.handle_pointer_move(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self, button: u8) -> bool {
        self.workspace.handle_pointer_up(button).is_handled()
    }

    #[wasm_bindgen]
    pub fn pointer_leave(&mut self) -> bool {
        self.workspace.handle_pointer_leave().is_handled()
    }

    /// Wheel over the workspace; returns true when the page should not scroll
    #[wasm_bindgen]
    pub fn wheel(&mut self, x: f32, y: f32, dy: f32) -> bool {
        self.workspace.handle_wheel(x, y, dy).is_handled()
    }

    #[wasm_bindgen]
    pub fn reset_view(&mut self) {
        self.workspace.reset_view(date_now());
    }

    #[wasm_bindgen]
    pub fn auto_layout(&mut self) -> bool {
        self.workspace.auto_layout(date_now())
    }

    /// Canvas transform as JSON
    #[wasm_bindgen]
    pub fn get_canvas_json(&self) -> String {
        serde_json::to_string(&self.workspace.canvas_view()).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Open (or bring back) the graph for `category`; returns the window id
    #[wasm_bindgen]
    pub fn open_graph(&mut self, category: &str) -> Result<u64, JsValue> {
        self.workspace
            .open_graph(category, date_now())
            .map(|open| open.id().0)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn close_window(&mut self, id: u64) -> bool {
        self.workspace.close_window(WindowId(id))
    }

    #[wasm_bindgen]
    pub fn minimize_window(&mut self, id: u64) -> bool {
        self.workspace.minimize_window(WindowId(id))
    }

    #[wasm_bindgen]
    pub fn focus_window(&mut self, id: u64) -> bool {
        self.workspace.focus_window(WindowId(id))
    }

    #[wasm_bindgen]
    pub fn focus_graph(&mut self, category: &str) -> bool {
        self.workspace.focus_graph(category, date_now())
    }

    #[wasm_bindgen]
    pub fn activate_taskbar_entry(&mut self, id: u64) -> bool {
        self.workspace.activate_taskbar_entry(WindowId(id), date_now())
    }

    #[wasm_bindgen]
    pub fn toggle_lock(&mut self) -> bool {
        self.workspace.toggle_lock()
    }

    /// All windows in open order as JSON
    #[wasm_bindgen]
    pub fn get_windows_json(&self) -> String {
        let windows: Vec<_> = self.workspace.registry().windows().collect();
        serde_json::to_string(&windows).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn get_taskbar_json(&self) -> String {
        serde_json::to_string(self.workspace.taskbar()).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Drag library callbacks
    // =========================================================================

    /// `edges` is empty for a header drag, otherwise the resized edges
    #[wasm_bindgen]
    pub fn drag_start(&mut self, id: u64, edges: &str) -> bool {
        let gesture = if edges.is_empty() {
            Gesture::Move
        } else {
            match ResizeHandle::from_edges(edges) {
                Some(handle) => Gesture::Resize(handle),
                None => return false,
            }
        };
        self.workspace.on_start(WindowId(id), gesture).is_handled()
    }

    #[wasm_bindgen]
    pub fn drag_move(&mut self, id: u64, dx: f32, dy: f32) -> bool {
        self.workspace.on_move(WindowId(id), Vec2::new(dx, dy)).is_handled()
    }

    #[wasm_bindgen]
    pub fn drag_end(&mut self, id: u64) -> bool {
        self.workspace.on_end(WindowId(id), date_now()).is_handled()
    }

    // =========================================================================
    // Teams
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_team(&mut self, index: usize, team: Option<u32>) -> bool {
        self.workspace.set_team(index, team, date_now())
    }

    #[wasm_bindgen]
    pub fn add_team_selector(&mut self) -> bool {
        self.workspace.add_team_selector()
    }

    #[wasm_bindgen]
    pub fn remove_team_selector(&mut self, index: usize) -> bool {
        self.workspace.remove_team_selector(index, date_now())
    }

    #[wasm_bindgen]
    pub fn get_selected_teams_json(&self) -> String {
        serde_json::to_string(&self.workspace.selection().selected()).unwrap_or_else(|_| "[]".to_string())
    }

    // =========================================================================
    // Charts
    // =========================================================================

    /// Re-render every graph
    #[wasm_bindgen]
    pub fn refresh_all_graphs(&mut self) {
        self.workspace.refresh_all_graphs(date_now());
    }

    /// Pending render requests as JSON
    #[wasm_bindgen]
    pub fn take_render_requests_json(&mut self) -> String {
        serde_json::to_string(&self.workspace.take_render_requests()).unwrap_or_else(|_| "[]".to_string())
    }

    /// A render result for these ticket fields would still be accepted
    #[wasm_bindgen]
    pub fn is_ticket_current(&self, window: u64, category: &str, generation: u64) -> bool {
        self.workspace.is_ticket_current(&ticket(window, category, generation))
    }

    /// Hand over a Chart.js instance built from `spec_json`
    #[wasm_bindgen]
    pub fn attach_chart(
        &mut self,
        window: u64,
        category: &str,
        generation: u64,
        chart: JsValue,
        spec_json: &str,
    ) -> Result<(), JsValue> {
        let handle = JsChart::from_spec_json(chart, spec_json)?;
        self.workspace
            .attach_chart(&ticket(window, category, generation), Box::new(handle))
            .map_err(to_js_error)
    }

    /// Hand over the team performance Chart.js instance
    #[wasm_bindgen]
    pub fn attach_performance_chart(&mut self, chart: JsValue, spec_json: &str) -> Result<(), JsValue> {
        let handle = JsChart::from_spec_json(chart, spec_json)?;
        self.workspace.attach_performance_chart(Box::new(handle));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn detach_performance_chart(&mut self) {
        self.workspace.detach_performance_chart();
    }

    #[wasm_bindgen]
    pub fn fail_render(&mut self, window: u64, category: &str, generation: u64, message: &str) -> bool {
        self.workspace.fail_render(&ticket(window, category, generation), message)
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    #[wasm_bindgen]
    pub fn get_badges_json(&self) -> String {
        serde_json::to_string(&self.workspace.badge_views()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Performance chart badges as JSON, positioned within its chart area
    #[wasm_bindgen]
    pub fn get_performance_badges_json(&self) -> String {
        serde_json::to_string(self.workspace.performance_badges()).unwrap_or_else(|_| "[]".to_string())
    }

    /// `window` is `undefined` for the performance chart
    #[wasm_bindgen]
    pub fn click_badge(
        &mut self,
        window: Option<u64>,
        index: usize,
        x: f32,
        y: f32,
        browser_w: f32,
        browser_h: f32,
    ) -> bool {
        self.workspace
            .click_badge(chart_source(window), index, Vec2::new(x, y), Size::new(browser_w, browser_h))
            .is_some()
    }

    /// `window` is `undefined` for the performance chart
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn click_point(
        &mut self,
        window: Option<u64>,
        dataset: usize,
        index: usize,
        x: f32,
        y: f32,
        browser_w: f32,
        browser_h: f32,
    ) -> bool {
        self.workspace
            .click_point(chart_source(window), dataset, index, Vec2::new(x, y), Size::new(browser_w, browser_h))
            .is_some()
    }

    /// Open popup as JSON (`null` when closed)
    #[wasm_bindgen]
    pub fn get_popup_json(&self) -> String {
        let popup = self.workspace.popup().map(|p| {
            serde_json::json!({
                "source": self.workspace.popup_source(),
                "title": p.title(),
                "left": p.left,
                "top": p.top,
                "points": p.points(),
            })
        });
        serde_json::to_string(&popup).unwrap_or_else(|_| "null".to_string())
    }

    #[wasm_bindgen]
    pub fn close_popup(&mut self) {
        self.workspace.close_popup();
    }
}

/// Build the chart description for a category
///
/// `config_json` is the controller's [`get_config_json`](WorkspaceController::get_config_json).
#[wasm_bindgen]
pub async fn load_chart_spec(category: String, teams_json: String, config_json: String) -> Result<String, JsValue> {
    let teams = parse_team_list(&teams_json)?;
    let config = parse_config(&config_json)?;
    let spec = load_category_spec(&category, &teams, &config).await.map_err(to_js_error)?;
    serde_json::to_string(&spec).map_err(to_js_error)
}

fn chart_source(window: Option<u64>) -> ChartSource {
    match window {
        Some(id) => ChartSource::Graph(WindowId(id)),
        None => ChartSource::Performance,
    }
}

fn ticket(window: u64, category: &str, generation: u64) -> RenderTicket {
    RenderTicket {
        window: WindowId(window),
        category: category.to_string(),
        generation,
    }
}

/// The parts of a serialized [`ChartSpec`] a chart handle needs back
#[derive(serde::Deserialize)]
struct SpecDatasets {
    kind: ChartKind,
    datasets: Vec<ChartDataset>,
}
