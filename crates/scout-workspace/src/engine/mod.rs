//! Workspace engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `input`: Pointer, wheel and drag-library callbacks
//! - `windows`: Graph window lifecycle, focus and team selection
//! - `layout`: Auto-layout, reset view and window framing
//! - `render`: Render tickets and chart refreshes
//! - `overlays`: Chart attachment, stacked-point badges and popups
//! - `settle`: Deferred steps driven by `tick(now_ms)`

mod input;
mod windows;
mod layout;
mod render;
mod overlays;
mod settle;

use std::collections::HashMap;

use serde::Serialize;

use crate::chart::ChartHandle;
use crate::config::WorkspaceConfig;
use crate::input::InputRouter;
use crate::math::Size;
use crate::overlay::{ChartSource, Popup, StackBadge};
use crate::persistence::{KeyValueStore, WorkspaceSnapshot};
use crate::selection::TeamSelection;
use crate::taskbar::Taskbar;
use crate::transform::{CanvasStyle, WorkspaceTransform};
use crate::window::{WindowId, WindowRegistry};

pub use overlays::BadgeView;
pub use render::{RenderRequest, RenderTicket};
pub use settle::SettleTask;
pub use windows::GraphOpen;

use settle::SettleQueue;

/// Canvas transform as the host should apply it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanvasView {
    #[serde(flatten)]
    pub style: CanvasStyle,
    /// CSS transition length for this change (0 = apply immediately)
    pub transition_ms: f64,
}

/// Floating graph workspace
///
/// Owns every piece of workspace state:
/// - Canvas transform (pan/zoom)
/// - Window registry (graph windows, focus, persisted geometry)
/// - Team selection
/// - Taskbar mirror
/// - Input router (pan/drag/resize state machine)
/// - Attached charts and their stacked-point badges
/// - Deferred settle steps
pub struct ScoutWorkspace {
    pub(crate) config: WorkspaceConfig,
    pub(crate) transform: WorkspaceTransform,
    pub(crate) registry: WindowRegistry,
    pub(crate) selection: TeamSelection,
    pub(crate) taskbar: Taskbar,
    pub(crate) input: InputRouter,
    pub(crate) charts: HashMap<WindowId, Box<dyn ChartHandle>>,
    pub(crate) overlays: HashMap<WindowId, Vec<StackBadge>>,
    /// Team performance chart drawn outside the canvas
    pub(crate) performance_chart: Option<Box<dyn ChartHandle>>,
    pub(crate) performance_badges: Vec<StackBadge>,
    pub(crate) popup: Option<(ChartSource, Popup)>,
    pub(crate) settle: SettleQueue,
    pub(crate) render_requests: Vec<RenderRequest>,
    pub(crate) next_generation: u64,
    /// Workspace element size in screen pixels
    pub(crate) viewport: Size,
    /// Whether the last transform change should animate
    pub(crate) transform_animated: bool,
    pub(crate) store: Box<dyn KeyValueStore>,
}

impl ScoutWorkspace {
    /// Create a workspace, restoring selected teams and window geometry from `store`
    pub fn new(mut config: WorkspaceConfig, store: Box<dyn KeyValueStore>) -> Self {
        config.sanitize();
        let snapshot = WorkspaceSnapshot::load(store.as_ref());
        let selection = TeamSelection::from_saved(&snapshot.teams, config.max_teams);
        let registry = WindowRegistry::with_geometry(snapshot.geometry);

        Self {
            transform: WorkspaceTransform::new(config.min_scale, config.max_scale),
            registry,
            selection,
            taskbar: Taskbar::new(),
            input: InputRouter::new(),
            charts: HashMap::new(),
            overlays: HashMap::new(),
            performance_chart: None,
            performance_badges: Vec::new(),
            popup: None,
            settle: SettleQueue::new(),
            render_requests: Vec::new(),
            next_generation: 1,
            viewport: Size::new(1920.0, 1080.0),
            transform_animated: false,
            store,
            config,
        }
    }

    /// Set the workspace element size
    pub fn init(&mut self, width: f32, height: f32) {
        self.resize_viewport(width, height);
    }

    /// Resize the workspace element
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width.max(0.0), height.max(0.0));
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn transform(&self) -> &WorkspaceTransform {
        &self.transform
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &TeamSelection {
        &self.selection
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_locked(&self) -> bool {
        self.registry.is_locked()
    }

    /// Canvas transform projection for the host
    pub fn canvas_view(&self) -> CanvasView {
        CanvasView {
            style: self.transform.canvas_style(self.config.grid_size),
            transition_ms: if self.transform_animated {
                self.config.transform_animation_ms
            } else {
                0.0
            },
        }
    }

    /// Flush window geometry to the store; failures are logged
    pub(crate) fn persist_geometry(&self) {
        match WorkspaceSnapshot::save_geometry(self.store.as_ref(), self.registry.geometry()) {
            Ok(true) => log::debug!("saved geometry for {} window(s)", self.registry.geometry().len()),
            Ok(false) => {}
            Err(e) => log::warn!("failed to save window geometry: {}", e),
        }
    }

    /// Flush the team selection to the store; failures are logged
    pub(crate) fn persist_teams(&self) {
        if let Err(e) = WorkspaceSnapshot::save_teams(self.store.as_ref(), &self.selection.selected()) {
            log::warn!("failed to save selected teams: {}", e);
        }
    }
}
