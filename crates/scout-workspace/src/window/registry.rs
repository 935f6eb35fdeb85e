//! Window registry for lifecycle, focus, and persisted geometry

use std::collections::HashMap;

use crate::config::WorkspaceConfig;
use crate::error::WorkspaceError;
use crate::math::{Rect, Size, Vec2};
use crate::persistence::{GeometryMap, GeometryRecord};
use super::{GraphWindow, RenderState, WindowId};

/// Registry of graph windows, at most one per category
pub struct WindowRegistry {
    /// All windows by ID
    windows: HashMap<WindowId, GraphWindow>,
    /// Category to window
    by_category: HashMap<String, WindowId>,
    /// Windows in the order they were opened
    order: Vec<WindowId>,
    /// Focus stack (most recently focused at end)
    focus_stack: Vec<WindowId>,
    /// Next window ID
    next_id: u64,
    /// Persisted geometry, including windows that are no longer open
    geometry: GeometryMap,
    /// Lock flag applied to every window
    locked: bool,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_geometry(GeometryMap::new())
    }

    /// Create a registry over previously persisted geometry
    ///
    /// The id counter starts past every stored id so a new window never
    /// picks up geometry left behind by an earlier session.
    pub fn with_geometry(geometry: GeometryMap) -> Self {
        let next_id = geometry.max_id().map_or(1, |id| id.0 + 1);
        Self {
            windows: HashMap::new(),
            by_category: HashMap::new(),
            order: Vec::new(),
            focus_stack: Vec::new(),
            next_id,
            geometry,
            locked: false,
        }
    }

    /// Open a window for `category`
    ///
    /// Fails with [`WorkspaceError::CategoryAlreadyOpen`] naming the existing
    /// window when the category is already shown.
    pub fn open(&mut self, category: &str, title: &str, config: &WorkspaceConfig) -> Result<WindowId, WorkspaceError> {
        if let Some(&id) = self.by_category.get(category) {
            return Err(WorkspaceError::CategoryAlreadyOpen {
                category: category.to_string(),
                id,
            });
        }

        let id = WindowId(self.next_id);
        self.next_id += 1;

        let cascade = config.cascade_step * self.windows.len() as f32;
        let window = GraphWindow {
            id,
            category: category.to_string(),
            title: title.to_string(),
            position: config.cascade_base + Vec2::new(cascade, cascade),
            size: config.default_window_size,
            z_index: config.z_baseline,
            visible: true,
            locked: self.locked,
            focused: false,
            generation: 0,
            render_state: RenderState::Pending,
        };

        self.geometry.insert(id, GeometryRecord::from_rect(window.rect()));
        self.windows.insert(id, window);
        self.by_category.insert(category.to_string(), id);
        self.order.push(id);

        log::debug!("opened {} for category '{}'", id, category);
        Ok(id)
    }

    /// Close a window and forget its geometry; unknown ids are ignored
    pub fn close(&mut self, id: WindowId) -> Option<GraphWindow> {
        let window = self.windows.remove(&id)?;
        self.by_category.remove(&window.category);
        self.order.retain(|&wid| wid != id);
        self.focus_stack.retain(|&wid| wid != id);
        self.geometry.remove(id);
        log::debug!("closed {} ('{}')", id, window.category);
        Some(window)
    }

    /// Close the window showing `category`, if any
    pub fn close_category(&mut self, category: &str) -> Option<GraphWindow> {
        let id = self.id_for_category(category)?;
        self.close(id)
    }

    /// Apply stored geometry to a window; returns false when none is stored
    pub fn restore_geometry(&mut self, id: WindowId) -> bool {
        let Some(record) = self.geometry.get(id) else {
            return false;
        };
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.position = record.position();
                window.size = record.size();
                true
            }
            None => false,
        }
    }

    /// Store a window's current geometry. Returns whether it changed.
    pub fn record_geometry(&mut self, id: WindowId) -> bool {
        match self.windows.get(&id) {
            Some(window) => self.geometry.insert(id, GeometryRecord::from_rect(window.rect())),
            None => false,
        }
    }

    /// Move a window
    pub fn move_window(&mut self, id: WindowId, position: Vec2) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.position = position;
                true
            }
            None => false,
        }
    }

    /// Set a window's position and size
    pub fn set_rect(&mut self, id: WindowId, position: Vec2, size: Size) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.position = position;
                window.size = size;
                true
            }
            None => false,
        }
    }

    /// Hide a window, keeping its geometry
    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        window.visible = false;
        window.focused = false;
        self.record_geometry(id);
        true
    }

    /// Show a hidden window at its stored geometry
    pub fn show(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        window.visible = true;
        self.restore_geometry(id);
        true
    }

    /// Raise one window: every window drops to `baseline`, the target goes to `raised`
    pub fn focus(&mut self, id: WindowId, baseline: i32, raised: i32) -> bool {
        if !self.windows.get(&id).is_some_and(|w| w.visible) {
            return false;
        }

        for window in self.windows.values_mut() {
            window.z_index = baseline;
            window.focused = false;
        }
        if let Some(window) = self.windows.get_mut(&id) {
            window.z_index = raised;
            window.focused = true;
        }

        self.focus_stack.retain(|&wid| wid != id);
        self.focus_stack.push(id);
        true
    }

    /// Focus the most recently focused visible window, or clear focus
    pub fn refocus(&mut self, baseline: i32, raised: i32) -> Option<WindowId> {
        let next = self
            .focus_stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(|w| w.visible));

        match next {
            Some(id) => {
                self.focus(id, baseline, raised);
                Some(id)
            }
            None => {
                for window in self.windows.values_mut() {
                    window.z_index = baseline;
                    window.focused = false;
                }
                None
            }
        }
    }

    /// Get the currently focused window ID
    pub fn focused(&self) -> Option<WindowId> {
        self.windows.values().find(|w| w.focused).map(|w| w.id)
    }

    /// Lock or unlock every window
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        for window in self.windows.values_mut() {
            window.locked = locked;
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&GraphWindow> {
        self.windows.get(&id)
    }

    /// Get a mutable window by ID
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut GraphWindow> {
        self.windows.get_mut(&id)
    }

    /// Window showing `category`
    pub fn id_for_category(&self, category: &str) -> Option<WindowId> {
        self.by_category.get(category).copied()
    }

    /// Windows in open order
    pub fn windows(&self) -> impl Iterator<Item = &GraphWindow> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    /// Visible windows in open order
    pub fn visible(&self) -> impl Iterator<Item = &GraphWindow> {
        self.windows().filter(|w| w.visible)
    }

    /// Bounds of every visible window
    pub fn visible_rects(&self) -> Vec<Rect> {
        self.visible().map(GraphWindow::rect).collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Persisted geometry
    pub fn geometry(&self) -> &GeometryMap {
        &self.geometry
    }
}
