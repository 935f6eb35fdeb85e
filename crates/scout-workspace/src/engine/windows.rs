//! Graph window lifecycle, focus and team selection

use crate::error::WorkspaceError;
use crate::overlay::ChartSource;
use crate::window::WindowId;
use super::ScoutWorkspace;

/// Outcome of opening a category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphOpen {
    /// A new window was created
    Created(WindowId),
    /// The category was already open; that window was shown and focused
    Existing(WindowId),
}

impl GraphOpen {
    pub fn id(&self) -> WindowId {
        match self {
            GraphOpen::Created(id) | GraphOpen::Existing(id) => *id,
        }
    }
}

impl ScoutWorkspace {
    /// Open a graph window for `category`
    ///
    /// Requires at least one selected team. A category that is already open
    /// brings its window back instead of creating a second one.
    pub fn open_graph(&mut self, category: &str, now_ms: f64) -> Result<GraphOpen, WorkspaceError> {
        if self.selection.selected().is_empty() {
            return Err(WorkspaceError::NoTeamsSelected);
        }

        let title = self.config.category_display_name(category);
        match self.registry.open(category, &title, &self.config) {
            Ok(id) => {
                self.focus_window(id);
                self.persist_geometry();
                self.request_render(id);
                Ok(GraphOpen::Created(id))
            }
            Err(WorkspaceError::CategoryAlreadyOpen { id, .. }) => {
                if self.registry.get(id).is_some_and(|w| !w.visible) {
                    self.registry.show(id);
                    self.refresh_overlays(id);
                }
                self.frame_window(id, now_ms);
                self.focus_window(id);
                Ok(GraphOpen::Existing(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Close a window, forgetting its geometry; unknown ids are ignored
    pub fn close_window(&mut self, id: WindowId) -> bool {
        if self.registry.close(id).is_none() {
            return false;
        }
        if let Some(mut chart) = self.charts.remove(&id) {
            chart.destroy();
        }
        self.overlays.remove(&id);
        self.input.cancel_for(id);
        self.settle.cancel_for(id);
        self.render_requests.retain(|r| r.ticket.window != id);
        self.close_popup_from(ChartSource::Graph(id));

        self.registry.refocus(self.config.z_baseline, self.config.z_focused);
        self.taskbar.sync(&self.registry);
        self.persist_geometry();
        true
    }

    /// Close the window showing `category`
    pub fn close_graph(&mut self, category: &str) -> bool {
        match self.registry.id_for_category(category) {
            Some(id) => self.close_window(id),
            None => false,
        }
    }

    /// Hide a window, keeping its geometry and taskbar entry
    pub fn minimize_window(&mut self, id: WindowId) -> bool {
        if !self.registry.minimize(id) {
            return false;
        }
        self.input.cancel_for(id);
        self.clear_overlays(id);
        self.registry.refocus(self.config.z_baseline, self.config.z_focused);
        self.taskbar.sync(&self.registry);
        self.persist_geometry();
        true
    }

    /// Taskbar click: show the window if hidden, frame it and focus it
    pub fn activate_taskbar_entry(&mut self, id: WindowId, now_ms: f64) -> bool {
        let Some(window) = self.registry.get(id) else {
            return false;
        };
        if !window.visible {
            self.registry.show(id);
            self.refresh_overlays(id);
        }
        self.frame_window(id, now_ms);
        self.focus_window(id)
    }

    /// Raise a window above the others
    pub fn focus_window(&mut self, id: WindowId) -> bool {
        let focused = self.registry.focus(id, self.config.z_baseline, self.config.z_focused);
        self.taskbar.sync(&self.registry);
        focused
    }

    /// Lock or unlock window dragging, resizing and (by default) panning
    pub fn set_locked(&mut self, locked: bool) {
        if self.registry.is_locked() == locked {
            return;
        }
        self.registry.set_locked(locked);
        if locked {
            self.drop_window_gesture();
            if !self.config.pan_while_locked {
                self.end_pan();
            }
        }
        log::debug!("workspace {}", if locked { "locked" } else { "unlocked" });
    }

    /// Flip the lock. Returns the new state.
    pub fn toggle_lock(&mut self) -> bool {
        let locked = !self.registry.is_locked();
        self.set_locked(locked);
        locked
    }

    // ========================================================================
    // Team selection
    // ========================================================================

    /// Set or clear one team selector
    ///
    /// A change is persisted and every graph is re-rendered.
    pub fn set_team(&mut self, index: usize, team: Option<u32>, now_ms: f64) -> bool {
        if !self.selection.set(index, team) {
            return false;
        }
        self.selection_changed(now_ms);
        true
    }

    /// Append a blank team selector. Returns false at the maximum.
    pub fn add_team_selector(&mut self) -> bool {
        self.selection.add_selector()
    }

    /// Remove one team selector
    pub fn remove_team_selector(&mut self, index: usize, now_ms: f64) -> bool {
        if !self.selection.remove_selector(index) {
            return false;
        }
        self.selection_changed(now_ms);
        true
    }

    fn selection_changed(&mut self, now_ms: f64) {
        log::debug!("selected teams: {:?}", self.selection.selected());
        self.persist_teams();
        self.refresh_all_graphs(now_ms);
    }
}
