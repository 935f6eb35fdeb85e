//! Taskbar entries mirroring the open graph windows

use serde::Serialize;

use crate::window::{WindowId, WindowRegistry};

/// One taskbar button
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub category: String,
    pub title: String,
    /// Window is shown (minimized windows keep an inactive entry)
    pub visible: bool,
    pub focused: bool,
}

impl TaskbarEntry {
    /// Entry is highlighted
    #[inline]
    pub fn is_active(&self) -> bool {
        self.visible
    }
}

/// Taskbar state, one entry per open window in open order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the entries from the registry. Returns whether anything changed.
    pub fn sync(&mut self, registry: &WindowRegistry) -> bool {
        let entries: Vec<TaskbarEntry> = registry
            .windows()
            .map(|w| TaskbarEntry {
                window_id: w.id,
                category: w.category.clone(),
                title: w.title.clone(),
                visible: w.visible,
                focused: w.focused,
            })
            .collect();
        if entries == self.entries {
            return false;
        }
        self.entries = entries;
        true
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn entry(&self, window_id: WindowId) -> Option<&TaskbarEntry> {
        self.entries.iter().find(|e| e.window_id == window_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkspaceConfig;

    #[test]
    fn test_sync_mirrors_registry() {
        let config = WorkspaceConfig::default();
        let mut registry = WindowRegistry::new();
        let mut taskbar = Taskbar::new();

        let a = registry.open("net", "Net", &config).unwrap();
        let b = registry.open("climb", "Climb", &config).unwrap();
        registry.focus(b, 100, 200);
        assert!(taskbar.sync(&registry));
        assert!(!taskbar.sync(&registry));

        assert_eq!(taskbar.len(), 2);
        assert_eq!(taskbar.entries()[0].window_id, a);
        assert!(taskbar.entry(b).unwrap().focused);

        registry.minimize(a);
        taskbar.sync(&registry);
        let entry = taskbar.entry(a).unwrap();
        assert!(!entry.is_active());

        registry.close(a);
        taskbar.sync(&registry);
        assert!(taskbar.entry(a).is_none());
        assert_eq!(taskbar.len(), 1);
    }
}
