//! Auto-layout, reset view and window framing

use crate::layout::pack_grid;
use crate::math::Size;
use crate::window::WindowId;
use super::{ScoutWorkspace, SettleTask};

impl ScoutWorkspace {
    /// Pack the visible windows into a grid centered on the origin
    ///
    /// Geometry is written and persisted immediately; the view is re-fitted
    /// once the charts have settled. Returns false when nothing is visible.
    pub fn auto_layout(&mut self, now_ms: f64) -> bool {
        let (ids, sizes): (Vec<WindowId>, Vec<Size>) = self.registry.visible().map(|w| (w.id, w.size)).unzip();
        if ids.is_empty() {
            return false;
        }

        let positions = pack_grid(&sizes, self.config.layout_gap);
        for (id, position) in ids.iter().zip(positions) {
            self.registry.move_window(*id, position);
            self.registry.record_geometry(*id);
        }
        self.persist_geometry();
        self.resize_charts(&ids);

        self.settle
            .schedule(SettleTask::ResetView, now_ms + self.config.layout_settle_ms);
        log::debug!("auto-layout placed {} window(s)", ids.len());
        true
    }

    /// Fit the view to every visible window, or reset it when none is visible
    pub fn reset_view(&mut self, now_ms: f64) {
        let rects = self.registry.visible_rects();
        self.transform
            .fit_to_windows(&rects, self.viewport, self.config.fit_padding);
        self.transform_animated = true;
        self.settle.schedule(
            SettleTask::RefreshAllOverlays,
            now_ms + self.config.transform_animation_ms,
        );
    }

    /// Frame the window showing `category`
    pub fn focus_graph(&mut self, category: &str, now_ms: f64) -> bool {
        match self.registry.id_for_category(category) {
            Some(id) => self.frame_window(id, now_ms),
            None => false,
        }
    }

    /// Zoom and pan so one window fills most of the viewport
    pub(crate) fn frame_window(&mut self, id: WindowId, now_ms: f64) -> bool {
        let Some(rect) = self.registry.get(id).map(|w| w.rect()) else {
            return false;
        };
        self.transform
            .frame_rect(rect, self.viewport, self.config.focus_fill_ratio);
        self.transform_animated = true;
        self.settle.schedule(
            SettleTask::RefreshAllOverlays,
            now_ms + self.config.transform_animation_ms,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::config::WorkspaceConfig;
    use crate::engine::{ScoutWorkspace, SettleTask};
    use crate::math::Vec2;
    use crate::testing::{MemoryStore, RecordingChart};

    fn workspace() -> ScoutWorkspace {
        let mut ws = ScoutWorkspace::new(WorkspaceConfig::default(), Box::new(MemoryStore::new()));
        ws.init(1200.0, 900.0);
        ws.set_team(0, Some(254), 0.0);
        ws
    }

    #[test]
    fn test_reset_view_with_no_windows() {
        let mut ws = workspace();
        ws.handle_wheel(10.0, 10.0, -100.0);
        ws.reset_view(0.0);
        assert!((ws.transform().scale - 1.0).abs() < 0.001);
        assert_eq!(ws.transform().offset, Vec2::ZERO);
    }

    #[test]
    fn test_reset_view_fits_single_window() {
        let mut ws = workspace();
        let id = ws.open_graph("net", 0.0).unwrap().id();
        ws.registry.move_window(id, Vec2::ZERO);
        ws.reset_view(0.0);

        assert!((ws.transform().scale - 1.0).abs() < 0.001);
        assert!((ws.transform().offset.x - 150.0).abs() < 0.001);
        assert!((ws.transform().offset.y - 300.0).abs() < 0.001);
        assert_eq!(ws.pending_settle_tasks(), vec![SettleTask::RefreshAllOverlays]);
    }

    #[test]
    fn test_auto_layout_four_windows() {
        let mut ws = workspace();
        let ids: Vec<_> = ["net", "processor", "climb", "auto_coral"]
            .iter()
            .map(|c| ws.open_graph(c, 0.0).unwrap().id())
            .collect();

        assert!(ws.auto_layout(1000.0));

        let positions: Vec<Vec2> = ids.iter().map(|id| ws.registry().get(*id).unwrap().position).collect();
        assert!((positions[0].x - (-910.0)).abs() < 0.001);
        assert!((positions[1].x - 10.0).abs() < 0.001);
        assert!((positions[2].y - 10.0).abs() < 0.001);

        for id in &ids {
            let stored = ws.registry().geometry().get(*id).unwrap();
            let window = ws.registry().get(*id).unwrap();
            assert!((stored.x - window.position.x).abs() < 0.001);
            assert!((stored.y - window.position.y).abs() < 0.001);
        }

        assert!(ws.pending_settle_tasks().contains(&SettleTask::ResetView));
        ws.tick(1099.0);
        assert!(ws.pending_settle_tasks().contains(&SettleTask::ResetView));
        assert!((ws.transform().scale - 1.0).abs() < 0.001);

        assert!(ws.tick(1100.0));
        assert!(!ws.pending_settle_tasks().contains(&SettleTask::ResetView));
        // (1200 - 100) / 1820
        assert!((ws.transform().scale - 1100.0 / 1820.0).abs() < 0.001);
    }

    #[test]
    fn test_auto_layout_skips_hidden_windows() {
        let mut ws = workspace();
        let a = ws.open_graph("net", 0.0).unwrap().id();
        let b = ws.open_graph("processor", 0.0).unwrap().id();
        ws.minimize_window(b);
        let hidden_before = ws.registry().get(b).unwrap().position;

        ws.auto_layout(0.0);
        assert!((ws.registry().get(a).unwrap().position.x - (-450.0)).abs() < 0.001);
        assert_eq!(ws.registry().get(b).unwrap().position, hidden_before);
    }

    #[test]
    fn test_auto_layout_without_windows() {
        let mut ws = workspace();
        assert!(!ws.auto_layout(0.0));
        assert!(!ws.pending_settle_tasks().contains(&SettleTask::ResetView));
    }

    #[test]
    fn test_auto_layout_resizes_charts() {
        let mut ws = workspace();
        ws.open_graph("net", 0.0).unwrap();
        let ticket = ws.take_render_requests().remove(0).ticket;
        let chart = RecordingChart::line(vec![]);
        let calls = chart.calls();
        ws.attach_chart(&ticket, Box::new(chart)).unwrap();

        ws.auto_layout(0.0);
        assert_eq!(calls.resizes(), 1);
        assert_eq!(calls.updates(), 1);
    }

    #[test]
    fn test_focus_graph_frames_window() {
        let mut ws = workspace();
        ws.open_graph("net", 0.0).unwrap();
        assert!(ws.focus_graph("net", 0.0));
        // min(840 / 900, 630 / 300)
        assert!((ws.transform().scale - 840.0 / 900.0).abs() < 0.001);
        assert!(!ws.focus_graph("missing", 0.0));
    }
}
