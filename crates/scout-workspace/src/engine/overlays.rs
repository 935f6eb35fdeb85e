//! Chart attachment, stacked-point badges and popups

use serde::Serialize;

use crate::chart::ChartHandle;
use crate::error::WorkspaceError;
use crate::math::{Size, Vec2};
use crate::overlay::{build_badges, stacked_at, ChartSource, Popup, StackBadge};
use crate::window::{RenderState, WindowId};
use super::{RenderTicket, ScoutWorkspace};

/// Badge with its current screen position, for the host to draw
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BadgeView {
    pub window: WindowId,
    pub index: usize,
    pub label: String,
    /// Left/top relative to the chart area
    pub left: f32,
    pub top: f32,
    /// Top-left corner on screen
    pub screen: Vec2,
}

impl ScoutWorkspace {
    /// Hand over a rendered chart
    ///
    /// A chart for a closed window, a different category or an older render
    /// generation is destroyed and rejected with [`WorkspaceError::StaleRender`].
    pub fn attach_chart(&mut self, ticket: &RenderTicket, mut chart: Box<dyn ChartHandle>) -> Result<(), WorkspaceError> {
        if !self.is_ticket_current(ticket) {
            log::debug!("discarding stale chart for {} (generation {})", ticket.window, ticket.generation);
            chart.destroy();
            return Err(WorkspaceError::StaleRender(ticket.window));
        }

        if let Some(window) = self.registry.get_mut(ticket.window) {
            window.render_state = RenderState::Ready;
        }
        if let Some(mut old) = self.charts.insert(ticket.window, chart) {
            old.destroy();
        }
        self.refresh_overlays(ticket.window);
        Ok(())
    }

    /// Record a failed render; only the ticket's window is affected
    pub fn fail_render(&mut self, ticket: &RenderTicket, message: &str) -> bool {
        if !self.is_ticket_current(ticket) {
            return false;
        }
        log::warn!("render failed for {}: {}", ticket.window, message);
        if let Some(window) = self.registry.get_mut(ticket.window) {
            window.render_state = RenderState::Failed(message.to_string());
        }
        true
    }

    /// Attached chart of a window
    pub fn chart(&self, id: WindowId) -> Option<&dyn ChartHandle> {
        self.charts.get(&id).map(|c| c.as_ref())
    }

    fn chart_for(&self, source: ChartSource) -> Option<&dyn ChartHandle> {
        match source {
            ChartSource::Performance => self.performance_chart.as_deref(),
            ChartSource::Graph(id) => self.chart(id),
        }
    }

    /// Hand over the team performance chart, replacing the previous one
    pub fn attach_performance_chart(&mut self, chart: Box<dyn ChartHandle>) {
        if let Some(mut old) = self.performance_chart.replace(chart) {
            old.destroy();
        }
        self.refresh_performance_overlays();
    }

    /// Destroy the team performance chart and drop its badges
    pub fn detach_performance_chart(&mut self) {
        if let Some(mut chart) = self.performance_chart.take() {
            chart.destroy();
        }
        self.performance_badges.clear();
        self.close_popup_from(ChartSource::Performance);
    }

    /// Regenerate the performance chart's badges
    pub fn refresh_performance_overlays(&mut self) {
        self.performance_badges = match self.performance_chart.as_deref() {
            Some(chart) => build_badges(ChartSource::Performance, chart),
            None => Vec::new(),
        };
    }

    /// Regenerate one window's badges from its chart
    pub fn refresh_overlays(&mut self, id: WindowId) {
        let visible = self.registry.get(id).is_some_and(|w| w.visible);
        match self.charts.get(&id) {
            Some(chart) if visible => {
                let badges = build_badges(id, chart.as_ref());
                self.overlays.insert(id, badges);
            }
            _ => {
                self.overlays.remove(&id);
            }
        }
    }

    /// Regenerate the badges of every open chart
    pub fn refresh_all_overlays(&mut self) {
        let ids: Vec<WindowId> = self.registry.windows().map(|w| w.id).collect();
        for id in ids {
            self.refresh_overlays(id);
        }
        self.refresh_performance_overlays();
    }

    /// Drop a window's badges until they are regenerated
    pub(crate) fn clear_overlays(&mut self, id: WindowId) {
        self.overlays.remove(&id);
    }

    /// Current badges of one window
    pub fn badges(&self, id: WindowId) -> &[StackBadge] {
        self.overlays.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current badges of the performance chart, positioned within its chart area
    pub fn performance_badges(&self) -> &[StackBadge] {
        &self.performance_badges
    }

    fn badges_for(&self, source: ChartSource) -> &[StackBadge] {
        match source {
            ChartSource::Performance => self.performance_badges(),
            ChartSource::Graph(id) => self.badges(id),
        }
    }

    /// Every window badge with its screen position, windows in open order
    pub fn badge_views(&self) -> Vec<BadgeView> {
        let header = self.config.graph_header_height;
        self.registry
            .visible()
            .flat_map(|window| {
                self.badges(window.id).iter().enumerate().map(move |(index, badge)| BadgeView {
                    window: window.id,
                    index,
                    label: badge.label(),
                    left: badge.left,
                    top: badge.top,
                    screen: badge.screen_position(window, &self.transform, header),
                })
            })
            .collect()
    }

    /// Open the popup listing a badge's points
    pub fn click_badge(
        &mut self,
        source: impl Into<ChartSource>,
        index: usize,
        click: Vec2,
        browser: Size,
    ) -> Option<&Popup> {
        let source = source.into();
        let points = self.badges_for(source).get(index)?.points.clone();
        self.show_popup(source, Popup::stacked(points, click, browser))
    }

    /// Open the popup for a clicked chart point
    ///
    /// Lists every point stacked at the same coordinates when there is more
    /// than one.
    pub fn click_point(
        &mut self,
        source: impl Into<ChartSource>,
        dataset: usize,
        index: usize,
        click: Vec2,
        browser: Size,
    ) -> Option<&Popup> {
        let source = source.into();
        let datasets = self.chart_for(source)?.datasets();
        let point = datasets.get(dataset)?.points.get(index)?.clone();

        let stacked = stacked_at(datasets, point.x, point.y);
        let popup = if stacked.len() > 1 {
            Popup::stacked(stacked, click, browser)
        } else {
            Popup::point(point, click, browser)
        };
        self.show_popup(source, popup)
    }

    fn show_popup(&mut self, source: ChartSource, popup: Popup) -> Option<&Popup> {
        self.popup = Some((source, popup));
        self.popup()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref().map(|(_, popup)| popup)
    }

    /// Chart the open popup was opened from
    pub fn popup_source(&self) -> Option<ChartSource> {
        self.popup.as_ref().map(|(source, _)| *source)
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// Close the popup only if it lists points of `source`
    pub(crate) fn close_popup_from(&mut self, source: ChartSource) {
        if self.popup_source() == Some(source) {
            self.popup = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartDataset, ChartPoint};
    use crate::config::WorkspaceConfig;
    use crate::overlay::PopupContent;
    use crate::testing::{MemoryStore, RecordingChart};

    fn point(x: f64, y: f64, team: u32) -> ChartPoint {
        ChartPoint { x, y, team, scouter: String::new(), notes: String::new() }
    }

    fn stacked_chart() -> RecordingChart {
        RecordingChart::line(vec![
            ChartDataset { label: "Team 254".into(), color: "#5ca8ff".into(), points: vec![point(3.0, 7.0, 254), point(4.0, 2.0, 254)] },
            ChartDataset { label: "Team 1114".into(), color: "#ff5252".into(), points: vec![point(3.0, 7.0, 1114)] },
        ])
    }

    fn workspace_with_window() -> (ScoutWorkspace, RenderTicket) {
        let mut ws = ScoutWorkspace::new(WorkspaceConfig::default(), Box::new(MemoryStore::new()));
        ws.set_team(0, Some(254), 0.0);
        ws.open_graph("net", 0.0).unwrap();
        let ticket = ws.take_render_requests().remove(0).ticket;
        (ws, ticket)
    }

    #[test]
    fn test_attach_builds_badges() {
        let (mut ws, ticket) = workspace_with_window();
        ws.attach_chart(&ticket, Box::new(stacked_chart())).unwrap();

        let badges = ws.badges(ticket.window);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].label(), "2");
        assert_eq!(ws.registry().get(ticket.window).unwrap().render_state, RenderState::Ready);
        assert_eq!(ws.badge_views().len(), 1);
    }

    #[test]
    fn test_stale_chart_is_destroyed() {
        let (mut ws, ticket) = workspace_with_window();
        ws.refresh_all_graphs(0.0);

        let chart = stacked_chart();
        let calls = chart.calls();
        let result = ws.attach_chart(&ticket, Box::new(chart));
        assert!(matches!(result, Err(WorkspaceError::StaleRender(_))));
        assert!(calls.destroyed());
        assert!(ws.chart(ticket.window).is_none());
    }

    #[test]
    fn test_chart_for_closed_window_is_rejected() {
        let (mut ws, ticket) = workspace_with_window();
        ws.close_window(ticket.window);
        assert!(ws.attach_chart(&ticket, Box::new(stacked_chart())).is_err());
    }

    #[test]
    fn test_fail_render_marks_only_that_window() {
        let (mut ws, ticket) = workspace_with_window();
        ws.open_graph("processor", 0.0).unwrap();
        let other = ws.take_render_requests().remove(0).ticket;

        assert!(ws.fail_render(&ticket, "500 Internal Server Error"));
        assert_eq!(
            ws.registry().get(ticket.window).unwrap().render_state,
            RenderState::Failed("500 Internal Server Error".into())
        );
        assert_eq!(ws.registry().get(other.window).unwrap().render_state, RenderState::Pending);
    }

    #[test]
    fn test_click_badge_opens_stacked_popup() {
        let (mut ws, ticket) = workspace_with_window();
        ws.attach_chart(&ticket, Box::new(stacked_chart())).unwrap();

        let popup = ws
            .click_badge(ticket.window, 0, Vec2::new(100.0, 100.0), Size::new(1920.0, 1080.0))
            .unwrap();
        assert_eq!(popup.title(), "Match #3 - 2 Teams");
        assert!(ws.click_badge(ticket.window, 5, Vec2::ZERO, Size::new(1920.0, 1080.0)).is_none());
    }

    #[test]
    fn test_click_point() {
        let (mut ws, ticket) = workspace_with_window();
        ws.attach_chart(&ticket, Box::new(stacked_chart())).unwrap();
        let browser = Size::new(1920.0, 1080.0);

        let popup = ws.click_point(ticket.window, 0, 1, Vec2::ZERO, browser).unwrap();
        assert!(matches!(popup.content, PopupContent::Point(_)));

        let popup = ws.click_point(ticket.window, 1, 0, Vec2::ZERO, browser).unwrap();
        assert_eq!(popup.points().len(), 2);

        ws.close_popup();
        assert!(ws.popup().is_none());
    }

    #[test]
    fn test_performance_chart_badges_and_popup() {
        let (mut ws, _) = workspace_with_window();
        let chart = stacked_chart();
        let calls = chart.calls();
        ws.attach_performance_chart(Box::new(chart));
        assert_eq!(ws.performance_badges().len(), 1);
        assert_eq!(ws.performance_badges()[0].source, ChartSource::Performance);
        // window badge views only cover graph windows
        assert!(ws.badge_views().is_empty());

        let popup = ws
            .click_badge(ChartSource::Performance, 0, Vec2::new(100.0, 100.0), Size::new(1920.0, 1080.0))
            .unwrap();
        assert_eq!(popup.title(), "Match #3 - 2 Teams");
        assert_eq!(ws.popup_source(), Some(ChartSource::Performance));

        ws.detach_performance_chart();
        assert!(calls.destroyed());
        assert!(ws.performance_badges().is_empty());
        assert!(ws.popup().is_none());
    }

    #[test]
    fn test_replacing_performance_chart_destroys_old() {
        let (mut ws, _) = workspace_with_window();
        let first = stacked_chart();
        let calls = first.calls();
        ws.attach_performance_chart(Box::new(first));
        ws.attach_performance_chart(Box::new(RecordingChart::line(vec![])));
        assert!(calls.destroyed());
        assert!(ws.performance_badges().is_empty());
    }

    #[test]
    fn test_closing_other_window_keeps_popup() {
        let (mut ws, ticket) = workspace_with_window();
        ws.open_graph("processor", 0.0).unwrap();
        let other = ws.take_render_requests().remove(0).ticket;
        ws.attach_chart(&ticket, Box::new(stacked_chart())).unwrap();
        ws.attach_chart(&other, Box::new(stacked_chart())).unwrap();

        ws.click_point(ticket.window, 0, 0, Vec2::ZERO, Size::new(1920.0, 1080.0)).unwrap();
        ws.close_window(other.window);
        assert_eq!(ws.popup_source(), Some(ChartSource::Graph(ticket.window)));

        ws.close_window(ticket.window);
        assert!(ws.popup().is_none());
    }

    #[test]
    fn test_minimized_window_has_no_badges() {
        let (mut ws, ticket) = workspace_with_window();
        ws.attach_chart(&ticket, Box::new(stacked_chart())).unwrap();
        ws.minimize_window(ticket.window);
        ws.refresh_all_overlays();
        assert!(ws.badges(ticket.window).is_empty());
    }
}
