//! Render tickets and chart refreshes
//!
//! Chart data loads are asynchronous and cannot be cancelled. Every request
//! carries a ticket; the result is only accepted while the ticket still names
//! the window's current category and render generation.

use serde::Serialize;

use crate::chart::UpdateMode;
use crate::window::{RenderState, WindowId};
use super::{ScoutWorkspace, SettleTask};

/// Identifies one chart render request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderTicket {
    pub window: WindowId,
    pub category: String,
    pub generation: u64,
}

/// A chart the host should (re)build
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub ticket: RenderTicket,
    /// Teams to plot, in selector order
    pub teams: Vec<u32>,
}

impl ScoutWorkspace {
    /// Issue a new render ticket for a window, dropping its current chart
    pub(crate) fn request_render(&mut self, id: WindowId) -> Option<RenderTicket> {
        let generation = self.next_generation;
        let window = self.registry.get_mut(id)?;
        self.next_generation += 1;

        window.generation = generation;
        window.render_state = RenderState::Pending;
        let ticket = RenderTicket {
            window: id,
            category: window.category.clone(),
            generation,
        };

        if let Some(mut chart) = self.charts.remove(&id) {
            chart.destroy();
        }
        self.overlays.remove(&id);

        // a newer request for the same window supersedes any queued one
        self.render_requests.retain(|r| r.ticket.window != id);
        self.render_requests.push(RenderRequest {
            ticket: ticket.clone(),
            teams: self.selection.selected(),
        });
        log::debug!("render requested for {} (generation {})", id, generation);
        Some(ticket)
    }

    /// Render requests issued since the last call
    pub fn take_render_requests(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.render_requests)
    }

    /// The ticket still matches the window's category and generation
    pub fn is_ticket_current(&self, ticket: &RenderTicket) -> bool {
        self.registry
            .get(ticket.window)
            .is_some_and(|w| w.category == ticket.category && w.generation == ticket.generation)
    }

    /// Re-render every graph window, then refresh overlays once the charts settle
    pub fn refresh_all_graphs(&mut self, now_ms: f64) -> Vec<RenderTicket> {
        let ids: Vec<WindowId> = self.registry.windows().map(|w| w.id).collect();
        let tickets: Vec<RenderTicket> = ids.into_iter().filter_map(|id| self.request_render(id)).collect();
        self.settle
            .schedule(SettleTask::RefreshAllOverlays, now_ms + self.config.refresh_settle_ms);
        tickets
    }

    /// Re-measure the charts of the given windows after their containers changed
    pub(crate) fn resize_charts(&mut self, ids: &[WindowId]) {
        for id in ids {
            if let Some(chart) = self.charts.get_mut(id) {
                chart.resize();
                chart.update(UpdateMode::Immediate);
            }
        }
    }
}
