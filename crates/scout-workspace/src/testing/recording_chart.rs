//! Chart stand-in for testing.
//!
//! Maps data coordinates to pixels with an adjustable linear transform and
//! counts the calls the workspace makes on it.

use std::cell::Cell;
use std::rc::Rc;

use crate::chart::{ChartDataset, ChartHandle, ChartKind, UpdateMode};
use crate::math::Vec2;

/// Default pixels per data unit on both axes
const PX_PER_UNIT: f32 = 10.0;
/// Pixel position of the data origin
const ORIGIN: Vec2 = Vec2::new(40.0, 240.0);

struct Shared {
    px_per_unit: Cell<f32>,
    resizes: Cell<usize>,
    updates: Cell<usize>,
    destroyed: Cell<bool>,
}

/// Handle on a [`RecordingChart`] that stays usable after the chart is handed over.
#[derive(Clone)]
pub struct ChartCalls {
    shared: Rc<Shared>,
}

impl ChartCalls {
    pub fn resizes(&self) -> usize {
        self.shared.resizes.get()
    }

    pub fn updates(&self) -> usize {
        self.shared.updates.get()
    }

    pub fn destroyed(&self) -> bool {
        self.shared.destroyed.get()
    }

    /// Change the pixel mapping, as a chart re-layout would
    pub fn set_px_per_unit(&self, px: f32) {
        self.shared.px_per_unit.set(px);
    }
}

/// Chart for testing.
pub struct RecordingChart {
    kind: ChartKind,
    datasets: Vec<ChartDataset>,
    shared: Rc<Shared>,
}

impl RecordingChart {
    /// Line chart over the given datasets.
    pub fn line(datasets: Vec<ChartDataset>) -> Self {
        Self::new(ChartKind::Line, datasets)
    }

    /// Bar chart over the given datasets.
    pub fn bar(datasets: Vec<ChartDataset>) -> Self {
        Self::new(ChartKind::Bar, datasets)
    }

    fn new(kind: ChartKind, datasets: Vec<ChartDataset>) -> Self {
        Self {
            kind,
            datasets,
            shared: Rc::new(Shared {
                px_per_unit: Cell::new(PX_PER_UNIT),
                resizes: Cell::new(0),
                updates: Cell::new(0),
                destroyed: Cell::new(false),
            }),
        }
    }

    pub fn calls(&self) -> ChartCalls {
        ChartCalls {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl ChartHandle for RecordingChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn datasets(&self) -> &[ChartDataset] {
        &self.datasets
    }

    fn point_position(&self, dataset: usize, index: usize) -> Option<Vec2> {
        let point = self.datasets.get(dataset)?.points.get(index)?;
        let px = self.shared.px_per_unit.get();
        Some(Vec2::new(
            ORIGIN.x + point.x as f32 * px,
            ORIGIN.y - point.y as f32 * px,
        ))
    }

    fn resize(&mut self) {
        self.shared.resizes.set(self.shared.resizes.get() + 1);
    }

    fn update(&mut self, _mode: UpdateMode) {
        self.shared.updates.set(self.shared.updates.get() + 1);
    }

    fn destroy(&mut self) {
        self.shared.destroyed.set(true);
    }
}
