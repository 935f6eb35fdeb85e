//! Point detail popups

use serde::Serialize;

use crate::chart::ChartPoint;
use crate::math::{Size, Vec2};

/// Space kept free for a single-point popup
const POINT_POPUP_RESERVE: Size = Size::new(400.0, 300.0);
/// Space kept free for a stacked popup
const STACKED_POPUP_RESERVE: Size = Size::new(500.0, 400.0);
/// Popup offset from the click
const CLICK_OFFSET: Vec2 = Vec2::new(10.0, -50.0);

/// What a popup lists
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum PopupContent {
    Point(ChartPoint),
    Stacked(Vec<ChartPoint>),
}

/// Details popup placed near a click; at most one is open at a time
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Popup {
    pub content: PopupContent,
    pub left: f32,
    pub top: f32,
}

impl Popup {
    /// Popup for one point
    pub fn point(point: ChartPoint, click: Vec2, browser: Size) -> Self {
        let (left, top) = place(click, browser, POINT_POPUP_RESERVE);
        Self { content: PopupContent::Point(point), left, top }
    }

    /// Popup listing every point of a stack
    pub fn stacked(points: Vec<ChartPoint>, click: Vec2, browser: Size) -> Self {
        let (left, top) = place(click, browser, STACKED_POPUP_RESERVE);
        Self { content: PopupContent::Stacked(points), left, top }
    }

    /// Heading text
    pub fn title(&self) -> String {
        match &self.content {
            PopupContent::Point(p) => format!("Match #{}", format_number(p.x)),
            PopupContent::Stacked(points) => {
                let x = points.first().map(|p| p.x).unwrap_or_default();
                format!("Match #{} - {} Teams", format_number(x), points.len())
            }
        }
    }

    /// Points listed in the popup
    pub fn points(&self) -> &[ChartPoint] {
        match &self.content {
            PopupContent::Point(p) => std::slice::from_ref(p),
            PopupContent::Stacked(points) => points,
        }
    }
}

fn place(click: Vec2, browser: Size, reserve: Size) -> (f32, f32) {
    let target = click + CLICK_OFFSET;
    (
        target.x.min(browser.width - reserve.width),
        target.y.min(browser.height - reserve.height),
    )
}

/// Integers print without a fractional part
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
