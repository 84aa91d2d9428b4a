use tracing::warn;

use crate::vec2::Point;

/// A zoom derived from a pinch sample, handed to [`crate::viewport::Viewport::zoom_at_screen`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchZoom {
    /// Midpoint of the two contacts, in screen space
    pub focus: Point,

    /// Ratio of the current span to the previous one
    pub factor: f64,
}

/// Per-gesture pinch state. Lives between a pinch begin and its end and belongs to the input
/// side, the viewport never holds on to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchGesture {
    previous_span: f64,
}

impl PinchGesture {
    /// Start (or restart) a pinch, which resets the span.
    pub fn begin(p1: Point, p2: Point) -> Self {
        Self {
            previous_span: (p2 - p1).length(),
        }
    }

    pub fn previous_span(&self) -> f64 {
        self.previous_span
    }

    /// Feed the next sample, returning the zoom it implies. Samples where either span is zero
    /// yield nothing.
    pub fn update(&mut self, p1: Point, p2: Point) -> Option<PinchZoom> {
        let span = (p2 - p1).length();
        let previous = std::mem::replace(&mut self.previous_span, span);

        if previous == 0.0 || span == 0.0 {
            warn!(previous, span, "ignoring pinch sample with zero span");
            return None;
        }

        Some(PinchZoom {
            focus: p1.midpoint(p2),
            factor: span / previous,
        })
    }
}
