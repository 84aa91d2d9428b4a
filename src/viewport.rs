use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::vec2::CellPos;
use crate::vec2::Point;

#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    #[error("Scale must be positive and finite, got {scale}")]
    NonPositiveScale { scale: f64 },

    #[error("Zoom factor must be positive and finite, got {factor}")]
    InvalidZoomFactor { factor: f64 },

    #[error("Scale limits need 0 < min <= max, both finite, got {min} and {max}")]
    InvalidLimits { min: f64, max: f64 },
}

/// The range `scale` is clamped to. This stops sustained zooming from driving the scale to zero
/// or to infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 500.0,
        }
    }
}

impl ScaleLimits {
    /// The closest scale inside the limits
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    /// Whether the limits describe a usable, non-empty range
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && 0.0 < self.min && self.min <= self.max
    }

    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}

/// Maps world space to screen space as `world * scale + offset`.
///
/// Zooming keeps the world point under the focus fixed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Screen units per world unit. Always positive.
    scale: f64,

    /// Screen-space translation applied after scaling
    offset: Point,

    limits: ScaleLimits,
}

fn check_factor(factor: f64) -> Result<(), ViewportError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidZoomFactor { factor })
    }
}

impl Viewport {
    pub fn new(offset: Point, scale: f64, limits: ScaleLimits) -> Result<Self, ViewportError> {
        if !limits.is_valid() {
            return Err(ViewportError::InvalidLimits {
                min: limits.min,
                max: limits.max,
            });
        }

        if !(scale.is_finite() && scale > 0.0) {
            return Err(ViewportError::NonPositiveScale { scale });
        }

        Ok(Self {
            scale: limits.clamp(scale),
            offset,
            limits,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        p.scale(self.scale) + self.offset
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        (p - self.offset).scale(1.0 / self.scale)
    }

    /// Screen position of the top left corner of a cell
    pub fn cell_to_screen(&self, c: CellPos) -> Point {
        self.world_to_screen(c.to_point())
    }

    /// The cell under a screen point
    pub fn screen_to_cell(&self, p: Point) -> CellPos {
        self.screen_to_world(p).to_cell()
    }

    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset + delta;
        trace!(?delta, offset = ?self.offset, "pan");
    }

    /// Multiply the scale by `factor`, keeping `focus` (in world space) fixed on screen.
    pub fn zoom_in(&mut self, focus: Point, factor: f64) -> Result<(), ViewportError> {
        check_factor(factor)?;
        self.rescale(focus, self.scale * factor);

        Ok(())
    }

    /// Divide the scale by `factor`, keeping `focus` (in world space) fixed on screen.
    pub fn zoom_out(&mut self, focus: Point, factor: f64) -> Result<(), ViewportError> {
        check_factor(factor)?;
        self.rescale(focus, self.scale / factor);

        Ok(())
    }

    /// Like `zoom_in`, with the focus given in screen space
    pub fn zoom_at_screen(&mut self, focus: Point, factor: f64) -> Result<(), ViewportError> {
        self.zoom_in(self.screen_to_world(focus), factor)
    }

    /// Put `focus` (world space) at `screen` and reset the scale to `scale`.
    pub fn look_at(&mut self, focus: Point, screen: Point, scale: f64) -> Result<(), ViewportError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ViewportError::NonPositiveScale { scale });
        }

        self.scale = self.limits.clamp(scale);
        self.offset = screen - focus.scale(self.scale);

        Ok(())
    }

    fn rescale(&mut self, focus: Point, requested: f64) {
        let scale = self.limits.clamp(requested);
        if scale != requested {
            debug!(requested, scale, "zoom clamped");
        }

        // `world_to_screen(focus)` must not move
        let zoom_offset = focus.scale(self.scale);
        self.offset = self.offset - (focus.scale(scale) - zoom_offset);
        self.scale = scale;

        trace!(?focus, scale, offset = ?self.offset, "zoom");
    }

    /// Corners of the block of cells that covers a screen of `size`, inclusive.
    pub fn visible_cells(&self, size: Point) -> (CellPos, CellPos) {
        let top_left = self.offset.divide(-self.scale).to_cell();
        let count = size.divide(self.scale).to_cell() + CellPos::ONE;

        (top_left, top_left + count)
    }
}
