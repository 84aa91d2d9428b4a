use crate::vec2::Point;

pub enum Event {
    Engine(EngineEvent),
    View(ViewEvent),

    /// Frame the population again at the initial scale
    ResetView,

    /// Exit the application
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
    /// Advance the world state by `n`
    Advance(usize),

    /// Start or stop stepping on the clock
    TogglePause,

    /// Replace the population with the configured seed
    Reseed,

    /// Kill every cell
    Clear,

    /// Flip the cell under a screen point
    Toggle(Point),
}

/// Pointer input, all in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    /// Drag motion since the previous sample
    Pan(Point),

    /// A second contact came down
    PinchBegin(Point, Point),

    /// Both contacts moved
    PinchMove(Point, Point),

    /// Fewer than two contacts remain
    PinchEnd,

    /// Scrolling. Negative `delta` zooms in, positive zooms out.
    Wheel { delta: f64, at: Point },

    /// The screen changed size
    Resize(Point),
}

/// Directional keys held during a tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Offset change for these keys. Content moves against the pressed direction, so "right"
    /// yields a negative `x`.
    pub fn pan_delta(&self, speed: f64) -> Point {
        let axis = |pos: bool, neg: bool| f64::from(u8::from(pos)) - f64::from(u8::from(neg));

        Point::new(axis(self.left, self.right), axis(self.up, self.down)).scale(speed)
    }
}

/// Zoom keys held during a tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoomKeys {
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// Everything the input side collected during one tick
#[derive(Default)]
pub struct InputFrame {
    pub directions: Directions,
    pub zoom: ZoomKeys,
    pub events: Vec<Event>,
}

impl InputFrame {
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.directions == Directions::default()
            && self.zoom == ZoomKeys::default()
            && self.events.is_empty()
    }
}
