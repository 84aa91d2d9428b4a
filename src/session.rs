use std::time::Duration;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::config::ConfigError;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::events::InputFrame;
use crate::events::ViewEvent;
use crate::gesture::PinchGesture;
use crate::patterns::PatternError;
use crate::vec2::CellPos;
use crate::vec2::Point;
use crate::viewport::Viewport;
use crate::viewport::ViewportError;
use crate::world::World;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

/// What the renderer gets every tick
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    pub cells: &'a [CellPos],
    pub offset: Point,
    pub scale: f64,
    pub generation: u64,
    pub population: usize,

    /// World point under the centre of the screen
    pub focus: Point,

    pub running: bool,

    /// The transform `offset` and `scale` come from
    pub viewport: &'a Viewport,
}

/// The rendering collaborator
pub trait RenderSink {
    type Error;

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

/// Owns the world and the viewport, and applies one [`InputFrame`] per tick.
pub struct Session {
    config: Config,
    world: World,
    viewport: Viewport,

    /// Screen size, in the same units as the viewport offset
    screen: Point,

    /// Present only between a pinch begin and its end
    pinch: Option<PinchGesture>,

    running: bool,

    /// Time between scheduled steps
    interval: Duration,

    /// Time accumulated towards the next scheduled step
    elapsed: Duration,
}

impl Session {
    /// Create a session with the origin at the centre of a screen of `screen` size. `config` is
    /// validated first.
    pub fn new(config: Config, screen: Point, cells: Vec<CellPos>) -> Result<Self, SessionError> {
        config.validate()?;

        let interval = Duration::try_from_secs_f64(config.steps_per_second.recip()).map_err(|_| {
            ConfigError::OutOfRange {
                name: "steps per second",
                reason: format!("{} gives no usable step interval", config.steps_per_second),
            }
        })?;

        let viewport = Viewport::new(
            screen.scale(0.5),
            config.initial_scale,
            config.scale_limits,
        )?;

        Ok(Self {
            world: World::with_cells(config.rule, cells),
            config,
            viewport,
            screen,
            pinch: None,
            running: true,
            interval,
            elapsed: Duration::ZERO,
        })
    }

    /// Create a session seeded the way `config` asks for.
    pub fn seeded(config: Config, screen: Point) -> anyhow::Result<Self> {
        let cells = config.seed.cells()?;

        Ok(Self::new(config, screen, cells)?)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    fn screen_center(&self) -> Point {
        self.screen.scale(0.5)
    }

    /// Apply a tick's worth of input, then step the world if it's due.
    pub fn update(&mut self, dt: Duration, input: &InputFrame) -> Result<(), ViewportError> {
        let delta = input.directions.pan_delta(self.config.pan_speed);
        if delta != Point::ZERO {
            self.viewport.pan(delta);
        }

        let center = self.screen_center();
        if input.zoom.zoom_in {
            self.viewport
                .zoom_at_screen(center, self.config.key_zoom_factor)?;
        }
        if input.zoom.zoom_out {
            let focus = self.viewport.screen_to_world(center);
            self.viewport.zoom_out(focus, self.config.key_zoom_factor)?;
        }

        for event in &input.events {
            self.handle(event)?;
        }

        if self.running {
            self.tick(dt);
        }

        Ok(())
    }

    fn handle(&mut self, event: &Event) -> Result<(), ViewportError> {
        match event {
            Event::View(event) => self.handle_view(*event)?,
            Event::Engine(event) => self.handle_engine(*event),
            Event::ResetView => self.reset_view()?,

            // leaving is up to the host
            Event::Exit => {}
        }

        Ok(())
    }

    fn handle_view(&mut self, event: ViewEvent) -> Result<(), ViewportError> {
        match event {
            ViewEvent::Pan(delta) => self.viewport.pan(delta),
            ViewEvent::PinchBegin(p1, p2) => self.pinch = Some(PinchGesture::begin(p1, p2)),
            ViewEvent::PinchMove(p1, p2) => {
                // a move without a begin starts the gesture
                let Some(pinch) = self.pinch.as_mut() else {
                    self.pinch = Some(PinchGesture::begin(p1, p2));
                    return Ok(());
                };

                if let Some(zoom) = pinch.update(p1, p2) {
                    self.viewport.zoom_at_screen(zoom.focus, zoom.factor)?;
                }
            }
            ViewEvent::PinchEnd => self.pinch = None,
            ViewEvent::Wheel { delta, at } => {
                let factor = self.config.wheel_zoom_factor;
                let focus = self.viewport.screen_to_world(at);

                if delta < 0.0 {
                    self.viewport.zoom_in(focus, factor)?;
                } else if delta > 0.0 {
                    self.viewport.zoom_out(focus, factor)?;
                }
            }
            ViewEvent::Resize(size) => self.screen = size,
        }

        Ok(())
    }

    fn handle_engine(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Advance(n) => self.world.advance(n),
            EngineEvent::TogglePause => {
                self.running = !self.running;
                self.elapsed = Duration::ZERO;
                info!(running = self.running, "toggled pause");
            }
            EngineEvent::Reseed => {
                if let Err(e) = self.reseed() {
                    warn!("reseed failed: {e}");
                }
            }
            EngineEvent::Clear => {
                self.world.clear();
                info!("cleared world");
            }
            EngineEvent::Toggle(at) => {
                let cell = self.viewport.screen_to_cell(at);
                self.world.toggle(cell);
            }
        }
    }

    /// Replace the population with a fresh draw of the configured seed.
    pub fn reseed(&mut self) -> Result<(), PatternError> {
        let cells = self.config.seed.cells()?;
        self.world.reseed(cells);

        info!(population = self.world.population(), "reseeded world");

        Ok(())
    }

    /// Centre the population's bounding box on the screen at the initial scale.
    pub fn reset_view(&mut self) -> Result<(), ViewportError> {
        let focus = match self.world.bounds() {
            Some(b) => b.min.to_point() + b.size().to_point().scale(0.5),
            None => Point::ZERO,
        };

        self.viewport
            .look_at(focus, self.screen_center(), self.config.initial_scale)?;

        info!(?focus, "reset view");

        Ok(())
    }

    /// Run one step once a full step interval has accumulated. Leftover time carries over to
    /// the next interval, but never more than one interval's worth, so a slow frame can't queue
    /// up a burst of steps.
    fn tick(&mut self, dt: Duration) {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.world.next();
            self.elapsed = (self.elapsed - self.interval).min(self.interval);
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            cells: self.world.cells(),
            offset: self.viewport.offset(),
            scale: self.viewport.scale(),
            generation: self.world.generation(),
            population: self.world.population(),
            focus: self.viewport.screen_to_world(self.screen_center()),
            running: self.running,
            viewport: &self.viewport,
        }
    }

    pub fn render<S: RenderSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.present(&self.frame())
    }
}
