use std::convert::Infallible;
use std::time::Duration;

use sparselife::config::Config;
use sparselife::config::ConfigError;
use sparselife::events::EngineEvent;
use sparselife::events::Event;
use sparselife::events::InputFrame;
use sparselife::events::ViewEvent;
use sparselife::patterns::Seed;
use sparselife::session::Frame;
use sparselife::session::RenderSink;
use sparselife::session::SessionError;
use sparselife::session::Session;
use sparselife::vec2::CellPos;
use sparselife::vec2::Point;
use sparselife::viewport::ScaleLimits;

const SCREEN: Point = Point::new(800.0, 600.0);
const CENTER: Point = Point::new(400.0, 300.0);

fn close(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-9
}

fn blinker() -> Vec<CellPos> {
    vec![CellPos::new(-1, 0), CellPos::ZERO, CellPos::new(1, 0)]
}

fn session(cells: Vec<CellPos>) -> Session {
    Session::new(Config::default(), SCREEN, cells).unwrap()
}

fn events(events: impl IntoIterator<Item = Event>) -> InputFrame {
    let mut input = InputFrame::default();
    for e in events {
        input.push(e);
    }

    input
}

#[test]
fn starts_centred_on_the_origin() {
    let s = session(blinker());
    let frame = s.frame();

    assert_eq!(frame.offset, CENTER);
    assert_eq!(frame.scale, 10.0);
    assert_eq!(frame.focus, Point::ZERO);
    assert_eq!(frame.population, 3);
    assert!(frame.running);
}

#[test]
fn direction_keys_pan_against_the_key() -> anyhow::Result<()> {
    let mut s = session(Vec::new());

    let mut input = InputFrame::default();
    input.directions.right = true;
    s.update(Duration::ZERO, &input)?;
    assert_eq!(s.viewport().offset(), Point::new(396.0, 300.0));

    let mut input = InputFrame::default();
    input.directions.up = true;
    input.directions.left = true;
    s.update(Duration::ZERO, &input)?;
    assert_eq!(s.viewport().offset(), Point::new(400.0, 304.0));

    Ok(())
}

#[test]
fn zoom_keys_keep_the_screen_centre() -> anyhow::Result<()> {
    let mut s = session(Vec::new());
    s.update(Duration::ZERO, &events([Event::View(ViewEvent::Pan(Point::new(30.0, -20.0)))]))?;

    let under = s.frame().focus;

    let mut input = InputFrame::default();
    input.zoom.zoom_in = true;
    s.update(Duration::ZERO, &input)?;

    assert!((s.viewport().scale() - 10.5).abs() < 1e-12);
    assert!(close(s.viewport().world_to_screen(under), CENTER));

    let mut input = InputFrame::default();
    input.zoom.zoom_out = true;
    s.update(Duration::ZERO, &input)?;

    assert!((s.viewport().scale() - 10.0).abs() < 1e-12);
    assert!(close(s.viewport().world_to_screen(under), CENTER));

    Ok(())
}

#[test]
fn wheel_zooms_about_the_pointer() -> anyhow::Result<()> {
    let mut s = session(Vec::new());
    let at = Point::new(100.0, 50.0);
    let under = s.viewport().screen_to_world(at);

    s.update(Duration::ZERO, &events([Event::View(ViewEvent::Wheel { delta: -1.0, at })]))?;
    assert!((s.viewport().scale() - 11.0).abs() < 1e-12);
    assert!(close(s.viewport().world_to_screen(under), at));

    s.update(Duration::ZERO, &events([Event::View(ViewEvent::Wheel { delta: 2.5, at })]))?;
    assert!((s.viewport().scale() - 10.0).abs() < 1e-12);
    assert!(close(s.viewport().world_to_screen(under), at));

    s.update(Duration::ZERO, &events([Event::View(ViewEvent::Wheel { delta: 0.0, at })]))?;
    assert!((s.viewport().scale() - 10.0).abs() < 1e-12);

    Ok(())
}

#[test]
fn pinch_zooms_about_the_midpoint() -> anyhow::Result<()> {
    let mut s = session(Vec::new());
    let mid = Point::new(200.0, 100.0);
    let under = s.viewport().screen_to_world(mid);

    s.update(
        Duration::ZERO,
        &events([
            Event::View(ViewEvent::PinchBegin(Point::new(190.0, 100.0), Point::new(210.0, 100.0))),
            Event::View(ViewEvent::PinchMove(Point::new(180.0, 100.0), Point::new(220.0, 100.0))),
        ]),
    )?;

    assert!(s.is_pinching());
    assert!((s.viewport().scale() - 20.0).abs() < 1e-12);
    assert!(close(s.viewport().world_to_screen(under), mid));

    s.update(Duration::ZERO, &events([Event::View(ViewEvent::PinchEnd)]))?;
    assert!(!s.is_pinching());

    Ok(())
}

#[test]
fn pinch_restart_resets_the_span() -> anyhow::Result<()> {
    let mut s = session(Vec::new());

    s.update(
        Duration::ZERO,
        &events([
            Event::View(ViewEvent::PinchBegin(Point::new(0.0, 0.0), Point::new(10.0, 0.0))),
            Event::View(ViewEvent::PinchEnd),
            // samples of a fresh gesture are measured against its own span
            Event::View(ViewEvent::PinchBegin(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
            Event::View(ViewEvent::PinchMove(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        ]),
    )?;

    assert_eq!(s.viewport().scale(), 10.0);

    Ok(())
}

#[test]
fn pinch_move_without_begin_only_starts_the_gesture() -> anyhow::Result<()> {
    let mut s = session(Vec::new());

    s.update(
        Duration::ZERO,
        &events([Event::View(ViewEvent::PinchMove(Point::ZERO, Point::new(50.0, 0.0)))]),
    )?;

    assert!(s.is_pinching());
    assert_eq!(s.viewport().scale(), 10.0);

    Ok(())
}

#[test]
fn steps_on_the_clock_without_catching_up() -> anyhow::Result<()> {
    let mut s = session(blinker());
    let idle = InputFrame::default();

    s.update(Duration::from_millis(60), &idle)?;
    assert_eq!(s.world().generation(), 0);

    s.update(Duration::from_millis(60), &idle)?;
    assert_eq!(s.world().generation(), 1);

    s.update(Duration::from_millis(450), &idle)?;
    assert_eq!(s.world().generation(), 2);

    Ok(())
}

#[test]
fn keeps_the_step_rate_over_uneven_frames() -> anyhow::Result<()> {
    let mut s = session(blinker());
    let idle = InputFrame::default();

    // 60 ms frames at 10 steps per second
    for _ in 0..100 {
        s.update(Duration::from_millis(60), &idle)?;
    }
    assert_eq!(s.world().generation(), 60);

    // 116 ms per cycle of four frames, 5.8 s in total
    for _ in 0..50 {
        for ms in [16, 33, 50, 17] {
            s.update(Duration::from_millis(ms), &idle)?;
        }
    }
    assert_eq!(s.world().generation(), 118);

    Ok(())
}

#[test]
fn paused_session_only_moves_on_request() -> anyhow::Result<()> {
    let mut s = session(blinker());

    s.update(Duration::ZERO, &events([Event::Engine(EngineEvent::TogglePause)]))?;
    assert!(!s.is_running());

    s.update(Duration::from_secs(5), &InputFrame::default())?;
    assert_eq!(s.world().generation(), 0);

    s.update(Duration::ZERO, &events([Event::Engine(EngineEvent::Advance(3))]))?;
    assert_eq!(s.world().generation(), 3);
    assert!(s.world().is_alive(CellPos::new(0, 1)));

    Ok(())
}

#[test]
fn click_toggles_the_cell_under_it() -> anyhow::Result<()> {
    let mut s = session(Vec::new());
    let click = || events([Event::Engine(EngineEvent::Toggle(Point::new(395.0, 305.0)))]);

    s.update(Duration::ZERO, &click())?;
    assert_eq!(s.world().cells(), [CellPos::new(-1, 0)]);

    s.update(Duration::ZERO, &click())?;
    assert!(s.world().cells().is_empty());

    Ok(())
}

#[test]
fn clear_and_reseed() -> anyhow::Result<()> {
    let config = Config {
        seed: Seed::Preset {
            name: "glider".to_string(),
        },
        ..Config::default()
    };
    let mut s = Session::seeded(config, SCREEN)?;
    assert_eq!(s.world().population(), 5);

    s.update(Duration::ZERO, &events([Event::Engine(EngineEvent::Clear)]))?;
    assert_eq!(s.world().population(), 0);

    s.update(Duration::ZERO, &events([Event::Engine(EngineEvent::Reseed)]))?;
    assert_eq!(s.world().population(), 5);
    assert_eq!(s.world().generation(), 0);

    Ok(())
}

#[test]
fn seeded_soup_is_reproducible() -> anyhow::Result<()> {
    let config = Config {
        seed: Seed::Soup { seed: Some(7) },
        ..Config::default()
    };

    let a = Session::seeded(config.clone(), SCREEN)?;
    let b = Session::seeded(config, SCREEN)?;

    assert_eq!(a.world().cells(), b.world().cells());
    assert!(a.world().population() > 0);

    Ok(())
}

#[test]
fn reset_view_frames_the_population() -> anyhow::Result<()> {
    let cells = vec![CellPos::new(10, 10), CellPos::new(11, 10), CellPos::new(12, 10)];
    let mut s = session(cells);

    let mut input = events([
        Event::View(ViewEvent::Pan(Point::new(-123.0, 45.0))),
        Event::View(ViewEvent::Wheel {
            delta: -1.0,
            at: Point::ZERO,
        }),
    ]);
    input.push(Event::ResetView);
    s.update(Duration::ZERO, &input)?;

    assert_eq!(s.viewport().scale(), 10.0);
    assert!(close(s.viewport().world_to_screen(Point::new(11.5, 10.5)), CENTER));

    Ok(())
}

#[test]
fn resize_moves_the_zoom_centre() -> anyhow::Result<()> {
    let mut s = session(Vec::new());
    let small = Point::new(200.0, 100.0);

    s.update(Duration::ZERO, &events([Event::View(ViewEvent::Resize(small))]))?;
    let under = s.viewport().screen_to_world(small.scale(0.5));

    let mut input = InputFrame::default();
    input.zoom.zoom_in = true;
    s.update(Duration::ZERO, &input)?;

    assert!(close(s.viewport().world_to_screen(under), small.scale(0.5)));
    assert!(close(s.frame().focus, under));

    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    let configs = [
        Config {
            key_zoom_factor: -1.0,
            ..Config::default()
        },
        Config {
            steps_per_second: 0.0,
            ..Config::default()
        },
        Config {
            steps_per_second: f64::NAN,
            ..Config::default()
        },
        Config {
            scale_limits: ScaleLimits { min: 2.0, max: 1.0 },
            ..Config::default()
        },
    ];

    for config in configs {
        assert!(matches!(
            Session::new(config, SCREEN, Vec::new()),
            Err(SessionError::Config(ConfigError::OutOfRange { .. }))
        ));
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(u64, usize, f64, Point, bool)>,
}

impl RenderSink for Recorder {
    type Error = Infallible;

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), Infallible> {
        self.frames.push((
            frame.generation,
            frame.population,
            frame.scale,
            frame.focus,
            frame.running,
        ));

        Ok(())
    }
}

#[test]
fn renders_every_tick() -> anyhow::Result<()> {
    let mut s = session(blinker());
    let mut sink = Recorder::default();

    s.render(&mut sink)?;
    s.update(Duration::from_millis(100), &InputFrame::default())?;
    s.update(Duration::ZERO, &events([Event::Engine(EngineEvent::TogglePause)]))?;
    s.render(&mut sink)?;

    assert_eq!(
        sink.frames,
        [
            (0, 3, 10.0, Point::ZERO, true),
            (1, 3, 10.0, Point::ZERO, false),
        ]
    );

    Ok(())
}
