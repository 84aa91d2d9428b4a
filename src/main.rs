use std::fs::File;
use std::sync::Mutex;
use std::time;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sparselife::config::Config;
use sparselife::config::USAGE;
use sparselife::events::Event;
use sparselife::events::InputFrame;
use sparselife::events::ViewEvent;
use sparselife::session::Session;

use camera::Camera;
use io::Pointer;

mod camera;
mod io;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

/// Runs the viewer until the user exits
fn run(config: Config) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut cam = Camera::new(cols, rows);
    let mut session = Session::seeded(config, cam.size())?;
    let mut pointer = Pointer::default();

    info!(
        population = session.world().population(),
        rule = %session.world().rule(),
        "starting"
    );

    let mut last = time::Instant::now();

    loop {
        let mut input = InputFrame::default();

        // Poll events for as long as FRAMETIME
        let deadline = last + FRAMETIME;
        loop {
            let timeout = deadline.saturating_duration_since(time::Instant::now());
            if !event::poll(timeout)? {
                break;
            }

            match event::read()? {
                CtEvent::Resize(cols, rows) => {
                    cam.resize(cols, rows);
                    input.push(Event::View(ViewEvent::Resize(cam.size())));
                }
                ev => pointer.convert_event(ev, &mut input),
            }
        }

        if input.events.iter().any(|e| matches!(e, Event::Exit)) {
            break;
        }

        let now = time::Instant::now();
        let dt = now - last;
        last = now;

        session.update(dt, &input)?;

        cam.frame_time = dt;
        session.render(&mut cam).context("Failed to draw frame")?;
    }

    info!(generation = session.world().generation(), "exiting");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    if config.help {
        println!("{USAGE}");
        return Ok(());
    }

    init_logging(&config)?;

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(config);

    // restore the terminal even when the viewer failed
    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}
