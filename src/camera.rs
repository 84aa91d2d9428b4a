use std::io;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use sparselife::session::Frame;
use sparselife::session::RenderSink;
use sparselife::vec2::Point;

/// Hex values of braille dots
///
///      1   8
///      2  10
///      4  20
///     40  80
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Braille dots per character cell of the terminal
pub const DOTS_X: u16 = 2;
pub const DOTS_Y: u16 = 4;

/// A terminal renderer. One screen unit is one braille dot.
pub struct Camera {
    /// The pixel buffer
    pb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    /// Time since the previous frame, for the status line
    pub frame_time: Duration,
}

impl Camera {
    /// Create a camera for a terminal of `cols` by `rows`. The last row is kept for the status
    /// line.
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut cam = Self {
            pb: Vec::new(),
            fb: String::new(),
            cp: Vec::new(),
            w: 0,
            h: 0,
            frame_time: Duration::ZERO,
        };
        cam.resize(cols, rows);

        cam
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (w, h) = (
            usize::from(cols) * usize::from(DOTS_X),
            usize::from(rows.saturating_sub(1)) * usize::from(DOTS_Y),
        );

        self.w = w;
        self.h = h;
        self.pb = vec![false; w * h];
        self.cp = vec![BRAILLE_EMPTY; w.div_ceil(2) * h.div_ceil(4)];

        // Each braille character is 3 bytes, and newlines one byte.
        self.fb = String::with_capacity(3 * self.cp.len() + h.div_ceil(4));
    }

    /// Size of the drawable area in screen units
    pub fn size(&self) -> Point {
        Point::new(self.w as f64, self.h as f64)
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(false);
    }

    /// Turns on the pixels covered by the square at screen position `(x, y)` with side `s`,
    /// clipped to the screen. Squares smaller than a pixel still light one pixel.
    pub fn draw_square(&mut self, x: f64, y: f64, s: f64) {
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        let (x1, y1) = (
            ((x + s).floor() as i64).max(x0 + 1),
            ((y + s).floor() as i64).max(y0 + 1),
        );

        let (x0, x1) = (x0.max(0), x1.min(self.w as i64));
        let (y0, y1) = (y0.max(0), y1.min(self.h as i64));

        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.xy_from(px as usize, py as usize);
                self.pb[i] = true;
            }
        }
    }

    /// Fills the pixel buffer with every visible cell of `frame`.
    pub fn draw(&mut self, frame: &Frame<'_>) {
        let view = frame.viewport;
        let (tl, br) = view.visible_cells(self.size());

        for &c in frame.cells {
            if c.x < tl.x || c.y < tl.y || c.x > br.x || c.y > br.y {
                continue;
            }

            let p = view.cell_to_screen(c);
            self.draw_square(p.x, p.y, frame.scale);
        }
    }

    /// Turn the pixel buffer into lines of braille characters.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.pb.iter().enumerate() {
            let (x, y) = self.xy_to(n);
            let hex = Self::get_hex_value(x, y);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += hex;
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

fn status_line(frame: &Frame<'_>, frame_time: Duration) -> String {
    let fps = if frame_time.is_zero() {
        0.0
    } else {
        1.0 / frame_time.as_secs_f64()
    };

    format!(
        "gen {} | pop {} | scale {:.2} | focus ({:.1}, {:.1}) | fps {:.1}{}",
        frame.generation,
        frame.population,
        frame.scale,
        frame.focus.x,
        frame.focus.y,
        fps,
        if frame.running { "" } else { " | paused" },
    )
}

impl RenderSink for Camera {
    type Error = io::Error;

    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.reset();
        self.draw(frame);

        let status = status_line(frame, self.frame_time);
        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        for line in self.render().lines() {
            queue!(
                stdout,
                style::Print(line),
                terminal::Clear(terminal::ClearType::UntilNewLine),
                cursor::MoveToNextLine(1)
            )?;
        }

        queue!(
            stdout,
            style::Print(status),
            terminal::Clear(terminal::ClearType::UntilNewLine)
        )?;

        stdout.flush()
    }
}

#[cfg(test)]
mod test {
    use super::Camera;

    #[test]
    fn square_is_clipped() {
        let mut cam = Camera::new(2, 2);

        // 4x4 pixels; the square hangs off the top left corner
        cam.draw_square(-1.5, -1.5, 3.0);

        assert_eq!(cam.render(), "\u{2801}\u{2800}");
    }

    #[test]
    fn wide_terminal_does_not_overflow() {
        let cam = Camera::new(u16::MAX, 3);

        assert_eq!(cam.size().x, f64::from(u16::MAX) * 2.0);
        assert_eq!(cam.size().y, 8.0);
    }

    #[test]
    fn tiny_square_lights_one_pixel() {
        let mut cam = Camera::new(1, 2);
        cam.draw_square(1.2, 0.1, 0.05);

        assert_eq!(cam.render(), "\u{2808}");
    }
}
