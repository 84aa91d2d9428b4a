use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use sparselife::events::EngineEvent;
use sparselife::events::Event;
use sparselife::events::InputFrame;
use sparselife::events::ViewEvent;
use sparselife::vec2::Point;

use crate::camera::DOTS_X;
use crate::camera::DOTS_Y;

/// Drag state of the mouse. This belongs to the input side and only lives between a button press
/// and its release.
#[derive(Default)]
pub struct Pointer {
    /// Where the left button went down, or where the last drag sample was
    anchor: Option<Point>,

    /// Whether the pointer moved since the button went down
    dragged: bool,
}

/// Screen position of the middle of a terminal character cell
fn to_screen(column: u16, row: u16) -> Point {
    let (dx, dy) = (f64::from(DOTS_X), f64::from(DOTS_Y));

    Point::new(
        f64::from(column) * dx + dx / 2.0,
        f64::from(row) * dy + dy / 2.0,
    )
}

impl Pointer {
    /// Converts a crossterm event into viewer input, recorded into `frame`
    pub fn convert_event(&mut self, event: CrossTermEvent, frame: &mut InputFrame) {
        match event {
            CrossTermEvent::Key(key_event) => convert_key(key_event, frame),
            CrossTermEvent::Mouse(mouse_event) => self.convert_mouse(mouse_event, frame),
            _ => {}
        }
    }

    fn convert_mouse(&mut self, event: MouseEvent, frame: &mut InputFrame) {
        let at = to_screen(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.anchor = Some(at);
                self.dragged = false;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(anchor) = self.anchor.replace(at) {
                    self.dragged = true;
                    frame.push(Event::View(ViewEvent::Pan(at - anchor)));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.anchor.take().is_some() && !self.dragged {
                    frame.push(Event::Engine(EngineEvent::Toggle(at)));
                }
            }
            MouseEventKind::ScrollUp => {
                frame.push(Event::View(ViewEvent::Wheel { delta: -1.0, at }));
            }
            MouseEventKind::ScrollDown => {
                frame.push(Event::View(ViewEvent::Wheel { delta: 1.0, at }));
            }
            _ => {}
        }
    }
}

fn convert_key(key_event: KeyEvent, frame: &mut InputFrame) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => frame.push(Event::Exit),

        KeyEvent {
            code: KeyCode::Up | KeyCode::Char('k' | 'w'),
            ..
        } => frame.directions.up = true,
        KeyEvent {
            code: KeyCode::Down | KeyCode::Char('j' | 's'),
            ..
        } => frame.directions.down = true,
        KeyEvent {
            code: KeyCode::Left | KeyCode::Char('h' | 'a'),
            ..
        } => frame.directions.left = true,
        KeyEvent {
            code: KeyCode::Right | KeyCode::Char('l' | 'd'),
            ..
        } => frame.directions.right = true,

        KeyEvent {
            code: KeyCode::Char('+' | '=' | 'K'),
            ..
        } => frame.zoom.zoom_in = true,
        KeyEvent {
            code: KeyCode::Char('-' | '_' | 'J'),
            ..
        } => frame.zoom.zoom_out = true,

        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => frame.push(Event::Engine(EngineEvent::TogglePause)),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => frame.push(Event::Engine(EngineEvent::Advance(1))),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => frame.push(Event::Engine(EngineEvent::Reseed)),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => frame.push(Event::Engine(EngineEvent::Clear)),
        KeyEvent {
            code: KeyCode::Char('0'),
            ..
        } => frame.push(Event::ResetView),

        _ => {}
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use sparselife::events::EngineEvent;
    use sparselife::events::Event;
    use sparselife::events::InputFrame;
    use sparselife::events::ViewEvent;
    use sparselife::vec2::Point;

    use super::Pointer;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrossTermEvent {
        CrossTermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn far_corner_maps_to_screen() {
        assert_eq!(
            super::to_screen(u16::MAX, u16::MAX),
            Point::new(f64::from(u16::MAX) * 2.0 + 1.0, f64::from(u16::MAX) * 4.0 + 2.0)
        );
    }

    #[test]
    fn keys_set_directions() {
        let mut pointer = Pointer::default();
        let mut frame = InputFrame::default();

        for c in ['l', 'k'] {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            pointer.convert_event(CrossTermEvent::Key(key), &mut frame);
        }

        assert!(frame.directions.right);
        assert!(frame.directions.up);
        assert!(!frame.directions.left);
        assert!(frame.events.is_empty());
    }

    #[test]
    fn drag_pans_and_click_toggles() {
        let mut pointer = Pointer::default();
        let mut frame = InputFrame::default();

        pointer.convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), &mut frame);
        pointer.convert_event(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 2), &mut frame);
        pointer.convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 3, 2), &mut frame);

        pointer.convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), &mut frame);
        pointer.convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &mut frame);

        assert!(matches!(
            frame.events.as_slice(),
            [
                Event::View(ViewEvent::Pan(d)),
                Event::Engine(EngineEvent::Toggle(at)),
            ] if *d == Point::new(4.0, 4.0) && *at == Point::new(1.0, 2.0)
        ));
    }
}
