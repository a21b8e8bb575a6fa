/// Keyboard input tracker.
///
/// Everything in this game is a one-shot action (press a button, move the
/// menu cursor), so only fresh presses are tracked. Auto-repeat and release
/// events are dropped, so holding a key plays one round, not twenty.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Keys pressed during the most recent `drain_events()` call, in order.
    presses: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { presses: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.presses.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press {
                    self.presses.push(key);
                }
            }
        }
    }

    /// Was any of these keys pressed this frame?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        self.presses.iter().any(|k| codes.contains(&k.code))
    }

    /// Digit keys pressed this frame, in order.
    pub fn digits(&self) -> impl Iterator<Item = char> + '_ {
        self.presses.iter().filter_map(|k| match k.code {
            KeyCode::Char(c) if c.is_ascii_digit() && !k.modifiers.contains(KeyModifiers::CONTROL) => Some(c),
            _ => None,
        })
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.presses.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
