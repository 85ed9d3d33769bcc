use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{io, time::Duration};

/// Turns terminal events into commands.
///
/// Some commands take more than one key press: `gg` jumps to the first slide and `<number>G`
/// jumps to a specific slide. Keys that may still become one of those are buffered.
#[derive(Default)]
pub(crate) struct UserInput {
    pending: String,
}

impl UserInput {
    /// Wait up to `timeout` for the next command.
    pub(crate) fn poll_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if poll(timeout)? { Ok(self.handle_event(&read()?)) } else { Ok(None) }
    }

    pub(crate) fn handle_event(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Key(event) if event.kind != KeyEventKind::Release => self.handle_key_event(event),
            Event::Resize(width, height) => Some(Command::Resize { width: *width, height: *height }),
            _ => None,
        }
    }

    fn handle_key_event(&mut self, event: &KeyEvent) -> Option<Command> {
        let command = match event.code {
            KeyCode::Char('c') if event.modifiers == KeyModifiers::CONTROL => Some(Command::Exit),
            KeyCode::Char(key @ ('g' | '0'..='9')) => return self.push_pending(key),
            KeyCode::Char('G') => self.take_jump(),
            KeyCode::Char('h' | 'k') | KeyCode::Left | KeyCode::PageUp | KeyCode::Up => Some(Command::Previous),
            KeyCode::Char('l' | 'j' | ' ') | KeyCode::Right | KeyCode::PageDown | KeyCode::Down => {
                Some(Command::Next)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Exit),
            _ => None,
        };
        self.pending.clear();
        command
    }

    fn push_pending(&mut self, key: char) -> Option<Command> {
        // A `g` after digits, or a digit after a `g`, starts over.
        if self.pending.starts_with('g') != (key == 'g') {
            self.pending.clear();
        }
        self.pending.push(key);
        if self.pending == "gg" {
            self.pending.clear();
            return Some(Command::First);
        }
        None
    }

    fn take_jump(&mut self) -> Option<Command> {
        match self.pending.as_str() {
            "" => Some(Command::Last),
            // Numbers too large for a slide index don't jump anywhere.
            digits if digits.starts_with(|c: char| c.is_ascii_digit()) => digits.parse().ok().map(Command::GoToSlide),
            _ => None,
        }
    }
}

/// A command that changes what's being presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Next,
    Previous,
    First,
    Last,

    /// Go to a slide, using a 1-based index.
    GoToSlide(u32),

    /// The viewport changed size.
    Resize {
        width: u16,
        height: u16,
    },

    Exit,
}
