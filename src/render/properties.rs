use crossterm::terminal;
use std::io;

/// The dimensions of the area slides are rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub width: u16,
    pub height: u16,
}

impl ViewportGeometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Get the dimensions of the current terminal.
    pub fn current() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::new(columns, rows))
    }

    /// The number of rows available for slide content, which excludes the status line.
    pub fn content_rows(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}
