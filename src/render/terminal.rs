use crossterm::{
    cursor,
    style::{self, ResetColor},
    terminal::{self, ClearType},
    QueueableCommand,
};
use std::io;

/// A wrapper over the terminal write handle.
///
/// Creating one switches the terminal into raw mode and the alternate screen. Dropping it restores
/// the terminal to its original state.
pub(crate) struct Terminal<W>
where
    W: io::Write,
{
    writer: W,
}

impl<W: io::Write> Terminal<W> {
    pub(crate) fn new(mut writer: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        writer.queue(terminal::EnterAlternateScreen)?;
        writer.queue(cursor::Hide)?;
        Ok(Self { writer })
    }

    /// Replace whatever is on the screen with the given frame.
    ///
    /// Every line in the frame is drawn on its own row starting from the top left corner.
    pub(crate) fn draw_frame(&mut self, frame: &str) -> io::Result<()> {
        self.writer.queue(ResetColor)?;
        self.writer.queue(terminal::Clear(ClearType::All))?;
        for (row, line) in frame.split('\n').enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            self.writer.queue(cursor::MoveTo(0, row))?;
            self.writer.queue(style::Print(line))?;
        }
        self.writer.flush()
    }
}

impl<W> Drop for Terminal<W>
where
    W: io::Write,
{
    fn drop(&mut self) {
        let _ = self.writer.queue(terminal::LeaveAlternateScreen);
        let _ = self.writer.queue(cursor::Show);
        let _ = self.writer.flush();
        let _ = terminal::disable_raw_mode();
    }
}
