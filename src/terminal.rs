//! Terminal session: raw mode and alternate screen for the lifetime of a
//! value.

use crate::render::{render_full, Grid, OutputBuffer};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout};

/// Puts the terminal into raw mode on the alternate screen and restores it
/// on drop.
pub struct TerminalSession {
    stdout: Stdout,
    output: OutputBuffer,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self {
            stdout,
            output: OutputBuffer::new(),
        })
    }

    /// Current terminal size as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw a full frame in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn present(&mut self, grid: &Grid) -> io::Result<()> {
        self.output.clear();
        render_full(grid, &mut self.output);
        self.output.flush_to(&mut self.stdout)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
