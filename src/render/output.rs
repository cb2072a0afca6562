//! `OutputBuffer`: Single-syscall output buffer for ANSI frames.

use super::cell::{Modifiers, Rgb};
use super::grid::Grid;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A whole frame is accumulated here, then flushed in a single `write()`
/// so the fade never tears mid-frame.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to (x, y) position (0-indexed in, 1-indexed on the wire).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Emit SGR for a modifier set. Resets first, so colors must follow.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.data.extend_from_slice(b"\x1b[0m");
        if modifiers.contains(Modifiers::BOLD) {
            self.data.extend_from_slice(b"\x1b[1m");
        }
        if modifiers.contains(Modifiers::DIM) {
            self.data.extend_from_slice(b"\x1b[2m");
        }
        if modifiers.contains(Modifiers::ITALIC) {
            self.data.extend_from_slice(b"\x1b[3m");
        }
        if modifiers.contains(Modifiers::UNDERLINE) {
            self.data.extend_from_slice(b"\x1b[4m");
        }
    }

    /// Write a character.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut encoded = [0u8; 4];
        self.data
            .extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full frame (no diffing) into `output`.
///
/// Colors and modifiers are only re-emitted when they change between
/// consecutive cells.
pub fn render_full(grid: &Grid, output: &mut OutputBuffer) {
    let mut last_fg: Option<Rgb> = None;
    let mut last_bg: Option<Rgb> = None;
    let mut last_mods: Option<Modifiers> = None;

    for (y, row) in (0u16..).zip(grid.rows()) {
        output.cursor_move(0, y);
        for cell in row {
            if cell.is_continuation() {
                continue;
            }
            if last_mods != Some(cell.modifiers()) {
                output.set_modifiers(cell.modifiers());
                last_mods = Some(cell.modifiers());
                last_fg = None;
                last_bg = None;
            }
            if last_bg != Some(cell.bg()) {
                output.set_bg(cell.bg());
                last_bg = Some(cell.bg());
            }
            if last_fg != Some(cell.fg()) {
                output.set_fg(cell.fg());
                last_fg = Some(cell.fg());
            }
            output.write_char(cell.symbol());
        }
    }

    output.reset_attrs();
}
