// src/surface/mod.rs
// Declares surface implementations and defines the capability trait.

pub mod console;

pub use console::ConsoleSurface;

#[cfg(test)]
pub mod mock;

use crate::color::NamedColor;
use anyhow::Result;

/// Minimal capability interface over a character grid.
///
/// Dimensions are captured once when the surface is created and stay fixed
/// for its lifetime; a window resize mid-run keeps the old geometry.
/// Coordinates are zero-based, `x` in `[0, width)`, `y` in `[0, height)`;
/// passing anything out of range is a caller contract violation, enforced
/// with debug assertions only.
///
/// Every fallible method returns `Result`; a failure means the surface lost
/// its terminal and is fatal for the running effect.
pub trait TerminalSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Moves the write cursor to `(x, y)`.
    fn set_cursor(&mut self, x: usize, y: usize) -> Result<()>;

    /// Writes one styled character at the cursor and advances it.
    fn write_char(&mut self, c: char, color: NamedColor) -> Result<()>;

    /// Writes a full line of styled text and advances to the next line,
    /// scrolling if the cursor is on the bottom row.
    fn write_line(&mut self, text: &str, color: NamedColor) -> Result<()>;

    /// Clears the grid and homes the cursor.
    fn clear(&mut self) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    /// Restores the default style.
    fn reset_style(&mut self) -> Result<()>;

    /// Pushes buffered writes out, so a frame lands as one burst.
    fn flush(&mut self) -> Result<()>;
}
