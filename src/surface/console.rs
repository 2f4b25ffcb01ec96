// src/surface/console.rs

use crate::color::NamedColor;
use crate::surface::TerminalSurface;

use anyhow::{Context, Result};
use libc::{winsize, STDIN_FILENO, TIOCGWINSZ};
use std::io::{self, BufWriter, Stdout, Write};
use std::mem;
use std::os::unix::io::RawFd;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

use log::{debug, warn};

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H";
const SGR_RESET: &str = "\x1b[0m";

const DEFAULT_WIDTH_CELLS: u16 = 80;
const DEFAULT_HEIGHT_CELLS: u16 = 24;

/// ANSI-escape implementation of `TerminalSurface` over stdout.
///
/// On construction the terminal is switched to a non-echoing, non-canonical
/// mode (ISIG stays enabled so Ctrl-C still raises SIGINT for the
/// cancellation path) and the window size is captured once. Drop restores
/// the saved termios state best-effort.
pub struct ConsoleSurface {
    out: BufWriter<Stdout>,
    original_termios: Option<Termios>,
    width: usize,
    height: usize,
    current_sgr: Option<u16>,
}

impl ConsoleSurface {
    pub fn new() -> Result<Self> {
        let original_termios = match Termios::from_fd(STDIN_FILENO) {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!(
                    "Failed to get initial termios: {}. Proceeding without mode changes.",
                    e
                );
                None
            }
        };

        if let Some(ref ots) = original_termios {
            let mut quiet = *ots;
            quiet.c_lflag &= !(ECHO | ICANON);
            tcsetattr(STDIN_FILENO, TCSANOW, &quiet)
                .context("ConsoleSurface: failed to set terminal attributes")?;
            debug!("ConsoleSurface: echo and canonical mode disabled.");
        }

        let (cols, rows) = terminal_size_cells(STDIN_FILENO)
            .context("ConsoleSurface: failed to get terminal size")?;
        debug!("ConsoleSurface: grid is {}x{} cells.", cols, rows);

        Ok(ConsoleSurface {
            out: BufWriter::new(io::stdout()),
            original_termios,
            width: cols as usize,
            height: rows as usize,
            current_sgr: None,
        })
    }

    fn set_color(&mut self, color: NamedColor) -> Result<()> {
        let code = color.sgr_foreground();
        if self.current_sgr != Some(code) {
            write!(self.out, "\x1b[{}m", code)
                .context("ConsoleSurface: failed to write SGR sequence")?;
            self.current_sgr = Some(code);
        }
        Ok(())
    }
}

impl TerminalSurface for ConsoleSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_cursor(&mut self, x: usize, y: usize) -> Result<()> {
        debug_assert!(x < self.width, "cursor x {} out of range", x);
        debug_assert!(y < self.height, "cursor y {} out of range", y);
        // CUP is 1-based, row first.
        write!(self.out, "\x1b[{};{}H", y + 1, x + 1)
            .context("ConsoleSurface: failed to write cursor position")
    }

    fn write_char(&mut self, c: char, color: NamedColor) -> Result<()> {
        self.set_color(color)?;
        write!(self.out, "{}", c).context("ConsoleSurface: failed to write character")
    }

    fn write_line(&mut self, text: &str, color: NamedColor) -> Result<()> {
        self.set_color(color)?;
        // Explicit CR since the terminal may have output processing disabled.
        write!(self.out, "{}\r\n", text).context("ConsoleSurface: failed to write line")
    }

    fn clear(&mut self) -> Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN_AND_HOME)
            .context("ConsoleSurface: failed to clear screen")
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        let seq = if visible { CURSOR_SHOW } else { CURSOR_HIDE };
        write!(self.out, "{}", seq).context("ConsoleSurface: failed to set cursor visibility")
    }

    fn reset_style(&mut self) -> Result<()> {
        self.current_sgr = None;
        write!(self.out, "{}", SGR_RESET).context("ConsoleSurface: failed to reset style")
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("ConsoleSurface: failed to flush stdout")
    }
}

impl Drop for ConsoleSurface {
    fn drop(&mut self) {
        if let Some(ref ots) = self.original_termios {
            if let Err(e) = tcsetattr(STDIN_FILENO, TCSANOW, ots) {
                warn!("ConsoleSurface: failed to restore termios on drop: {}", e);
            }
        }
        let _ = write!(self.out, "{}{}", SGR_RESET, CURSOR_SHOW);
        if let Err(e) = self.out.flush() {
            warn!("ConsoleSurface: failed to flush during drop: {}", e);
        }
    }
}

fn terminal_size_cells(fd: RawFd) -> Result<(u16, u16)> {
    unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(anyhow::Error::from(std::io::Error::last_os_error())
                .context("ioctl(TIOCGWINSZ) failed"));
        }
        let cols = if winsz.ws_col == 0 {
            DEFAULT_WIDTH_CELLS
        } else {
            winsz.ws_col
        };
        let rows = if winsz.ws_row == 0 {
            DEFAULT_HEIGHT_CELLS
        } else {
            winsz.ws_row
        };
        Ok((cols, rows))
    }
}
