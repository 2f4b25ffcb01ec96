// src/surface/mock.rs

//! Recording surface for tests. Tracks the cursor, asserts the coordinate
//! contract, and keeps both a chronological cell-write log and the final
//! grid contents so property tests can check either view.

use crate::color::NamedColor;
use crate::surface::TerminalSurface;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub x: usize,
    pub y: usize,
    pub ch: char,
    pub color: NamedColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    SetCursor(usize, usize),
    WriteChar(char, NamedColor),
    WriteLine(String, NamedColor),
    Clear,
    SetCursorVisible(bool),
    ResetStyle,
    Flush,
}

pub struct MockSurface {
    width: usize,
    height: usize,
    cursor: (usize, usize),
    pub grid: Vec<Vec<char>>,
    pub cell_writes: Vec<CellWrite>,
    pub lines: Vec<(String, NamedColor)>,
    pub calls: Vec<SurfaceCall>,
    /// When set, every write fails; used to exercise fatal surface errors.
    pub fail_writes: bool,
}

impl MockSurface {
    pub fn new(width: usize, height: usize) -> Self {
        MockSurface {
            width,
            height,
            cursor: (0, 0),
            grid: vec![vec![' '; width]; height],
            cell_writes: Vec::new(),
            lines: Vec::new(),
            calls: Vec::new(),
            fail_writes: false,
        }
    }

    /// Cell writes whose character and color match the given head style.
    pub fn writes_matching(&self, color: NamedColor) -> Vec<&CellWrite> {
        self.cell_writes.iter().filter(|w| w.color == color).collect()
    }

    pub fn cursor_visible_history(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::SetCursorVisible(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SurfaceCall::Clear)).count()
    }

    pub fn reset_style_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::ResetStyle))
            .count()
    }
}

impl TerminalSurface for MockSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_cursor(&mut self, x: usize, y: usize) -> Result<()> {
        assert!(x < self.width, "cursor x {} out of range 0..{}", x, self.width);
        assert!(y < self.height, "cursor y {} out of range 0..{}", y, self.height);
        self.cursor = (x, y);
        self.calls.push(SurfaceCall::SetCursor(x, y));
        Ok(())
    }

    fn write_char(&mut self, c: char, color: NamedColor) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("mock surface write failure"));
        }
        let (x, y) = self.cursor;
        assert!(x < self.width && y < self.height, "write at ({}, {}) out of range", x, y);
        self.grid[y][x] = c;
        self.cell_writes.push(CellWrite { x, y, ch: c, color });
        self.calls.push(SurfaceCall::WriteChar(c, color));
        // The terminal advances the cursor after printing.
        if x + 1 < self.width {
            self.cursor.0 = x + 1;
        }
        Ok(())
    }

    fn write_line(&mut self, text: &str, color: NamedColor) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("mock surface write failure"));
        }
        self.lines.push((text.to_string(), color));
        self.calls.push(SurfaceCall::WriteLine(text.to_string(), color));
        self.cursor.0 = 0;
        if self.cursor.1 + 1 < self.height {
            self.cursor.1 += 1;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for row in &mut self.grid {
            row.fill(' ');
        }
        self.cursor = (0, 0);
        self.calls.push(SurfaceCall::Clear);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.calls.push(SurfaceCall::SetCursorVisible(visible));
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::ResetStyle);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::Flush);
        Ok(())
    }
}
