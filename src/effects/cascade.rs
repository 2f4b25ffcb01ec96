// src/effects/cascade.rs

//! The cascade effect: falling character streams in the default `rainfall`
//! style, plus four static-frame styles that emit random glyphs without any
//! persistent per-column state.
//!
//! In `rainfall` each column keeps a head row that advances one row per
//! frame and wraps at the bottom. A frame writes three cells per column: a
//! bright head glyph, a darkened glyph one row behind it, and a blank two
//! rows behind, so the stream appears to fall instead of filling the screen.
//! Glyphs are re-randomized every frame; only the row positions persist.

use crate::cancel::CancelToken;
use crate::color::NamedColor;
use crate::effects::{option_value, Effect};
use crate::rng::RandomSource;
use crate::surface::TerminalSurface;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FRAME_DELAY: Duration = Duration::from_millis(5);

const BLOCK_GLYPHS: [char; 4] = ['█', '░', '▒', '▓'];

// Random printable ASCII, codepoints [33, 126).
const PRINTABLE_FIRST: u8 = 33;
const PRINTABLE_COUNT: usize = 93;

fn random_printable(rng: &mut dyn RandomSource) -> char {
    char::from(PRINTABLE_FIRST + rng.next_below(PRINTABLE_COUNT) as u8)
}

fn random_block(rng: &mut dyn RandomSource) -> char {
    BLOCK_GLYPHS[rng.next_below(BLOCK_GLYPHS.len())]
}

/// Render style for the cascade effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CascadeStyle {
    /// Falling streams with a darkened trail (the default).
    #[default]
    Rainfall,
    /// One full line of random printable characters per frame.
    CharsPrint,
    /// One random printable character at a random cell per frame.
    CharsRandom,
    /// One full line of random block glyphs per frame.
    BlocksPrint,
    /// One random block glyph at a random cell per frame.
    BlocksRandom,
}

impl CascadeStyle {
    /// Parses a style name, case-insensitively. `None` for unknown names.
    pub fn parse(name: &str) -> Option<CascadeStyle> {
        match name.to_ascii_lowercase().as_str() {
            "rainfall" => Some(CascadeStyle::Rainfall),
            "chars.print" => Some(CascadeStyle::CharsPrint),
            "chars.random" => Some(CascadeStyle::CharsRandom),
            "blocks.print" => Some(CascadeStyle::BlocksPrint),
            "blocks.random" => Some(CascadeStyle::BlocksRandom),
            _ => None,
        }
    }
}

/// Options recognized by the cascade effect, resolved once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOptions {
    pub color: NamedColor,
    pub style: CascadeStyle,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        CascadeOptions {
            color: NamedColor::Green,
            style: CascadeStyle::Rainfall,
        }
    }
}

impl CascadeOptions {
    /// Resolves `--color=` and `--style=` from the argument list.
    /// Unrecognized values keep the default silently.
    pub fn parse(args: &[String]) -> Self {
        let defaults = CascadeOptions::default();
        let color = option_value(args, "color")
            .and_then(NamedColor::parse)
            .unwrap_or(defaults.color);
        let style = option_value(args, "style")
            .and_then(|value| {
                let parsed = CascadeStyle::parse(value);
                if parsed.is_none() {
                    debug!("Ignoring unrecognized cascade style '{}'", value);
                }
                parsed
            })
            .unwrap_or(defaults.style);
        CascadeOptions { color, style }
    }
}

pub struct CascadeEffect {
    color: NamedColor,
    style: CascadeStyle,
    width: usize,
    height: usize,
    /// Head row per column, always in `[0, height)`.
    head_rows: Vec<usize>,
}

impl CascadeEffect {
    /// Creates the effect for a `width` x `height` grid. Each column's head
    /// starts at a random row.
    pub fn new(
        width: usize,
        height: usize,
        options: CascadeOptions,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let head_rows = (0..width).map(|_| rng.next_below(height)).collect();
        CascadeEffect {
            color: options.color,
            style: options.style,
            width,
            height,
            head_rows,
        }
    }

    fn step_rainfall(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        for col in 0..self.width {
            let head = self.head_rows[col];

            surface.set_cursor(col, head)?;
            surface.write_char(random_printable(rng), self.color)?;

            if head > 0 {
                surface.set_cursor(col, head - 1)?;
                surface.write_char(random_printable(rng), self.color.darkened())?;
            }

            if head > 1 {
                // Erase the tail two rows back so the streak stays length 2.
                surface.set_cursor(col, head - 2)?;
                surface.write_char(' ', self.color)?;
            }

            self.head_rows[col] = (head + 1) % self.height;
        }
        Ok(())
    }

    fn step_print(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
        blocks: bool,
    ) -> Result<()> {
        let line: String = (0..self.width)
            .map(|_| {
                if blocks {
                    random_block(rng)
                } else {
                    random_printable(rng)
                }
            })
            .collect();
        surface.write_line(&line, self.color)
    }

    fn step_random(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
        blocks: bool,
    ) -> Result<()> {
        let x = rng.next_below(self.width);
        let y = rng.next_below(self.height);
        surface.set_cursor(x, y)?;
        let glyph = if blocks {
            random_block(rng)
        } else {
            random_printable(rng)
        };
        surface.write_char(glyph, self.color)
    }

    #[cfg(test)]
    fn head_rows(&self) -> &[usize] {
        &self.head_rows
    }
}

impl Effect for CascadeEffect {
    fn step(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
        _cancel: &CancelToken,
    ) -> Result<()> {
        match self.style {
            CascadeStyle::Rainfall => self.step_rainfall(surface, rng),
            CascadeStyle::CharsPrint => self.step_print(surface, rng, false),
            CascadeStyle::BlocksPrint => self.step_print(surface, rng, true),
            CascadeStyle::CharsRandom => self.step_random(surface, rng, false),
            CascadeStyle::BlocksRandom => self.step_random(surface, rng, true),
        }
    }

    fn frame_delay(&self) -> Duration {
        FRAME_DELAY
    }
}
