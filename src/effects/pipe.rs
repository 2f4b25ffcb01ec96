// src/effects/pipe.rs

//! The pipe effect: an unbounded sequence of random-walk box-drawing
//! segments. One walker is alive at a time; it spawns on a random edge
//! facing inward, draws a glyph chosen from its direction transition, and
//! advances one cell per frame until it reaches the grid border, at which
//! point the next frame spawns a fresh walker.

use crate::cancel::CancelToken;
use crate::color::{NamedColor, PALETTE};
use crate::effects::{option_value, Effect};
use crate::rng::RandomSource;
use crate::surface::TerminalSurface;

use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

const FRAME_DELAY: Duration = Duration::from_millis(1);

/// Chance per frame that the walker turns onto the other axis.
const TURN_CHANCE: f64 = 0.2;

/// Walkers avoid reusing any of the last `RECENT_COLOR_DEPTH` segment colors.
const RECENT_COLOR_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Box-drawing glyph for a `(previous, next)` direction pair.
///
/// Total over all 16 pairs. The `╬` arm covers the four reversal pairs,
/// which the single-axis turn rule never produces.
fn junction_glyph(previous: Direction, next: Direction) -> char {
    use Direction::*;
    match (previous, next) {
        (Up, Up) | (Down, Down) => '║',
        (Left, Left) | (Right, Right) => '═',
        (Down, Right) => '╚',
        (Down, Left) => '╝',
        (Up, Right) => '╔',
        (Up, Left) => '╗',
        (Right, Down) => '╗',
        (Right, Up) => '╝',
        (Left, Down) => '╔',
        (Left, Up) => '╚',
        (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left) => '╬',
    }
}

/// Options recognized by the pipe effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipeOptions {
    /// Fixed glyph drawn for every cell, bypassing the transition table.
    pub glyph_override: Option<char>,
}

impl PipeOptions {
    /// Resolves `--char=` from the argument list. A multi-character value
    /// contributes its first character; an empty value is ignored.
    pub fn parse(args: &[String]) -> Self {
        PipeOptions {
            glyph_override: option_value(args, "char").and_then(|value| value.chars().next()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Walker {
    x: usize,
    y: usize,
    direction: Direction,
    color: NamedColor,
}

pub struct PipeEffect {
    width: usize,
    height: usize,
    glyph_override: Option<char>,
    turn_chance: f64,
    /// Colors of the most recent segments, oldest first.
    recent_colors: VecDeque<NamedColor>,
    walker: Option<Walker>,
}

impl PipeEffect {
    pub fn new(width: usize, height: usize, options: PipeOptions) -> Self {
        PipeEffect {
            width,
            height,
            glyph_override: options.glyph_override,
            turn_chance: TURN_CHANCE,
            recent_colors: VecDeque::with_capacity(RECENT_COLOR_DEPTH + 1),
            walker: None,
        }
    }

    #[cfg(test)]
    fn set_turn_chance(&mut self, chance: f64) {
        self.turn_chance = chance;
    }

    /// Picks a segment color: uniform over the palette, resampling while the
    /// candidate is black or was used by one of the last few segments.
    fn pick_color(&mut self, rng: &mut dyn RandomSource) -> NamedColor {
        let color = loop {
            let candidate = PALETTE[rng.next_below(PALETTE.len())];
            if candidate != NamedColor::Black && !self.recent_colors.contains(&candidate) {
                break candidate;
            }
        };
        self.recent_colors.push_back(color);
        if self.recent_colors.len() > RECENT_COLOR_DEPTH {
            self.recent_colors.pop_front();
        }
        color
    }

    /// Spawns a walker at a uniform point on a uniform edge, facing inward.
    fn spawn_walker(&mut self, rng: &mut dyn RandomSource) -> Walker {
        let (x, y, direction) = match rng.next_below(4) {
            0 => (rng.next_below(self.width), 0, Direction::Down),
            1 => (rng.next_below(self.width), self.height - 1, Direction::Up),
            2 => (0, rng.next_below(self.height), Direction::Right),
            _ => (self.width - 1, rng.next_below(self.height), Direction::Left),
        };
        let color = self.pick_color(rng);
        Walker {
            x,
            y,
            direction,
            color,
        }
    }

    /// The walker stays alive only strictly inside the border; the spawn
    /// cell itself is exempt because it gets drawn before this is checked.
    fn in_open_bounds(&self, x: isize, y: isize) -> bool {
        x > 0 && x < self.width as isize - 1 && y > 0 && y < self.height as isize - 1
    }
}

impl Effect for PipeEffect {
    fn step(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
        cancel: &CancelToken,
    ) -> Result<()> {
        // Second check point besides the scheduler's, so a long segment
        // never extends cancellation latency past one frame.
        if cancel.is_cancelled() {
            return Ok(());
        }

        let mut walker = match self.walker.take() {
            Some(walker) => walker,
            None => self.spawn_walker(rng),
        };

        let previous = walker.direction;
        let next = if rng.next_unit() < self.turn_chance {
            if previous.is_horizontal() {
                if rng.next_bool() {
                    Direction::Down
                } else {
                    Direction::Up
                }
            } else if rng.next_bool() {
                Direction::Right
            } else {
                Direction::Left
            }
        } else {
            previous
        };

        let glyph = self
            .glyph_override
            .unwrap_or_else(|| junction_glyph(previous, next));
        surface.set_cursor(walker.x, walker.y)?;
        surface.write_char(glyph, walker.color)?;

        let (dx, dy) = next.offset();
        let nx = walker.x as isize + dx;
        let ny = walker.y as isize + dy;
        if self.in_open_bounds(nx, ny) {
            walker.x = nx as usize;
            walker.y = ny as usize;
            walker.direction = next;
            self.walker = Some(walker);
        }
        // Otherwise the segment ended; the next frame spawns a new walker.

        Ok(())
    }

    fn needs_clear(&self) -> bool {
        true
    }

    fn frame_delay(&self) -> Duration {
        FRAME_DELAY
    }
}
