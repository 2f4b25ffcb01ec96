// src/effects/mod.rs
// Declares the effect implementations and defines the common trait.

pub mod cascade;
pub mod pipe;

pub use cascade::{CascadeEffect, CascadeOptions, CascadeStyle};
pub use pipe::{PipeEffect, PipeOptions};

use crate::cancel::CancelToken;
use crate::rng::RandomSource;
use crate::surface::TerminalSurface;

use anyhow::Result;
use std::time::Duration;

/// Which animation to run. The dispatch layer selects one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Cascade,
    Pipe,
}

/// One continuously running terminal animation.
///
/// An effect owns only its private per-frame state; everything it renders
/// goes through the injected surface and randomness capabilities.
pub trait Effect {
    /// Renders one frame. The token is re-checked by effects whose frames
    /// would otherwise carry multi-frame state transitions, so cancellation
    /// latency stays bounded by a single frame.
    fn step(
        &mut self,
        surface: &mut dyn TerminalSurface,
        rng: &mut dyn RandomSource,
        cancel: &CancelToken,
    ) -> Result<()>;

    /// Whether the effect wants a blank canvas before its first frame.
    fn needs_clear(&self) -> bool {
        false
    }

    /// Inter-frame delay the scheduler should honor for this effect.
    fn frame_delay(&self) -> Duration;
}

/// Scans `--key=value` tokens for `key`, returning the raw value of the
/// first match. Order-independent; unrecognized tokens are simply skipped.
pub(crate) fn option_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter().find_map(|arg| {
        arg.strip_prefix("--")
            .and_then(|rest| rest.strip_prefix(key))
            .and_then(|rest| rest.strip_prefix('='))
    })
}
