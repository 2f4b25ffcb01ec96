// src/scheduler.rs

//! The cooperative frame loop that drives one effect against one surface
//! until the cancellation token fires, then restores terminal state.
//!
//! The loop never blocks except for the inter-frame sleep, which is the
//! voluntary suspension point where cancellation is observed. A frame in
//! progress always completes; no frame begins once the token is set.

use crate::cancel::CancelToken;
use crate::effects::{
    CascadeEffect, CascadeOptions, Effect, EffectKind, PipeEffect, PipeOptions,
};
use crate::rng::{EntropyRng, RandomSource};
use crate::surface::{ConsoleSurface, TerminalSurface};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::thread;

/// Status of the scheduler after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStatus {
    /// The frame rendered; the loop continues.
    Running,
    /// The cancellation token was observed; the loop is done.
    Stopped,
}

/// Drives one effect at its fixed cadence.
///
/// Dependencies are `&mut dyn` so tests can substitute a recording surface
/// and scripted randomness.
pub struct EffectScheduler<'a> {
    surface: &'a mut dyn TerminalSurface,
    rng: &'a mut dyn RandomSource,
    cancel: CancelToken,
}

impl<'a> EffectScheduler<'a> {
    pub fn new(
        surface: &'a mut dyn TerminalSurface,
        rng: &'a mut dyn RandomSource,
        cancel: CancelToken,
    ) -> Self {
        EffectScheduler {
            surface,
            rng,
            cancel,
        }
    }

    /// Runs the effect until cancellation. Surface failures propagate as
    /// fatal; cleanup is attempted either way and never masks them.
    pub fn run(&mut self, effect: &mut dyn Effect) -> Result<()> {
        let outcome = self.run_frames(effect);
        self.cleanup();
        outcome
    }

    fn run_frames(&mut self, effect: &mut dyn Effect) -> Result<()> {
        self.surface.set_cursor_visible(false)?;
        if effect.needs_clear() {
            self.surface.clear()?;
        }
        self.surface.flush()?;

        let delay = effect.frame_delay();
        loop {
            match self.frame(effect)? {
                SchedulerStatus::Stopped => {
                    info!("Scheduler: cancellation observed, stopping.");
                    return Ok(());
                }
                SchedulerStatus::Running => thread::sleep(delay),
            }
        }
    }

    /// One iteration: observe the token, or render and flush a frame.
    fn frame(&mut self, effect: &mut dyn Effect) -> Result<SchedulerStatus> {
        if self.cancel.is_cancelled() {
            return Ok(SchedulerStatus::Stopped);
        }
        effect.step(self.surface, self.rng, &self.cancel)?;
        self.surface.flush()?;
        Ok(SchedulerStatus::Running)
    }

    /// Best-effort restoration: reset style, show the cursor. Failures here
    /// are logged and swallowed.
    fn cleanup(&mut self) {
        if let Err(e) = self.surface.reset_style() {
            warn!("Scheduler: failed to reset style during cleanup: {}", e);
        }
        if let Err(e) = self.surface.set_cursor_visible(true) {
            warn!("Scheduler: failed to show cursor during cleanup: {}", e);
        }
        if let Err(e) = self.surface.flush() {
            warn!("Scheduler: failed to flush during cleanup: {}", e);
        }
    }
}

/// Entry point for the dispatch layer: runs the named effect against the
/// process's terminal until `cancel` fires. Termination via cancellation is
/// success; only a lost surface produces an error.
pub fn run_effect(kind: EffectKind, args: &[String], cancel: CancelToken) -> Result<()> {
    let mut surface = ConsoleSurface::new().context("failed to open terminal surface")?;
    let mut rng = EntropyRng::new();
    let width = surface.width();
    let height = surface.height();
    debug!("Running {:?} on a {}x{} grid", kind, width, height);

    let mut effect: Box<dyn Effect> = match kind {
        EffectKind::Cascade => Box::new(CascadeEffect::new(
            width,
            height,
            CascadeOptions::parse(args),
            &mut rng,
        )),
        EffectKind::Pipe => Box::new(PipeEffect::new(width, height, PipeOptions::parse(args))),
    };

    EffectScheduler::new(&mut surface, &mut rng, cancel).run(effect.as_mut())
}
