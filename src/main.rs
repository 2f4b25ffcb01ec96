// src/main.rs

// Declare modules
pub mod cancel;
pub mod color;
pub mod effects;
pub mod rng;
pub mod scheduler;
pub mod surface;

use crate::cancel::CancelToken;
use crate::effects::EffectKind;
use crate::scheduler::run_effect;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use once_cell::sync::OnceCell;

/// Token flipped by the SIGINT/SIGTERM handler. The handler only performs an
/// atomic store, which is async-signal-safe.
static SIGNAL_TOKEN: OnceCell<CancelToken> = OnceCell::new();

extern "C" fn handle_termination_signal(_signo: libc::c_int) {
    if let Some(token) = SIGNAL_TOKEN.get() {
        token.cancel();
    }
}

#[derive(Parser)]
#[command(
    name = "termfx",
    version,
    about = "Procedural terminal animations",
    long_about = "Runs a terminal animation until interrupted. \
                  Press Ctrl-C to stop and restore the terminal."
)]
struct Cli {
    #[command(subcommand)]
    effect: EffectCommand,
}

#[derive(Subcommand)]
enum EffectCommand {
    /// Falling character streams with a fading trail.
    ///
    /// Options: --color=<name> (default green), --style=<rainfall|
    /// chars.print|chars.random|blocks.print|blocks.random>.
    Cascade {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Random-walk box-drawing pipes.
    ///
    /// Options: --char=<single-char> to fix the drawn glyph.
    Pipe {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Installs the termination handler for SIGINT and SIGTERM, routing both
/// into the given token.
fn install_signal_handlers(token: &CancelToken) -> Result<()> {
    SIGNAL_TOKEN
        .set(token.clone())
        .ok()
        .context("signal handlers installed twice")?;

    let action = SigAction::new(
        SigHandler::Handler(handle_termination_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only touches atomics via CancelToken::cancel.
    unsafe {
        signal::sigaction(Signal::SIGINT, &action).context("failed to install SIGINT handler")?;
        signal::sigaction(Signal::SIGTERM, &action)
            .context("failed to install SIGTERM handler")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Default to warn so log lines do not interleave with the animation on
    // the same terminal. RUST_LOG overrides as usual.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (kind, args) = match cli.effect {
        EffectCommand::Cascade { args } => (EffectKind::Cascade, args),
        EffectCommand::Pipe { args } => (EffectKind::Pipe, args),
    };

    let cancel = CancelToken::new();
    install_signal_handlers(&cancel)?;
    debug!("Signal handlers installed; starting effect.");

    run_effect(kind, &args, cancel)?;
    info!("Effect stopped via cancellation.");
    Ok(())
}
