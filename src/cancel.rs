// src/cancel.rs

//! Cooperative cancellation.
//!
//! A `CancelToken` is a cheap, clonable stop flag. Cancellation is advisory:
//! the frame in progress always completes, but the scheduler begins no new
//! frame once the flag is observed. Cancellation is the engine's sole
//! designed termination path and is never reported as an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests a stop. Idempotent, and safe to call from a signal handler
    /// (a single atomic store).
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
