//! Cooperative cancellation for dispatch runs.
//!
//! Notes:
//! - A one-way "stop" flag; once set it stays set for the token's lifetime.
//! - Clones share the flag, so the host can keep one clone (e.g. in a Ctrl-C
//!   handler) while the worker observes another.
//! - `cancel()` only stores an atomic and is safe to call from signal handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (idempotent).
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
