//! Shared "logged in" state.
//!
//! A `Session` is a cheap cloneable handle: the client holds one and clears it
//! when the service answers 401, views hold clones and read it to decide
//! whether to show authenticated pages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Session {
    logged_in: Arc<AtomicBool>,
}

impl Session {
    /// A new session starts out logged in until the service says otherwise.
    pub fn new() -> Self {
        Self {
            logged_in: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Relaxed)
    }

    pub fn mark_logged_in(&self) {
        self.logged_in.store(true, Ordering::Relaxed);
    }

    pub fn mark_logged_out(&self) {
        if self.logged_in.swap(false, Ordering::Relaxed) {
            tracing::info!("session expired, marked as logged out");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
