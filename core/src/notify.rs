//! User notification capability injected into the client.
//!
//! # Design
//! The client reports two kinds of messages: a `notice` the user must see
//! (the service is unreachable) and a `diagnostic` describing a failed
//! request. `LogNotifier` sends both to `tracing`. `NoticeNotifier` hands
//! notices to a caller-supplied sink (a modal, a stderr prompt) and, in
//! debug mode, routes diagnostics to the same sink instead of the log.

use std::fmt;

pub trait Notifier: Send + Sync {
    fn notice(&self, message: &str);
    fn diagnostic(&self, message: &str);
}

/// Structured-log notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        tracing::warn!(notice = message, "user notice");
    }

    fn diagnostic(&self, message: &str) {
        tracing::error!(diagnostic = message, "request failed");
    }
}

/// Blocking-notice notifier backed by a sink callback.
pub struct NoticeNotifier<F> {
    sink: F,
    debug: bool,
}

impl<F> NoticeNotifier<F>
where
    F: Fn(&str) + Send + Sync,
{
    pub fn new(sink: F) -> Self {
        Self { sink, debug: false }
    }

    /// In debug mode diagnostics are shown to the user as notices too.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<F> Notifier for NoticeNotifier<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn notice(&self, message: &str) {
        (self.sink)(message);
    }

    fn diagnostic(&self, message: &str) {
        if self.debug {
            (self.sink)(message);
        } else {
            LogNotifier.diagnostic(message);
        }
    }
}

impl<F> fmt::Debug for NoticeNotifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeNotifier")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
