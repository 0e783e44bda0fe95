// src/services/supersede.rs
// DOCUMENTATION: Cancel-on-supersede for interactive callers
// PURPOSE: Hand out one cancellation token per search, canceling the previous one

use tokio_util::sync::CancellationToken;

/// Tracks the latest search of one caller
/// DOCUMENTATION: Owned by the caller (one per search box, session, ...),
/// never shared process-wide. Starting a search cancels the one before it,
/// so a slow stale search can no longer deliver results.
#[derive(Debug, Default)]
pub struct SearchSupersession {
    current: Option<CancellationToken>,
}

impl SearchSupersession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous search, if any, and return the token of a new one
    pub fn begin(&mut self) -> CancellationToken {
        if let Some(previous) = self.current.take() {
            if !previous.is_cancelled() {
                log::debug!("Superseding in-flight search");
            }
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancel the current search without starting another
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for SearchSupersession {
    fn drop(&mut self) {
        self.cancel();
    }
}
