//! Periodic removal of expired verification records
//!
//! Redemption already rejects expired records, so the sweep only keeps the
//! store small. Redis expires keys natively; the sweep matters for the
//! MySQL and in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::VerificationRepository;
use crate::services::clock::Clock;

/// Service for cleaning up expired verification records
pub struct VerificationCleanupService<R: VerificationRepository + 'static> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    interval_seconds: u64,
}

impl<R: VerificationRepository> VerificationCleanupService<R> {
    /// `interval_seconds == 0` disables the background task
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, interval_seconds: u64) -> Self {
        Self {
            repository,
            clock,
            interval_seconds,
        }
    }

    /// Run a single cleanup cycle, returning the number of removed records
    pub async fn run_cleanup(&self) -> Result<u64, DomainError> {
        let removed = self.repository.delete_expired(self.clock.now()).await?;
        if removed > 0 {
            info!(removed, event = "verification_cleanup", "Deleted expired verification records");
        }
        Ok(removed)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when the sweep is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval_seconds == 0 {
            warn!("Verification cleanup is disabled");
            return None;
        }

        let period = Duration::from_secs(self.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.interval_seconds,
                "Verification cleanup task started"
            );

            let mut timer = tokio::time::interval(period);
            // the first tick completes immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "Verification cleanup cycle failed");
                }
            }
        }))
    }
}
