use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Counting permit pool bounding in-flight probes.
///
/// Permits are handed out as [`ProbePermit`] guards; dropping the guard
/// (normal return, early return, or unwinding) gives the permit back.
#[derive(Debug, Clone)]
pub struct PermitPool {
    semaphore: Arc<Semaphore>,
    limit: usize,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// RAII permit; releases its slot exactly once on drop.
#[derive(Debug)]
pub struct ProbePermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for ProbePermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

impl PermitPool {
    /// Creates a pool of `limit` permits. A limit of zero is treated as one
    /// and anything above [`Semaphore::MAX_PERMITS`] is capped there.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Waits for a free permit.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying semaphore was closed.
    pub async fn acquire(&self) -> Result<ProbePermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        let now = self.in_flight.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        self.peak_in_flight.fetch_max(now, Ordering::AcqRel);
        Ok(ProbePermit {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Highest number of simultaneously held permits since creation.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Acquire)
    }
}
