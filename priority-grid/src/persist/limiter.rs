//! Concurrency limiting for in-flight writes.

use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tokio::sync::Semaphore;

use crate::error::WriteError;

/// Limits the number of priority writes in flight at once.
///
/// Wraps a `tokio::sync::Semaphore`. Permits are owned so they can move into
/// spawned write tasks; each is released when its task finishes.
///
/// # Example
///
/// ```
/// use priority_grid::persist::ConcurrencyLimiter;
///
/// let limiter = ConcurrencyLimiter::new(10);
/// assert_eq!(limiter.limit(), 10);
/// assert_eq!(limiter.available(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Creates a new concurrency limiter. A limit of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Acquires a permit, waiting if necessary.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, WriteError> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| WriteError::Closed)
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of available permits.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(52)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permits_are_released_on_drop() {
        let limiter = ConcurrencyLimiter::new(2);

        let first = limiter.acquire().await.unwrap();
        let _second = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available(), 0);

        drop(first);
        assert_eq!(limiter.available(), 1);
    }

    #[test]
    fn test_zero_limit_is_raised() {
        assert_eq!(ConcurrencyLimiter::new(0).limit(), 1);
    }
}
