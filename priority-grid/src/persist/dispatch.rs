//! Fire-and-forget dispatch of priority writes

use std::sync::Arc;

use log::debug;
use log::warn;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::ConcurrencyLimiter;
use super::PersistenceRequest;
use super::RecordWriter;
use crate::error::WriteError;
use crate::model::RecordReference;

/// Sends persistence requests to the host's [`RecordWriter`].
///
/// Every request runs as its own tokio task, bounded by a
/// [`ConcurrencyLimiter`]. Requests are independent: no ordering, no
/// de-duplication, no retry. A failed write is logged and otherwise left to
/// the host.
#[derive(Clone)]
pub struct WriteDispatcher {
    writer: Arc<dyn RecordWriter>,
    limiter: ConcurrencyLimiter,
}

impl WriteDispatcher {
    /// Creates a dispatcher allowing `max_concurrent` writes in flight.
    pub fn new(writer: Arc<dyn RecordWriter>, max_concurrent: usize) -> Self {
        Self {
            writer,
            limiter: ConcurrencyLimiter::new(max_concurrent),
        }
    }

    /// Spawns one write task per request and returns immediately.
    ///
    /// Must be called from within a tokio runtime; outside one every request
    /// fails with [`WriteError::Closed`] without being sent.
    pub fn dispatch(&self, requests: Vec<PersistenceRequest>) -> Dispatched {
        let mut dispatched = Dispatched::default();
        if requests.is_empty() {
            return dispatched;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Dropping {} priority writes: {}", requests.len(), e);
                dispatched.failed_early = requests
                    .into_iter()
                    .map(|request| (request.reference, WriteError::Closed))
                    .collect();
                return dispatched;
            }
        };

        debug!(
            "Dispatching {} priority writes ({}/{} slots free)",
            requests.len(),
            self.limiter.available(),
            self.limiter.limit()
        );
        for request in requests {
            let writer = Arc::clone(&self.writer);
            let limiter = self.limiter.clone();
            let reference = request.reference.clone();

            let task = handle.spawn(async move {
                let _permit = limiter.acquire().await?;
                let result = writer
                    .update_record(&request.reference, request.to_record())
                    .await;
                if let Err(e) = &result {
                    warn!("Priority write for {} failed: {}", request.reference, e);
                }
                result
            });
            dispatched.tasks.push((reference, task));
        }

        dispatched
    }
}

impl std::fmt::Debug for WriteDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteDispatcher")
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

/// The in-flight writes of one dispatch.
///
/// Dropping it detaches the tasks; they still run to completion. Hosts that
/// want to surface failures can [`settle`](Self::settle) it instead.
#[derive(Debug, Default)]
pub struct Dispatched {
    tasks: Vec<(RecordReference, JoinHandle<Result<(), WriteError>>)>,
    failed_early: Vec<(RecordReference, WriteError)>,
}

impl Dispatched {
    /// Number of requests in this dispatch.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.failed_early.len()
    }

    /// Returns `true` if nothing was dispatched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits for every write and reports the outcome.
    pub async fn settle(self) -> DispatchSummary {
        let mut summary = DispatchSummary {
            succeeded: 0,
            failed: self.failed_early,
        };

        for (reference, task) in self.tasks {
            match task.await {
                Ok(Ok(())) => summary.succeeded += 1,
                Ok(Err(e)) => summary.failed.push((reference, e)),
                Err(e) => summary.failed.push((reference, WriteError::Task(e.to_string()))),
            }
        }

        summary
    }
}

/// Outcome of a settled dispatch.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Writes the host accepted.
    pub succeeded: usize,
    /// Writes that failed, with the reason.
    pub failed: Vec<(RecordReference, WriteError)>,
}

impl DispatchSummary {
    /// Returns `true` if every write succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
