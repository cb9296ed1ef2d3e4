//! Runs service jobs off the foreground thread.
//!
//! Each job gets its own named background thread so a hung request never
//! delays a newer one. Results come back through a channel that the
//! foreground drains without blocking, in whatever order the calls
//! finish. All viewer state stays on the foreground thread; only the job
//! description and its captured generation cross over.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use super::{Job, JobResult, MoleculeService};
use crate::error::ViewerError;

/// Executes [`Job`]s against a shared [`MoleculeService`].
pub struct ServiceDispatcher<S> {
    service: Arc<S>,
    result_tx: mpsc::Sender<JobResult>,
    result_rx: mpsc::Receiver<JobResult>,
}

impl<S: MoleculeService + 'static> ServiceDispatcher<S> {
    /// Create a dispatcher owning `service`.
    pub fn new(service: S) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            service: Arc::new(service),
            result_tx,
            result_rx,
        }
    }

    /// The underlying service, for direct (blocking) calls.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Start running `job` in the background (non-blocking).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ThreadSpawn`] if the worker thread cannot be
    /// started; the job has then not run.
    pub fn submit(&self, job: Job) -> Result<(), ViewerError> {
        let service = Arc::clone(&self.service);
        let result_tx = self.result_tx.clone();
        let name = match &job {
            Job::Render(_) => "render-request",
            Job::Analytics { .. } => "analytics-request",
        };
        let _ = std::thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                let result = job.run(service.as_ref());
                let _ = result_tx.send(result);
            })
            .map_err(ViewerError::ThreadSpawn)?;
        Ok(())
    }

    /// Non-blocking check for a finished job.
    pub fn try_recv(&self) -> Option<JobResult> {
        self.result_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished job.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<JobResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }
}
