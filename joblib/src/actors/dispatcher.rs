mod actor;
mod messages;

use self::{
    actor::JobDispatcher,
    messages::DispatcherMessage::{self, Drain, Shutdown, Submit},
};
use crate::error::{self, Error};
use crate::events::DrainReport;
use crate::job::{Job, JobSink};
use crate::types::JobId;
use std::thread;
use tokio::sync::{mpsc, oneshot};

/// A `JobDispatcher` which runs submitted jobs on a fixed-size pool of workers.
///
/// This struct is actually an actor handle, the real work is done in the actor spawned by `JobDispatcher::spawn`.
/// The handle can be cloned freely and passed to whatever needs to submit jobs; there is no global dispatcher.
#[derive(Clone)]
pub struct JobDispatcherHandle {
    sender: mpsc::UnboundedSender<DispatcherMessage>,
    worker_count: usize,
}

impl JobDispatcherHandle {
    /// Spawn a new dispatcher with `worker_count` workers (at least one).
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        JobDispatcher::spawn(receiver, worker_count);
        log::debug!("job dispatcher started with {} workers", worker_count);
        Self {
            sender,
            worker_count,
        }
    }

    /// Spawn a dispatcher with one worker per logical core on this host.
    pub fn with_available_parallelism() -> Self {
        let cores = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::spawn(cores)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Queue a job for execution. Never blocks.
    pub fn submit(&self, job: Job) -> error::Result<JobId> {
        let job_id = uuid::Uuid::new_v4();
        self.sender
            .send(Submit { job_id, job })
            .map_err(|_| Error::DispatcherExited)?;
        Ok(job_id)
    }

    /// Wait until every job submitted so far, by any clone of this handle, has finished.
    ///
    /// The dispatcher keeps accepting jobs afterwards.
    pub async fn drain(&self) -> error::Result<DrainReport> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Drain { response: tx })
            .map_err(|_| Error::DispatcherExited)?;
        rx.await.map_err(|_| Error::DispatcherExited)
    }

    /// Stop every worker. Jobs already running are waited for; queued jobs are dropped.
    pub async fn shutdown(&self) -> error::Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Shutdown { response: tx })
            .map_err(|_| Error::DispatcherExited)?;
        rx.await.map_err(|_| Error::DispatcherExited)
    }
}

impl JobSink for JobDispatcherHandle {
    fn submit(&self, job: Job) -> error::Result<JobId> {
        JobDispatcherHandle::submit(self, job)
    }
}
