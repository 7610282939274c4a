mod actor;
mod messages;

use crate::events::JobOutcome;
use crate::job::Job;
use crate::types::{JobId, WorkerId};
use actor::Actor;
use messages::WorkerMessage;
use tokio::{sync::mpsc, task::JoinHandle};

/// Completion notice sent from a worker back to the dispatcher.
pub type Completion = (WorkerId, JobOutcome);

/// Handle to a worker actor which runs one job at a time.
///
/// Dropping the handle closes the worker's inbox; the worker finishes its current job and exits.
pub struct WorkerHandle {
    sender: mpsc::UnboundedSender<WorkerMessage>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn spawn(id: WorkerId, completions: mpsc::UnboundedSender<Completion>) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let task = Actor::spawn(id, inbox, completions);
        Self { sender, task }
    }

    /// Hand a job to this worker. Returns the job back if the worker has gone away.
    pub fn run(&self, job_id: JobId, job: Job) -> Result<(), (JobId, Job)> {
        self.sender
            .send(WorkerMessage::Run { job_id, job })
            .map_err(|mpsc::error::SendError(msg)| match msg {
                WorkerMessage::Run { job_id, job } => (job_id, job),
            })
    }

    /// Close the inbox and hand back the task so the caller can wait for the worker to exit.
    pub fn stop(self) -> JoinHandle<()> {
        drop(self.sender);
        self.task
    }
}
