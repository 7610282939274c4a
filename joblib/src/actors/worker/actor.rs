use super::messages::WorkerMessage;
use super::Completion;
use crate::events::{JobOutcome, JobStatus};
use crate::job::Job;
use crate::types::WorkerId;

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use tokio::{process::Command, sync::mpsc, task::JoinHandle};

pub struct Actor {
    id: WorkerId,
    inbox: mpsc::UnboundedReceiver<WorkerMessage>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl Actor {
    pub fn spawn(
        id: WorkerId,
        inbox: mpsc::UnboundedReceiver<WorkerMessage>,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> JoinHandle<()> {
        let actor = Self {
            id,
            inbox,
            completions,
        };
        tokio::spawn(async move { actor.run().await })
    }

    async fn run(mut self) {
        use WorkerMessage::*;
        while let Some(msg) = self.inbox.recv().await {
            match msg {
                Run { job_id, job } => {
                    let status = execute(&job).await;
                    let outcome = JobOutcome {
                        id: job_id,
                        job,
                        status,
                    };
                    if self.completions.send((self.id, outcome)).is_err() {
                        // dispatcher is gone, nobody left to report to
                        break;
                    }
                }
            }
        }
        log::debug!("worker {} exiting", self.id);
    }
}

/// Run the job's program to completion. Output goes straight to our own stdout/stderr.
async fn execute(job: &Job) -> JobStatus {
    log::info!("{}", job);
    let child = Command::new(job.program())
        .args(job.args())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            log::error!("failed to spawn `{}`: {}", job, e);
            return JobStatus::SpawnFailed {
                reason: e.to_string(),
            };
        }
    };
    match child.wait().await {
        Ok(exit_status) => status_of(exit_status),
        Err(e) => JobStatus::WaitFailed {
            reason: e.to_string(),
        },
    }
}

fn status_of(exit_status: ExitStatus) -> JobStatus {
    if let Some(code) = exit_status.code() {
        JobStatus::Exited { code }
    } else if let Some(signal) = exit_status.signal() {
        JobStatus::Killed { signal }
    } else {
        JobStatus::WaitFailed {
            reason: format!("no exit code or signal in {:?}", exit_status),
        }
    }
}
