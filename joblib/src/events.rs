use crate::job::Job;
use crate::types::JobId;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Exited { code: i32 },
    Killed { signal: i32 },
    SpawnFailed { reason: String },
    WaitFailed { reason: String },
}

impl JobStatus {
    /// True only for a clean exit with code 0.
    pub fn success(&self) -> bool {
        matches!(self, JobStatus::Exited { code: 0 })
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Exited { code } => write!(f, "exited with code {}", code),
            JobStatus::Killed { signal } => write!(f, "killed by signal {}", signal),
            JobStatus::SpawnFailed { reason } => write!(f, "failed to spawn: {}", reason),
            JobStatus::WaitFailed { reason } => write!(f, "failed to wait: {}", reason),
        }
    }
}

/// The result of running a single job to completion.
#[derive(Clone, Debug)]
pub struct JobOutcome {
    pub id: JobId,
    pub job: Job,
    pub status: JobStatus,
}

/// Outcomes of every job which finished since the previous drain completed.
#[derive(Clone, Debug, Default)]
pub struct DrainReport {
    pub outcomes: Vec<JobOutcome>,
}

impl DrainReport {
    pub fn completed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.status.success())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}
