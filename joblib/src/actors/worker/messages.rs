use crate::job::Job;
use crate::types::JobId;

#[derive(Debug)]
pub enum WorkerMessage {
    Run { job_id: JobId, job: Job },
}
