use crate::events::DrainReport;
use crate::job::Job;
use crate::types::JobId;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum DispatcherMessage {
    Submit {
        job_id: JobId,
        job: Job,
    },
    Drain {
        response: oneshot::Sender<DrainReport>,
    },
    Shutdown {
        response: oneshot::Sender<()>,
    },
}
