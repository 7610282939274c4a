mod actors;
pub mod error;
mod events;
mod job;
pub mod types;

// re-export the dispatcher handle as if it is the job dispatcher itself.
pub use actors::dispatcher::JobDispatcherHandle as JobDispatcher;
pub use events::{DrainReport, JobOutcome, JobStatus};
pub use job::{Job, JobSink};
