use crate::error;
use crate::types::{Args, JobId, Program};
use std::fmt;

/// A single external program invocation. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    program: Program,
    args: Args,
}

impl Job {
    pub fn new(program: impl Into<Program>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Anything jobs can be handed to for asynchronous execution.
pub trait JobSink {
    fn submit(&self, job: Job) -> error::Result<JobId>;
}
