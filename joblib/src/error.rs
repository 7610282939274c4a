use std::result;
use thiserror;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("job dispatcher has exited")]
    DispatcherExited,
}

pub type Result<T> = result::Result<T, Error>;
