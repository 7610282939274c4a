use std::{io, path::PathBuf, result};
use thiserror;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read raw result file {}", .path.display())]
    RawFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write merged table {}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create output directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Dispatcher(#[from] joblib::error::Error),
}

pub type Result<T> = result::Result<T, Error>;
