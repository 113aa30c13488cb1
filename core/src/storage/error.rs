use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while keeping the logins file on disk.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot create directory for the logins file '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Cannot read logins file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot stage logins to '{}': {source}", path.display())]
    Stage { path: PathBuf, source: io::Error },

    #[error("Cannot replace logins file '{}': {source}", path.display())]
    Replace { path: PathBuf, source: io::Error },

    #[error("Cannot encode logins for '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Logins file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<Error> for logindetail_store::Error {
    fn from(e: Error) -> Self {
        logindetail_store::Error::Backend(e.to_string())
    }
}
