use crate::model::{InvalidLogin, LoginId};

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No such login '{0}'")]
    NotFound(LoginId),

    #[error("Login '{0}' already exists")]
    AlreadyExists(LoginId),

    #[error("Invalid login: {0}")]
    Invalid(#[from] InvalidLogin),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
