//! Top-level error type for salesboard-server

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::http::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure that can stop the service from starting or running.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(DbError::from(e))
    }
}
