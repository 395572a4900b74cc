//! Menu layer errors

use thiserror::Error;

use crate::db::store::StoreError;

#[derive(Debug, Error)]
pub enum MenuError {
    /// A write could not be committed; nothing was applied
    #[error("store write failed: {0}")]
    StoreWrite(#[source] StoreError),

    /// A read failed and the fallback policy refused to substitute static data
    #[error("store read failed: {0}")]
    StoreRead(#[source] StoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid credential")]
    InvalidCredential,
}

pub type MenuResult<T> = Result<T, MenuError>;
