//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a username is not present in the store.
//! - [`Io`]/[`Json`] thrown when the data file is unreadable or malformed.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Io`]: EngineError::Io
//!  [`Json`]: EngineError::Json
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
