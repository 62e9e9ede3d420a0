//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Folder path was empty
    #[error("Folder path must not be empty")]
    EmptyFolderPath,

    /// Picture identifier does not name a file under the collection root
    #[error("Invalid picture id '{0}'")]
    InvalidPictureId(String),

    /// Connection identifier was empty
    #[error("Connection id must not be empty")]
    EmptyConnectionId,
}

/// Backing picture store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not answer the query (I/O, database, ...)
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// The picture is not known to the store
    #[error("Picture '{0}' not found")]
    PictureNotFound(String),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection is not registered
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel rejected the message
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
