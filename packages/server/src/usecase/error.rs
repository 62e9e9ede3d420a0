//! UseCase layer error types.

use thiserror::Error;

use crate::domain::{MessagePushError, StoreError};

/// Room creation / navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error("Failed to load pictures: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinSlideshowError {
    #[error(transparent)]
    Navigate(#[from] NavigateError),

    #[error("Failed to reply to joining connection: {0}")]
    Push(#[from] MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepImageError {
    #[error(transparent)]
    Navigate(#[from] NavigateError),

    #[error("Failed to broadcast new image: {0}")]
    Broadcast(#[from] MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GotoImageError {
    #[error(transparent)]
    Navigate(#[from] NavigateError),

    #[error("Failed to set latest picture: {0}")]
    Store(#[from] StoreError),
}

/// Failure while ticking a single room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error(transparent)]
    Navigate(#[from] NavigateError),

    #[error("Failed to broadcast new image: {0}")]
    Broadcast(#[from] MessagePushError),
}
