use thiserror::Error;

use crate::LifecycleState;

/// Failure reported by a capability port.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("background task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot move engine from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
    #[error("engine has not been started")]
    NotStarted,
    #[error("engine is stopped")]
    Stopped,
    #[error("engine task was dropped while the engine was running")]
    TaskDropped,
}
