//! Error types for the pose engine.
//!
//! Only two surfaces can fail: engine construction and actor registration.
//! Malformed clip data degrades to an inert clip at table build (logged, never
//! an error), and mutators called with stale or out-of-range slots are silent
//! no-ops so the per-frame path stays branch-light and panic-free.

use serde::{Deserialize, Serialize};

/// Failure registering an actor. Not fatal; callers may retry or drop.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterError {
    /// No free slot remains in the pool.
    #[error("actor pool exhausted")]
    PoolExhausted,

    /// The handle list does not match the configured part count.
    #[error("expected {expected} part handles, got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

/// Failure constructing a [`crate::PoseEngine`].
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Failure parsing authored clip JSON.
#[derive(thiserror::Error, Debug)]
pub enum ClipParseError {
    #[error("invalid clip JSON: {0}")]
    Json(#[from] serde_json::Error),
}
