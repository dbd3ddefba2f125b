//! Batched pose-clip evaluation engine (engine-agnostic).
//!
//! Animates large populations of simple multi-part actors by sampling
//! pre-baked keyframe clips each frame: a fixed-capacity actor registry
//! ([`ActorPool`]), a packed read-only keyframe table ([`ClipTable`]),
//! per-frame bucketing by active clip ([`bucket::Buckets`]), a data-parallel
//! interpolation kernel, and an apply pass writing results to the caller's
//! opaque handles through [`ApplyPose`]. [`PoseEngine`] wires these together
//! behind a per-frame `update(dt, applier)` with no allocation on the hot
//! path.

pub mod bucket;
pub mod clip;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod outputs;
pub mod pool;
pub mod sink;
pub mod table;

pub use clip::{parse_clip_set_json, ClipData};
pub use config::PoseConfig;
pub use engine::PoseEngine;
pub use error::{ClipParseError, EngineError, RegisterError};
pub use outputs::{PartPose, PoseOutputs};
pub use pool::{ActorPool, Slot};
pub use sink::ApplyPose;
pub use table::ClipTable;
