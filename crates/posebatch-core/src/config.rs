//! Engine sizing configuration.
//!
//! All capacities are fixed at construction time so the per-frame path never
//! allocates. Defaults mirror the reference crowd setup (600 actors, 5 parts,
//! 3 clips, up to 5 keyframes per clip).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Construction-time configuration for [`crate::PoseEngine`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseConfig {
    /// Maximum number of concurrently registered actors.
    pub max_actors: usize,
    /// Maximum keyframes stored per clip; longer authored clips are truncated.
    pub max_frames: usize,
    /// Number of independently transformed parts per actor.
    pub part_count: usize,
    /// Number of clip ids the table holds. Clip ids are clamped into range.
    pub clip_count: usize,
    /// Clip id assigned to fresh pool slots.
    pub default_clip: usize,
    /// Playback speed assigned to fresh pool slots.
    pub default_speed: f32,
    /// Evaluate buckets on a rayon pool. When false everything runs on the
    /// calling thread, which is useful for single-threaded hosts and tests.
    pub parallel: bool,
    /// Worker thread override for the dedicated pool. `None` uses rayon's
    /// default sizing.
    pub threads: Option<usize>,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            max_actors: 600,
            max_frames: 5,
            part_count: 5,
            clip_count: 3,
            default_clip: 0,
            default_speed: 1.0,
            parallel: true,
            threads: None,
        }
    }
}

impl PoseConfig {
    /// Check invariants the rest of the engine relies on.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_actors == 0 {
            return Err(EngineError::InvalidConfig("max_actors must be >= 1".into()));
        }
        if self.max_frames == 0 {
            return Err(EngineError::InvalidConfig("max_frames must be >= 1".into()));
        }
        if self.part_count == 0 {
            return Err(EngineError::InvalidConfig("part_count must be >= 1".into()));
        }
        if self.clip_count == 0 {
            return Err(EngineError::InvalidConfig("clip_count must be >= 1".into()));
        }
        if self.threads == Some(0) {
            return Err(EngineError::InvalidConfig(
                "threads must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}
