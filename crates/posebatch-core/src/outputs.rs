//! Evaluated pose storage.
//!
//! One structure-of-arrays block sized `max_actors * part_count`, indexed by
//! `slot * part_count + part`. Values persist across frames: an actor on an
//! inert clip simply keeps its last evaluated pose.

use serde::{Deserialize, Serialize};

use crate::config::PoseConfig;

/// Interpolated transform for a single part.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartPose {
    pub position: [f32; 3],
    /// Rotation in degrees about the actor's normal axis.
    pub rotation_deg: f32,
    pub scale: [f32; 3],
}

impl Default for PartPose {
    /// Identity pose: origin, no rotation, unit scale.
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation_deg: 0.0,
            scale: [1.0; 3],
        }
    }
}

/// Per-part evaluation outputs for every slot in the pool.
#[derive(Debug)]
pub struct PoseOutputs {
    pub(crate) pos: Vec<[f32; 3]>,
    pub(crate) rot_deg: Vec<f32>,
    pub(crate) scale: Vec<[f32; 3]>,
}

impl PoseOutputs {
    pub fn new(cfg: &PoseConfig) -> Self {
        let n = cfg.max_actors * cfg.part_count;
        Self {
            pos: vec![[0.0; 3]; n],
            rot_deg: vec![0.0; n],
            scale: vec![[1.0; 3]; n],
        }
    }

    /// Number of part entries (`max_actors * part_count`).
    #[inline]
    pub fn len(&self) -> usize {
        self.rot_deg.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rot_deg.is_empty()
    }

    /// Read back one part's pose by flat index (`slot * part_count + part`).
    #[inline]
    pub fn part_pose(&self, index: usize) -> PartPose {
        PartPose {
            position: self.pos[index],
            rotation_deg: self.rot_deg[index],
            scale: self.scale[index],
        }
    }
}
