//! Packed, read-only keyframe table.
//!
//! `ClipTable::build` copies authored clips into one structure-of-arrays
//! layout indexed by `(clip_id * part_count + part) * max_frames + frame`.
//! The table is never mutated after construction, so evaluation workers share
//! it without synchronization. A clip that fails validation is marked inert
//! (`frame_count == 0`) instead of failing the build: the actors assigned to
//! it simply stop sampling while everything else keeps running.

use log::warn;

use crate::clip::ClipData;
use crate::config::PoseConfig;

/// Immutable keyframe store for a bounded set of clips.
#[derive(Debug)]
pub struct ClipTable {
    part_count: usize,
    max_frames: usize,
    key_pos: Vec<[f32; 3]>,
    key_rot_deg: Vec<f32>,
    key_scale: Vec<[f32; 3]>,
    frame_count: Vec<u32>,
    fps: Vec<f32>,
}

impl ClipTable {
    /// Build the packed table from authored clips. Source clip `i` becomes
    /// clip id `i`; missing or malformed sources become inert clips and extra
    /// sources beyond `clip_count` are dropped.
    pub fn build(cfg: &PoseConfig, clips: &[ClipData]) -> Self {
        let keys = cfg.clip_count * cfg.part_count * cfg.max_frames;
        let mut table = Self {
            part_count: cfg.part_count,
            max_frames: cfg.max_frames,
            key_pos: vec![[0.0; 3]; keys],
            key_rot_deg: vec![0.0; keys],
            key_scale: vec![[1.0; 3]; keys],
            frame_count: vec![0; cfg.clip_count],
            fps: vec![0.0; cfg.clip_count],
        };

        if clips.len() > cfg.clip_count {
            warn!(
                "clip table holds {} clips; ignoring {} extra authored clip(s)",
                cfg.clip_count,
                clips.len() - cfg.clip_count
            );
        }

        for clip_id in 0..cfg.clip_count {
            let Some(src) = clips.get(clip_id) else {
                warn!("clip {clip_id}: no authored data, marking inert");
                continue;
            };
            if !src.fps.is_finite() || src.fps <= 0.0 {
                warn!("clip {clip_id}: fps {} is invalid, marking inert", src.fps);
                continue;
            }
            if src.frame_count == 0 {
                warn!("clip {clip_id}: zero frames, marking inert");
                continue;
            }
            let required = cfg.part_count * src.frame_count;
            if src.pos.len() < required || src.rot_deg.len() < required || src.scale.len() < required
            {
                warn!(
                    "clip {clip_id}: keyframe arrays shorter than {} entries, marking inert",
                    required
                );
                continue;
            }

            let frame_count = src.frame_count.min(cfg.max_frames);
            if frame_count < src.frame_count {
                warn!(
                    "clip {clip_id}: truncating {} authored frames to {}",
                    src.frame_count, frame_count
                );
            }
            table.frame_count[clip_id] = frame_count as u32;
            table.fps[clip_id] = src.fps;

            for part in 0..cfg.part_count {
                let packed_base = (clip_id * cfg.part_count + part) * cfg.max_frames;
                for frame in 0..frame_count {
                    // Source stride is the authored frame count, so truncation
                    // keeps the leading frames of every part.
                    let src_idx = src.key_index(part, frame);
                    let dst = packed_base + frame;
                    table.key_pos[dst] = src.pos[src_idx];
                    table.key_rot_deg[dst] = src.rot_deg[src_idx];
                    table.key_scale[dst] = src.scale[src_idx];
                }
            }
        }

        table
    }

    /// Number of clip ids the table holds (including inert ones).
    #[inline]
    pub fn clip_count(&self) -> usize {
        self.frame_count.len()
    }

    /// Stored keyframes for `clip`; 0 means the clip is inert.
    #[inline]
    pub fn frame_count(&self, clip: usize) -> u32 {
        self.frame_count[clip]
    }

    #[inline]
    pub fn fps(&self, clip: usize) -> f32 {
        self.fps[clip]
    }

    /// Clip duration in seconds; 0 for inert clips.
    #[inline]
    pub fn duration(&self, clip: usize) -> f32 {
        let frames = self.frame_count[clip];
        let fps = self.fps[clip];
        if frames == 0 || fps <= 0.0 {
            0.0
        } else {
            frames as f32 / fps
        }
    }

    #[inline]
    pub fn is_inert(&self, clip: usize) -> bool {
        self.frame_count[clip] == 0 || self.fps[clip] <= 0.0
    }

    /// Packed index of a keyframe.
    #[inline]
    pub(crate) fn key_index(&self, clip: usize, part: usize, frame: usize) -> usize {
        (clip * self.part_count + part) * self.max_frames + frame
    }

    #[inline]
    pub(crate) fn key_pos(&self, index: usize) -> [f32; 3] {
        self.key_pos[index]
    }

    #[inline]
    pub(crate) fn key_rot_deg(&self, index: usize) -> f32 {
        self.key_rot_deg[index]
    }

    #[inline]
    pub(crate) fn key_scale(&self, index: usize) -> [f32; 3] {
        self.key_scale[index]
    }
}
