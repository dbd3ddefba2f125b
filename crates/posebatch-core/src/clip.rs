//! Authored clip records and the clip-set JSON loader.
//!
//! A [`ClipData`] is the wire format produced by offline baking tools: a
//! frame rate, a frame count, and three parallel flat keyframe arrays laid
//! out part-major (`index = part * frame_count + frame`). Validation happens
//! at table build, not here; the loader only rejects malformed JSON.

use serde::{Deserialize, Serialize};

use crate::error::ClipParseError;

/// One authored clip, covering every part of an actor.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClipData {
    /// Keyframes per second; must be finite and > 0 for the clip to be usable.
    pub fps: f32,
    /// Authored keyframe count per part.
    pub frame_count: usize,
    /// Positions, length `part_count * frame_count`, part-major.
    pub pos: Vec<[f32; 3]>,
    /// Rotation in degrees about the actor's normal axis, same layout.
    pub rot_deg: Vec<f32>,
    /// Scales, same layout.
    pub scale: Vec<[f32; 3]>,
}

impl ClipData {
    /// Keyframe index for `part`/`frame` in the authored flat arrays.
    #[inline]
    pub fn key_index(&self, part: usize, frame: usize) -> usize {
        part * self.frame_count + frame
    }
}

#[derive(Debug, Deserialize)]
struct ClipSet {
    clips: Vec<ClipData>,
}

/// Parse a clip-set JSON document (`{ "clips": [ ... ] }`) into authored
/// records, preserving order so array position is the clip id.
pub fn parse_clip_set_json(s: &str) -> Result<Vec<ClipData>, ClipParseError> {
    let set: ClipSet = serde_json::from_str(s)?;
    Ok(set.clips)
}
