//! Per-frame bucketing of actors by active clip.
//!
//! Each frame, one pass over the pool appends every active+visible slot index
//! to the bucket of its current clip. Buckets are the unit of parallel work:
//! a slot lands in exactly one bucket, which is what makes the evaluator's
//! output writes disjoint. Bucket vectors are allocated once at pool capacity
//! and cleared, never reallocated.

use crate::config::PoseConfig;
use crate::pool::ActorPool;

#[derive(Debug)]
pub struct Buckets {
    per_clip: Vec<Vec<u32>>,
    active_count: usize,
}

impl Buckets {
    pub fn new(cfg: &PoseConfig) -> Self {
        Self {
            per_clip: (0..cfg.clip_count)
                .map(|_| Vec::with_capacity(cfg.max_actors))
                .collect(),
            active_count: 0,
        }
    }

    /// Rebuild all buckets from scratch. Slot indices end up ascending within
    /// each bucket because this is a single forward pass.
    pub fn rebuild<H>(&mut self, pool: &ActorPool<H>) {
        for bucket in &mut self.per_clip {
            bucket.clear();
        }
        self.active_count = 0;

        for slot in 0..pool.capacity() {
            if !pool.active[slot] || !pool.visible[slot] {
                continue;
            }
            self.active_count += 1;
            let clip = pool.clip_id[slot];
            debug_assert!(clip < self.per_clip.len(), "pool stores clamped clip ids");
            self.per_clip[clip].push(slot as u32);
        }
    }

    /// Actors that were active and visible at the last rebuild.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of actors bucketed for `clip`; 0 for out-of-range ids.
    #[inline]
    pub fn clip_count(&self, clip: usize) -> usize {
        self.per_clip.get(clip).map_or(0, Vec::len)
    }

    /// Slot indices bucketed for `clip`.
    #[inline]
    pub fn slots(&self, clip: usize) -> &[u32] {
        self.per_clip.get(clip).map_or(&[], Vec::as_slice)
    }

    /// All buckets in clip-id order, including empty ones.
    #[inline]
    pub(crate) fn as_slices(&self) -> &[Vec<u32>] {
        &self.per_clip
    }
}
