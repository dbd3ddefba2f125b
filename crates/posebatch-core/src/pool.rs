//! Fixed-capacity actor registry.
//!
//! Slot state is kept as parallel arrays (structure-of-arrays) so the
//! evaluation kernel touches only the fields it needs, and a free-list stack
//! gives O(1) register/unregister without any allocation after construction.
//! Invariant: the set of active slots and the free stack partition
//! `[0, max_actors)` exactly.
//!
//! Mutators called with an out-of-range or stale slot are silent no-ops; the
//! only fallible operation is [`ActorPool::register`].

use serde::{Deserialize, Serialize};

use crate::config::PoseConfig;
use crate::error::RegisterError;

/// Opaque actor slot id handed out by [`ActorPool::register`].
///
/// Slot indices are reused immediately after unregistration, so holders of a
/// stale `Slot` must not assume it still refers to their actor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Slot(pub u32);

impl Slot {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity registry of animated actors, generic over the opaque
/// per-part handle type owned by the caller.
#[derive(Debug)]
pub struct ActorPool<H> {
    part_count: usize,
    clip_count: usize,

    pub(crate) time: Vec<f32>,
    pub(crate) clip_id: Vec<usize>,
    pub(crate) speed: Vec<f32>,
    pub(crate) playing: Vec<bool>,
    pub(crate) active: Vec<bool>,
    pub(crate) visible: Vec<bool>,

    /// `max_actors * part_count` entries; `None` while the slot is free or a
    /// part was registered unbound.
    pub(crate) handles: Vec<Option<H>>,

    free: Vec<u32>,
}

impl<H> ActorPool<H> {
    pub fn new(cfg: &PoseConfig) -> Self {
        let n = cfg.max_actors;
        let default_clip = cfg.default_clip.min(cfg.clip_count - 1);
        let mut handles = Vec::with_capacity(n * cfg.part_count);
        handles.resize_with(n * cfg.part_count, || None);
        Self {
            part_count: cfg.part_count,
            clip_count: cfg.clip_count,
            time: vec![0.0; n],
            clip_id: vec![default_clip; n],
            speed: vec![cfg.default_speed; n],
            playing: vec![false; n],
            active: vec![false; n],
            visible: vec![false; n],
            handles,
            // Popping from the end hands out slot 0 first.
            free: (0..n as u32).rev().collect(),
        }
    }

    /// Total slot capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Number of currently allocated slots.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.capacity() - self.free.len()
    }

    /// Allocate a slot for an actor owning exactly `part_count` handles.
    /// On failure no state changes.
    pub fn register(&mut self, handles: Vec<H>) -> Result<Slot, RegisterError> {
        if handles.len() != self.part_count {
            return Err(RegisterError::ArityMismatch {
                expected: self.part_count,
                got: handles.len(),
            });
        }
        let slot = self.free.pop().ok_or(RegisterError::PoolExhausted)?;
        let i = slot as usize;
        let base = i * self.part_count;
        for (offset, handle) in handles.into_iter().enumerate() {
            self.handles[base + offset] = Some(handle);
        }
        self.time[i] = 0.0;
        self.active[i] = true;
        self.visible[i] = true;
        self.playing[i] = true;
        Ok(Slot(slot))
    }

    /// Release a slot back to the free stack. Idempotent: unregistering a
    /// free or out-of-range slot changes nothing.
    pub fn unregister(&mut self, slot: Slot) {
        let i = slot.index();
        if i >= self.capacity() || !self.active[i] {
            return;
        }
        let base = i * self.part_count;
        for offset in 0..self.part_count {
            self.handles[base + offset] = None;
        }
        self.active[i] = false;
        self.visible[i] = false;
        self.playing[i] = false;
        self.time[i] = 0.0;
        self.free.push(slot.0);
    }

    /// Switch the slot's clip, clamping the id into `[0, clip_count)`.
    pub fn set_clip(&mut self, slot: Slot, clip_id: usize, reset_time: bool) {
        let i = slot.index();
        if i >= self.capacity() {
            return;
        }
        self.clip_id[i] = clip_id.min(self.clip_count - 1);
        if reset_time {
            self.time[i] = 0.0;
        }
    }

    pub fn set_speed(&mut self, slot: Slot, speed: f32) {
        let i = slot.index();
        if i >= self.capacity() {
            return;
        }
        self.speed[i] = speed;
    }

    pub fn set_visible(&mut self, slot: Slot, visible: bool) {
        let i = slot.index();
        if i >= self.capacity() {
            return;
        }
        self.visible[i] = visible;
    }

    pub fn play(&mut self, slot: Slot) {
        let i = slot.index();
        if i >= self.capacity() {
            return;
        }
        self.playing[i] = true;
    }

    pub fn stop(&mut self, slot: Slot) {
        let i = slot.index();
        if i >= self.capacity() {
            return;
        }
        self.playing[i] = false;
    }

    #[inline]
    pub fn is_active(&self, slot: Slot) -> bool {
        self.active.get(slot.index()).copied().unwrap_or(false)
    }

    /// Current playback time of a slot; 0 for invalid slots.
    #[inline]
    pub fn time(&self, slot: Slot) -> f32 {
        self.time.get(slot.index()).copied().unwrap_or(0.0)
    }

    /// Current clip id of a slot; `None` for out-of-range slots.
    #[inline]
    pub fn clip(&self, slot: Slot) -> Option<usize> {
        self.clip_id.get(slot.index()).copied()
    }

    /// Handle bound to `part` of `slot`, if any.
    #[inline]
    pub fn handle(&self, slot: Slot, part: usize) -> Option<&H> {
        if part >= self.part_count {
            return None;
        }
        self.handles
            .get(slot.index() * self.part_count + part)
            .and_then(|h| h.as_ref())
    }
}
