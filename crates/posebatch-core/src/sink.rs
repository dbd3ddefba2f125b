//! Transform sink: hands evaluated poses back to the host.
//!
//! The engine never touches a scene graph. Callers register opaque handles
//! and supply an [`ApplyPose`] implementation; after every bucket has been
//! evaluated and joined, the apply pass invokes it once per bound part of
//! every active+visible actor. Unbound parts are skipped silently.

use crate::outputs::{PartPose, PoseOutputs};
use crate::pool::ActorPool;

/// Setter capability for the caller's transform handles.
pub trait ApplyPose<H> {
    fn apply(&mut self, handle: &H, pose: &PartPose);
}

impl<H, F> ApplyPose<H> for F
where
    F: FnMut(&H, &PartPose),
{
    fn apply(&mut self, handle: &H, pose: &PartPose) {
        self(handle, pose)
    }
}

/// Copy evaluator outputs onto external handles. Must run after the
/// evaluation join; reads only.
pub(crate) fn apply_outputs<H>(
    pool: &ActorPool<H>,
    outputs: &PoseOutputs,
    applier: &mut dyn ApplyPose<H>,
) {
    let part_count = pool.part_count();
    for slot in 0..pool.capacity() {
        if !pool.active[slot] || !pool.visible[slot] {
            continue;
        }
        let base = slot * part_count;
        for part in 0..part_count {
            if let Some(handle) = &pool.handles[base + part] {
                applier.apply(handle, &outputs.part_pose(base + part));
            }
        }
    }
}
