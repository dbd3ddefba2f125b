//! The pose evaluation kernel.
//!
//! One invocation per actor per frame: advance playback time (with wraparound
//! in either direction, including multi-lap deltas), pick the surrounding
//! keyframe pair, and interpolate position/scale linearly and rotation along
//! the shortest arc. Results land in the output arrays at
//! `slot * part_count + part`.
//!
//! Bucket tasks run concurrently, so writable state is reached through
//! [`DisjointWrites`], a raw-pointer view over the time and output arrays.
//! Every slot appears in exactly one bucket, so no two tasks ever write the
//! same index.

use crate::outputs::PoseOutputs;
use crate::table::ClipTable;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Shortest-arc interpolation between two angles in degrees: the delta is
/// reduced mod 360 and remapped into `[-180, 180]`, so 350° to 10° passes
/// through 0°, never through 180°.
#[inline]
pub fn lerp_angle_deg(a: f32, b: f32, t: f32) -> f32 {
    let mut delta = (b - a) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    a + delta * t
}

/// Wrap `t` into `[0, duration)`, handling negative values and deltas larger
/// than one lap in a single step.
#[inline]
pub fn wrap_time(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    if t >= duration || t < 0.0 {
        t - (t / duration).floor() * duration
    } else {
        t
    }
}

/// Mutable view over the per-slot state the kernel writes.
///
/// Raw pointers instead of `&mut` slices so independent bucket tasks can
/// share one view; callers must uphold that concurrent tasks touch disjoint
/// slot indices.
pub(crate) struct DisjointWrites {
    time: *mut f32,
    pos: *mut [f32; 3],
    rot_deg: *mut f32,
    scale: *mut [f32; 3],
}

// Safety: tasks write only at their own bucket's slot indices, and each slot
// is appended to exactly one bucket per rebuild.
unsafe impl Send for DisjointWrites {}
unsafe impl Sync for DisjointWrites {}

impl DisjointWrites {
    pub(crate) fn new(time: &mut [f32], outputs: &mut PoseOutputs) -> Self {
        Self {
            time: time.as_mut_ptr(),
            pos: outputs.pos.as_mut_ptr(),
            rot_deg: outputs.rot_deg.as_mut_ptr(),
            scale: outputs.scale.as_mut_ptr(),
        }
    }

    #[inline]
    unsafe fn time(&self, slot: usize) -> f32 {
        *self.time.add(slot)
    }

    #[inline]
    unsafe fn set_time(&self, slot: usize, t: f32) {
        *self.time.add(slot) = t;
    }

    #[inline]
    unsafe fn write_part(&self, index: usize, pos: [f32; 3], rot_deg: f32, scale: [f32; 3]) {
        *self.pos.add(index) = pos;
        *self.rot_deg.add(index) = rot_deg;
        *self.scale.add(index) = scale;
    }
}

/// Read-only per-frame evaluation parameters shared by all bucket tasks.
pub(crate) struct EvalFrame<'a> {
    pub table: &'a ClipTable,
    pub speed: &'a [f32],
    pub playing: &'a [bool],
    pub part_count: usize,
    pub dt: f32,
}

/// Evaluate every actor in one clip's bucket.
pub(crate) fn eval_bucket(clip: usize, bucket: &[u32], ctx: &EvalFrame<'_>, writes: &DisjointWrites) {
    let frame_count = ctx.table.frame_count(clip);
    if frame_count == 0 {
        return;
    }
    let fps = ctx.table.fps(clip);
    if fps <= 0.0 {
        return;
    }
    let duration = frame_count as f32 / fps;

    for &slot in bucket {
        let slot = slot as usize;

        // Safety: `slot` belongs to this bucket only.
        let mut t = unsafe { writes.time(slot) };
        if ctx.playing[slot] {
            t += ctx.dt * ctx.speed[slot];
            t = wrap_time(t, duration);
            unsafe { writes.set_time(slot, t) };
        }

        let phase = t * fps;
        let phase_floor = phase.floor();
        let mut frame0 = (phase_floor as i64 % frame_count as i64) as i32;
        if frame0 < 0 {
            frame0 += frame_count as i32;
        }
        let frame0 = frame0 as usize;
        let frame1 = if frame0 + 1 >= frame_count as usize {
            0
        } else {
            frame0 + 1
        };
        let lerp_t = phase - phase_floor;

        let base_out = slot * ctx.part_count;
        for part in 0..ctx.part_count {
            let idx0 = ctx.table.key_index(clip, part, frame0);
            let idx1 = ctx.table.key_index(clip, part, frame1);

            let pos = lerp_vec3(ctx.table.key_pos(idx0), ctx.table.key_pos(idx1), lerp_t);
            let scale = lerp_vec3(
                ctx.table.key_scale(idx0),
                ctx.table.key_scale(idx1),
                lerp_t,
            );
            let rot = lerp_angle_deg(
                ctx.table.key_rot_deg(idx0),
                ctx.table.key_rot_deg(idx1),
                lerp_t,
            );

            // Safety: `base_out + part` is inside this slot's output range.
            unsafe { writes.write_part(base_out + part, pos, rot, scale) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_lerp_hits_endpoints_exactly() {
        assert_eq!(lerp_angle_deg(30.0, 120.0, 0.0), 30.0);
        assert_eq!(lerp_angle_deg(30.0, 120.0, 1.0), 120.0);
    }

    #[test]
    fn angle_lerp_takes_the_short_way_around() {
        // Midway between 350 and 10 is 360, not 180.
        let mid = lerp_angle_deg(350.0, 10.0, 0.5);
        assert!((mid - 360.0).abs() < 1e-4, "got {mid}");
        let mid = lerp_angle_deg(10.0, 350.0, 0.5);
        assert!((mid - 0.0).abs() < 1e-4, "got {mid}");
    }

    #[test]
    fn wrap_time_covers_both_directions_and_multiple_laps() {
        let d = 1.0;
        assert_eq!(wrap_time(0.25, d), 0.25);
        assert!((wrap_time(1.25, d) - 0.25).abs() < 1e-6);
        assert!((wrap_time(7.5, d) - 0.5).abs() < 1e-6);
        assert!((wrap_time(-0.25, d) - 0.75).abs() < 1e-6);
        assert!((wrap_time(-3.25, d) - 0.75).abs() < 1e-6);
        assert_eq!(wrap_time(0.5, 0.0), 0.0);
    }
}
