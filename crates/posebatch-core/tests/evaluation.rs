use posebatch_core::{ClipData, PartPose, PoseConfig, PoseEngine};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn single_part_cfg(clip_count: usize, max_frames: usize) -> PoseConfig {
    PoseConfig {
        max_actors: 8,
        part_count: 1,
        clip_count,
        max_frames,
        parallel: false,
        ..Default::default()
    }
}

/// Single-part clip from per-frame (position.x, rotation) pairs.
fn clip_from_frames(fps: f32, frames: &[(f32, f32)]) -> ClipData {
    ClipData {
        fps,
        frame_count: frames.len(),
        pos: frames.iter().map(|(x, _)| [*x, 0.0, 0.0]).collect(),
        rot_deg: frames.iter().map(|(_, r)| *r).collect(),
        scale: vec![[1.0; 3]; frames.len()],
    }
}

fn last_pose(eng: &mut PoseEngine<u32>, dt: f32) -> PartPose {
    let mut last = None;
    let mut sink = |_: &u32, p: &PartPose| last = Some(*p);
    eng.update(dt, &mut sink);
    last.expect("one pose applied")
}

#[test]
fn midframe_position_is_linearly_interpolated() {
    // 2 frames @ 2 fps => 1 s duration; x goes 0 -> 10.
    let clips = vec![clip_from_frames(2.0, &[(0.0, 0.0), (10.0, 0.0)])];
    let mut eng = PoseEngine::new(single_part_cfg(1, 2), &clips).unwrap();
    let slot = eng.register(vec![0]).unwrap();

    let pose = last_pose(&mut eng, 0.25);
    approx(pose.position[0], 5.0, 1e-5);
    approx(eng.pool().time(slot), 0.25, 1e-6);
}

#[test]
fn rotation_is_exact_on_keyframes() {
    // 2 frames @ 1 fps => frame boundary every second.
    let clips = vec![clip_from_frames(1.0, &[(0.0, 30.0), (0.0, 120.0)])];
    let mut eng = PoseEngine::new(single_part_cfg(1, 2), &clips).unwrap();
    eng.register(vec![0]).unwrap();

    let pose = last_pose(&mut eng, 0.0);
    assert_eq!(pose.rotation_deg, 30.0, "lerp_t = 0 is frame0 exactly");

    let pose = last_pose(&mut eng, 1.0);
    assert_eq!(pose.rotation_deg, 120.0, "frame boundary is frame1 exactly");
}

#[test]
fn rotation_crosses_zero_not_one_eighty() {
    let clips = vec![clip_from_frames(1.0, &[(0.0, 350.0), (0.0, 10.0)])];
    let mut eng = PoseEngine::new(single_part_cfg(1, 2), &clips).unwrap();
    eng.register(vec![0]).unwrap();

    let pose = last_pose(&mut eng, 0.5);
    // Midway is 360 (== 0), never 180.
    approx(pose.rotation_deg, 360.0, 1e-3);
    assert!((pose.rotation_deg - 180.0).abs() > 90.0);
}

#[test]
fn playback_time_stays_in_range_for_any_speed() {
    // 3 frames @ 2 fps => 1.5 s duration.
    let clips = vec![clip_from_frames(
        2.0,
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
    )];
    let duration = 1.5;

    for speed in [1.0, -1.0, 3.7, -2.3, 40.0, 0.0] {
        let mut eng = PoseEngine::new(single_part_cfg(1, 3), &clips).unwrap();
        let slot = eng.register(vec![0]).unwrap();
        eng.set_speed(slot, speed);

        let mut sink = |_: &u32, _: &PartPose| {};
        for _ in 0..100 {
            eng.update(0.37, &mut sink);
            let t = eng.pool().time(slot);
            assert!(
                (0.0..duration).contains(&t),
                "speed {speed}: time {t} escaped [0, {duration})"
            );
        }
    }
}

#[test]
fn stopped_actors_hold_their_time_and_pose() {
    let clips = vec![clip_from_frames(2.0, &[(0.0, 0.0), (10.0, 0.0)])];
    let mut eng = PoseEngine::new(single_part_cfg(1, 2), &clips).unwrap();
    let slot = eng.register(vec![0]).unwrap();

    let moving = last_pose(&mut eng, 0.25);
    eng.stop(slot);
    let held = last_pose(&mut eng, 10.0);
    assert_eq!(held, moving);
    approx(eng.pool().time(slot), 0.25, 1e-6);

    eng.play(slot);
    let resumed = last_pose(&mut eng, 0.25);
    approx(resumed.position[0], 10.0, 1e-5);
}

#[test]
fn inert_clip_keeps_the_previous_pose_indefinitely() {
    let clips = vec![
        clip_from_frames(2.0, &[(0.0, 0.0), (10.0, 0.0)]),
        // fps = 0 is rejected at build; this clip is permanently inert.
        clip_from_frames(0.0, &[(99.0, 99.0), (99.0, 99.0)]),
    ];
    let mut eng = PoseEngine::new(single_part_cfg(2, 2), &clips).unwrap();
    assert!(eng.clips().is_inert(1));

    let slot = eng.register(vec![0]).unwrap();
    let before = last_pose(&mut eng, 0.25);

    eng.set_clip(slot, 1, true);
    for _ in 0..10 {
        let held = last_pose(&mut eng, 0.4);
        assert_eq!(held, before, "inert clip must not touch outputs");
    }
    assert_eq!(eng.bucket_count(1), 1, "the actor is still bucketed");
}

#[test]
fn backward_playback_wraps_through_the_clip_end() {
    let clips = vec![clip_from_frames(2.0, &[(0.0, 0.0), (10.0, 0.0)])];
    let mut eng = PoseEngine::new(single_part_cfg(1, 2), &clips).unwrap();
    let slot = eng.register(vec![0]).unwrap();
    eng.set_speed(slot, -1.0);

    // 0 - 0.25 wraps to 0.75 of a 1 s loop: phase 1.5, halfway back to frame0.
    let pose = last_pose(&mut eng, 0.25);
    approx(eng.pool().time(slot), 0.75, 1e-6);
    approx(pose.position[0], 5.0, 1e-5);
}

#[test]
fn parallel_and_sequential_evaluation_agree() {
    let clips = vec![
        clip_from_frames(2.0, &[(0.0, 0.0), (10.0, 90.0)]),
        clip_from_frames(3.0, &[(1.0, 350.0), (2.0, 10.0), (3.0, 45.0)]),
        clip_from_frames(5.0, &[(-4.0, 180.0), (4.0, -180.0)]),
    ];
    let base = PoseConfig {
        max_actors: 32,
        part_count: 2,
        clip_count: 3,
        max_frames: 3,
        ..Default::default()
    };

    let two_part_clips: Vec<ClipData> = clips
        .iter()
        .map(|c| {
            let mut d = c.clone();
            // Duplicate the single part so the layout matches part_count = 2.
            d.pos = [c.pos.clone(), c.pos.clone()].concat();
            d.rot_deg = [c.rot_deg.clone(), c.rot_deg.clone()].concat();
            d.scale = [c.scale.clone(), c.scale.clone()].concat();
            d
        })
        .collect();

    let run = |parallel: bool| -> Vec<PartPose> {
        let cfg = PoseConfig {
            parallel,
            threads: if parallel { Some(2) } else { None },
            ..base.clone()
        };
        let mut eng = PoseEngine::new(cfg, &two_part_clips).unwrap();
        for i in 0..24u32 {
            let slot = eng.register(vec![i * 2, i * 2 + 1]).unwrap();
            eng.set_clip(slot, (i % 3) as usize, false);
            eng.set_speed(slot, 0.5 + (i % 5) as f32);
        }
        let mut sink = |_: &u32, _: &PartPose| {};
        for _ in 0..8 {
            eng.update(0.21, &mut sink);
        }
        (0..eng.outputs().len())
            .map(|i| eng.outputs().part_pose(i))
            .collect()
    };

    assert_eq!(run(false), run(true));
}
