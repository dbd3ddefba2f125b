//! Engine: data ownership and the public per-frame API.
//!
//! `PoseEngine` is an explicit context object constructed once at startup:
//! it owns the clip table, the actor pool, the per-frame buckets, the output
//! arrays, and (optionally) a dedicated rayon worker pool. A frame tick is
//! `update(dt, applier)`: bucketize, evaluate buckets in parallel, join, then
//! apply outputs to the caller's handles. Nothing on that path allocates or
//! fails.

use crate::bucket::Buckets;
use crate::clip::ClipData;
use crate::config::PoseConfig;
use crate::error::{EngineError, RegisterError};
use crate::eval::{eval_bucket, DisjointWrites, EvalFrame};
use crate::outputs::PoseOutputs;
use crate::pool::{ActorPool, Slot};
use crate::sink::{apply_outputs, ApplyPose};
use crate::table::ClipTable;

use rayon::prelude::*;

/// Batched pose-animation engine, generic over the caller's opaque per-part
/// handle type.
#[derive(Debug)]
pub struct PoseEngine<H> {
    cfg: PoseConfig,
    table: ClipTable,
    pool: ActorPool<H>,
    buckets: Buckets,
    outputs: PoseOutputs,
    workers: Option<rayon::ThreadPool>,
}

fn build_worker_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, EngineError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EngineError::WorkerPool(e.to_string()))
}

impl<H> PoseEngine<H> {
    /// Construct the engine, building the packed clip table from authored
    /// clips. Malformed clips degrade to inert entries and never fail this.
    pub fn new(cfg: PoseConfig, clips: &[ClipData]) -> Result<Self, EngineError> {
        cfg.validate()?;
        let workers = if cfg.parallel {
            Some(build_worker_pool(cfg.threads)?)
        } else {
            None
        };
        Ok(Self {
            table: ClipTable::build(&cfg, clips),
            pool: ActorPool::new(&cfg),
            buckets: Buckets::new(&cfg),
            outputs: PoseOutputs::new(&cfg),
            workers,
            cfg,
        })
    }

    /// Advance one frame: bucketize the visible actors, evaluate every bucket
    /// (in parallel when a worker pool is configured), join, then apply the
    /// outputs to the caller's handles.
    pub fn update(&mut self, dt: f32, applier: &mut dyn ApplyPose<H>) {
        self.buckets.rebuild(&self.pool);
        self.evaluate(dt);
        apply_outputs(&self.pool, &self.outputs, applier);
    }

    fn evaluate(&mut self, dt: f32) {
        let writes = DisjointWrites::new(&mut self.pool.time, &mut self.outputs);
        let ctx = EvalFrame {
            table: &self.table,
            speed: &self.pool.speed,
            playing: &self.pool.playing,
            part_count: self.cfg.part_count,
            dt,
        };
        let buckets = self.buckets.as_slices();

        match &self.workers {
            // One task per bucket; output ranges are disjoint across buckets,
            // and the fan-out joins before this returns.
            Some(pool) => pool.install(|| {
                buckets
                    .par_iter()
                    .enumerate()
                    .for_each(|(clip, bucket)| eval_bucket(clip, bucket, &ctx, &writes));
            }),
            None => {
                for (clip, bucket) in buckets.iter().enumerate() {
                    eval_bucket(clip, bucket, &ctx, &writes);
                }
            }
        }
    }

    // ---- Registration API -------------------------------------------------

    /// Register an actor owning exactly `part_count` handles.
    pub fn register(&mut self, handles: Vec<H>) -> Result<Slot, RegisterError> {
        self.pool.register(handles)
    }

    /// Release an actor's slot. Idempotent.
    pub fn unregister(&mut self, slot: Slot) {
        self.pool.unregister(slot);
    }

    pub fn set_clip(&mut self, slot: Slot, clip_id: usize, reset_time: bool) {
        self.pool.set_clip(slot, clip_id, reset_time);
    }

    pub fn set_speed(&mut self, slot: Slot, speed: f32) {
        self.pool.set_speed(slot, speed);
    }

    pub fn set_visible(&mut self, slot: Slot, visible: bool) {
        self.pool.set_visible(slot, visible);
    }

    pub fn play(&mut self, slot: Slot) {
        self.pool.play(slot);
    }

    pub fn stop(&mut self, slot: Slot) {
        self.pool.stop(slot);
    }

    // ---- Diagnostics ------------------------------------------------------

    /// Actors that were active and visible at the last update.
    pub fn active_count(&self) -> usize {
        self.buckets.active_count()
    }

    /// Actors bucketed for `clip_id` at the last update.
    pub fn bucket_count(&self, clip_id: usize) -> usize {
        self.buckets.clip_count(clip_id)
    }

    // ---- Read-only component access ---------------------------------------

    pub fn config(&self) -> &PoseConfig {
        &self.cfg
    }

    pub fn clips(&self) -> &ClipTable {
        &self.table
    }

    pub fn pool(&self) -> &ActorPool<H> {
        &self.pool
    }

    pub fn outputs(&self) -> &PoseOutputs {
        &self.outputs
    }
}
