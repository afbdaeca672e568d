//! Execution context shared by every pipeline stage.
//!
//! The rayon pool and the stats sink are owned here and passed explicitly
//! into each stage, with lifecycle owned by the top-level orchestrator.

use crate::stats::{StageReporter, TracingReporter};
use anyhow::{Context, Result};
use rayon::ThreadPool;
use std::sync::Arc;

pub struct EtlContext {
    pool: ThreadPool,
    reporter: Arc<dyn StageReporter>,
}

impl EtlContext {
    /// Build a context with `threads` workers (0 means the rayon default)
    /// and the given stats sink.
    pub fn new(threads: usize, reporter: Arc<dyn StageReporter>) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker thread pool")?;
        Ok(Self { pool, reporter })
    }

    /// Context with default thread count and tracing-backed reporting.
    pub fn with_defaults() -> Result<Self> {
        Self::new(0, Arc::new(TracingReporter))
    }

    /// Run a closure inside the worker pool so `par_iter` uses it.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    pub fn reporter(&self) -> &dyn StageReporter {
        self.reporter.as_ref()
    }
}
