//! Parallel batch fitting.
//!
//! Resolutions are independent, but oracles are not required to be `Sync`,
//! so every rayon worker builds its own oracle through the supplied factory.
//! Results come back in input order.

use log::debug;
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;

use crate::oracle::MeasureOracle;
use crate::request::{FitRequest, FitResult};
use crate::resolver::resolve;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Resolve every request on the global rayon pool.
///
/// `make_oracle` may run more than once per worker thread; keep it cheap or
/// have it hand out clones of a shared, pre-loaded resource.
pub fn resolve_batch<O, F>(requests: &[FitRequest], make_oracle: F) -> Vec<FitResult>
where
    O: MeasureOracle,
    F: Fn() -> O + Sync + Send,
{
    let start = Instant::now();
    let results: Vec<FitResult> = requests
        .par_iter()
        .map_init(&make_oracle, |oracle, request| resolve(oracle, request))
        .collect();
    debug!(
        "resolve_batch: {} requests in {:.2}ms",
        requests.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    results
}

/// Batch resolver bound to a dedicated worker pool.
pub struct BatchResolver {
    pool: rayon::ThreadPool,
}

impl BatchResolver {
    /// Build a resolver with exactly `num_threads` workers.
    pub fn with_threads(num_threads: usize) -> Result<Self, BatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("autofit-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn resolve_all<O, F>(&self, requests: &[FitRequest], make_oracle: F) -> Vec<FitResult>
    where
        O: MeasureOracle,
        F: Fn() -> O + Sync + Send,
    {
        self.pool.install(|| resolve_batch(requests, make_oracle))
    }
}
