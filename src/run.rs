use std::fmt;
use std::io;
use std::sync::Arc;

use crate::pool;
use crate::queue::SegmentQueue;
use crate::segment;
use crate::sieve::{self, SharedSieve};

/// Fatal conditions for a run. There are no retries: this is a one-shot
/// batch computation, and any of these discards all in-progress work.
#[derive(Debug)]
pub enum RunError {
    /// `max_number` below 2 — there is nothing to sieve.
    InvalidLimit(usize),
    /// `thread_count` of zero — the pool would never drain the queue.
    InvalidWorkers(usize),
    /// The OS refused to spawn a worker thread.
    ThreadSpawn(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidLimit(n) => {
                write!(f, "max_number must be at least 2 (got {n})")
            }
            RunError::InvalidWorkers(n) => {
                write!(f, "thread_count must be at least 1 (got {n})")
            }
            RunError::ThreadSpawn(e) => write!(f, "cannot create worker thread: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcome of a completed run, read single-threaded after the join barrier.
pub struct RunReport {
    /// Every surviving prime in `[2, limit]`, ascending.
    pub primes: Vec<usize>,
    /// How many segments the range was split into.
    pub segments: usize,
}

/// Run the whole pipeline: validate, precompute small primes, spawn the
/// pool, produce segments, signal shutdown, join, aggregate.
///
/// The join in step four is the single synchronization barrier that makes
/// the final sieve scan safe without further locking. Completion order of
/// segments is arbitrary across workers; the result does not depend on it
/// because segments are disjoint.
pub fn run(limit: usize, workers: usize) -> Result<RunReport, RunError> {
    if limit < 2 {
        return Err(RunError::InvalidLimit(limit));
    }
    if workers < 1 {
        return Err(RunError::InvalidWorkers(workers));
    }

    // Fully precompute primes up to √limit before any segment exists.
    let small_primes = Arc::new(sieve::small_primes(limit));
    let shared_sieve = Arc::new(SharedSieve::new(limit));
    let queue = Arc::new(SegmentQueue::new());

    let handles = pool::spawn_workers(workers, &queue, &shared_sieve, &small_primes)
        .map_err(RunError::ThreadSpawn)?;

    let segments = segment::partition(limit, workers);
    for &seg in &segments {
        queue.push(seg);
    }
    queue.signal_finished();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    Ok(RunReport {
        primes: shared_sieve.collect_primes(),
        segments: segments.len(),
    })
}
