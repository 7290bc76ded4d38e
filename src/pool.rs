use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::queue::SegmentQueue;
use crate::segment;
use crate::sieve::SharedSieve;

/// Spawn `count` worker threads, all before any segment is produced.
/// Spawning may race with the first pushes; the queue is fully synchronized
/// so that is harmless.
///
/// If the OS refuses a thread mid-way, the already-spawned workers are shut
/// down and joined before the error is returned; there is no partial-result
/// salvage.
pub fn spawn_workers(
    count: usize,
    queue: &Arc<SegmentQueue>,
    sieve: &Arc<SharedSieve>,
    small_primes: &Arc<Vec<usize>>,
) -> io::Result<Vec<JoinHandle<usize>>> {
    let mut handles = Vec::with_capacity(count);

    for id in 0..count {
        let worker_queue = Arc::clone(queue);
        let sieve = Arc::clone(sieve);
        let small_primes = Arc::clone(small_primes);

        let spawned = thread::Builder::new()
            .name(format!("sieve-worker-{id}"))
            .spawn(move || worker_loop(&worker_queue, &sieve, &small_primes));

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                queue.signal_finished();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(e);
            }
        }
    }

    Ok(handles)
}

/// Pull segments until the queue reports shutdown. Returns the number of
/// segments this worker sieved.
fn worker_loop(queue: &SegmentQueue, sieve: &SharedSieve, small_primes: &[usize]) -> usize {
    let mut processed = 0;
    while let Some(seg) = queue.pop_or_wait() {
        segment::mark_composites(seg, sieve, small_primes);
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use crate::sieve::small_primes;

    #[test]
    fn idle_workers_exit_on_shutdown() {
        let queue = Arc::new(SegmentQueue::new());
        let sieve = Arc::new(SharedSieve::new(10));
        let primes = Arc::new(small_primes(10));

        let handles = spawn_workers(4, &queue, &sieve, &primes).unwrap();
        queue.signal_finished();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0);
        }
    }

    #[test]
    fn workers_between_them_process_every_segment() {
        let queue = Arc::new(SegmentQueue::new());
        let sieve = Arc::new(SharedSieve::new(100));
        let primes = Arc::new(small_primes(100));

        let handles = spawn_workers(3, &queue, &sieve, &primes).unwrap();

        let segments = [
            Segment { start: 2, end: 25 },
            Segment { start: 26, end: 50 },
            Segment { start: 51, end: 75 },
            Segment { start: 76, end: 100 },
        ];
        for seg in segments {
            queue.push(seg);
        }
        queue.signal_finished();

        let processed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(processed, segments.len());
        assert_eq!(sieve.collect_primes().len(), 25);
    }
}
