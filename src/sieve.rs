use std::sync::atomic::{AtomicBool, Ordering};

/// Shared primality flags for every number in `[0, limit]`.
///
/// All workers write into this array concurrently without locking. That is
/// safe because the orchestrator hands each worker a segment of `[2, limit]`
/// and the segments never overlap, so no index is ever written by two
/// threads. The flags are atomics with relaxed ordering; the join barrier
/// before aggregation publishes every write to the reading thread.
pub struct SharedSieve {
    flags: Box<[AtomicBool]>,
}

impl SharedSieve {
    /// Allocate flags for `[0, limit]`. 0 and 1 start out composite,
    /// everything else starts out "believed prime".
    pub fn new(limit: usize) -> Self {
        let flags = (0..=limit)
            .map(|n| AtomicBool::new(n >= 2))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        SharedSieve { flags }
    }

    pub fn limit(&self) -> usize {
        self.flags.len() - 1
    }

    pub fn mark_composite(&self, n: usize) {
        self.flags[n].store(false, Ordering::Relaxed);
    }

    pub fn is_prime(&self, n: usize) -> bool {
        self.flags[n].load(Ordering::Relaxed)
    }

    /// Single-threaded scan collecting every surviving index in ascending
    /// order. Only valid after all workers have been joined.
    pub fn collect_primes(&self) -> Vec<usize> {
        (2..=self.limit()).filter(|&n| self.is_prime(n)).collect()
    }
}

/// Sequential sieve over `[2, ⌊√limit⌋]`, run to completion before any
/// segment task is created. Segment sieving needs the *full* list of primes
/// up to the root; a partial prefix would let composites survive.
pub fn small_primes(limit: usize) -> Vec<usize> {
    let bound = (limit as f64).sqrt() as usize;
    if bound < 2 {
        return Vec::new();
    }

    let mut is_prime = vec![true; bound + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    for i in 2..=((bound as f64).sqrt() as usize) {
        if is_prime[i] {
            let mut j = i * i;
            while j <= bound {
                is_prime[j] = false;
                j += i;
            }
        }
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(num, &prime)| if prime { Some(num) } else { None })
        .collect()
}
