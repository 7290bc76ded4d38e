use crate::sieve::SharedSieve;

/// One contiguous sub-range of `[2, limit]`, inclusive on both ends.
/// Created by the orchestrator, consumed by exactly one worker, never
/// mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

/// Tile `[2, limit]` into contiguous, non-overlapping segments.
///
/// Chunk size is max(⌈limit/workers⌉, ⌊√limit⌋ + 1). The root floor is a
/// performance heuristic against degenerate tiny segments near the root
/// region; correctness only needs the tiling itself. The tiling invariant
/// (no overlap, no gap) is what lets workers write the shared sieve without
/// locks, so it is asserted here rather than trusted.
pub fn partition(limit: usize, workers: usize) -> Vec<Segment> {
    let sqrt_limit = (limit as f64).sqrt() as usize;
    let chunk = limit.div_ceil(workers).max(sqrt_limit + 1);

    let mut segments = Vec::new();
    let mut start = 2;
    while start <= limit {
        let end = (start + chunk - 1).min(limit);
        segments.push(Segment { start, end });
        start = end + 1;
    }

    debug_assert!(segments.first().is_some_and(|s| s.start == 2));
    debug_assert!(segments.last().is_some_and(|s| s.end == limit));
    debug_assert!(
        segments.windows(2).all(|w| w[0].end + 1 == w[1].start),
        "segments must tile [2, limit] with no overlap and no gap"
    );

    segments
}

/// Mark every composite inside `segment` using the precomputed small primes.
///
/// For each prime p in ascending order: stop once p² exceeds the segment end
/// (any unmarked composite in range has a factor ≤ √end), and start marking
/// at max(p², ⌈start/p⌉·p). The p² floor skips multiples a smaller prime
/// already owns and keeps p itself unmarked; the ceiling term confines all
/// writes to `[start, end]`.
pub fn mark_composites(segment: Segment, sieve: &SharedSieve, small_primes: &[usize]) {
    for &p in small_primes {
        if p * p > segment.end {
            break;
        }

        let first_in_range = segment.start.div_ceil(p) * p;
        let mut multiple = first_in_range.max(p * p);
        while multiple <= segment.end {
            sieve.mark_composite(multiple);
            multiple += p;
        }
    }
}
