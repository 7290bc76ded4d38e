use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::segment::Segment;

/// FIFO of pending segments plus the shutdown flag, behind one mutex with
/// one condvar. This is the only state in the program that needs mutual
/// exclusion; the sieve array itself is protected by segment disjointness.
pub struct SegmentQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

struct QueueState {
    pending: VecDeque<Segment>,
    finished: bool,
}

impl SegmentQueue {
    pub fn new() -> Self {
        SegmentQueue {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                finished: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Append a segment and wake one blocked consumer.
    pub fn push(&self, segment: Segment) {
        let mut state = self.state.lock().expect("segment queue mutex poisoned");
        state.pending.push_back(segment);
        self.available.notify_one();
    }

    /// Block until a segment is available or shutdown is signaled.
    ///
    /// Returns `None` only once the queue is drained *and* finished. The
    /// predicate is re-checked after every wake while still holding the
    /// lock, so neither a spurious wakeup nor a push racing with the
    /// empty-check can be missed: the lock is never released between
    /// checking and waiting except inside `Condvar::wait` itself.
    pub fn pop_or_wait(&self) -> Option<Segment> {
        let mut state = self.state.lock().expect("segment queue mutex poisoned");
        loop {
            if let Some(segment) = state.pending.pop_front() {
                return Some(segment);
            }
            if state.finished {
                return None;
            }
            state = self
                .available
                .wait(state)
                .expect("segment queue mutex poisoned");
        }
    }

    /// Mark the queue finished and wake *all* consumers. Broadcast, not a
    /// single notify: every idle worker has to observe shutdown, and one
    /// notify would strand the rest.
    pub fn signal_finished(&self) {
        let mut state = self.state.lock().expect("segment queue mutex poisoned");
        state.finished = true;
        self.available.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn seg(start: usize, end: usize) -> Segment {
        Segment { start, end }
    }

    #[test]
    fn pops_in_push_order() {
        let queue = SegmentQueue::new();
        queue.push(seg(2, 10));
        queue.push(seg(11, 20));
        queue.push(seg(21, 30));
        queue.signal_finished();

        assert_eq!(queue.pop_or_wait(), Some(seg(2, 10)));
        assert_eq!(queue.pop_or_wait(), Some(seg(11, 20)));
        assert_eq!(queue.pop_or_wait(), Some(seg(21, 30)));
        assert_eq!(queue.pop_or_wait(), None);
    }

    #[test]
    fn drains_remaining_segments_after_shutdown() {
        // Finished does not discard queued work; it only ends the wait once
        // the buffer is empty.
        let queue = SegmentQueue::new();
        queue.push(seg(2, 5));
        queue.signal_finished();
        assert_eq!(queue.pop_or_wait(), Some(seg(2, 5)));
        assert_eq!(queue.pop_or_wait(), None);
    }

    #[test]
    fn blocked_consumer_sees_a_late_push() {
        let queue = Arc::new(SegmentQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_or_wait())
        };

        // Give the consumer time to block before producing.
        thread::sleep(Duration::from_millis(50));
        queue.push(seg(2, 9));

        assert_eq!(consumer.join().unwrap(), Some(seg(2, 9)));
    }

    #[test]
    fn shutdown_wakes_every_blocked_consumer() {
        let queue = Arc::new(SegmentQueue::new());

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop_or_wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.signal_finished();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }
}
