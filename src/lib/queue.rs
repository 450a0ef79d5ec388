//! Bounded, blocking work queue with an end-of-input signal.
//!
//! [`WorkQueue`] carries records from the feeder to the worker pool. A single
//! `parking_lot::Mutex` guards the buffer and the closed flag, and two condition variables
//! couple the two sides:
//!
//! - `not_full`: producers wait here while the queue is at capacity; signaled by [`WorkQueue::take`].
//! - `not_empty`: consumers wait here while the queue is empty and open; signaled by
//!   [`WorkQueue::put`] and broadcast by [`WorkQueue::close`].
//!
//! Every waiter re-checks its condition after waking, so spurious wake-ups are harmless. Blocking
//! in `put` is the backpressure that keeps the feeder at the pace of the workers.
//!
//! Removal order is LIFO. Nothing downstream depends on intake order.
//!
//! # Example
//!
//! ```
//! use rankdigest_lib::queue::{Take, WorkQueue};
//!
//! let queue = WorkQueue::new(2);
//! queue.put(1);
//! queue.put(2);
//! queue.close();
//!
//! assert_eq!(queue.take(), Take::Item(2));
//! assert_eq!(queue.take(), Take::Item(1));
//! assert_eq!(queue.take(), Take::EndOfInput);
//! ```

use parking_lot::{Condvar, Mutex};

/// Outcome of [`WorkQueue::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Take<T> {
    /// An item removed from the queue.
    Item(T),
    /// The queue is empty and closed; no more items will arrive.
    EndOfInput,
}

/// Wait and occupancy counters for one queue, recorded under the queue lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Largest number of items held at once.
    pub peak_len: usize,
    /// Number of `put` calls that found the queue full and had to wait.
    pub producer_waits: u64,
    /// Number of `take` calls that found the queue empty and open and had to wait.
    pub consumer_waits: u64,
}

struct State<T> {
    items: Vec<T>,
    closed: bool,
    stats: QueueStats,
}

/// A bounded multi-producer/multi-consumer queue.
///
/// Share it by reference (e.g. with scoped threads) or inside an `Arc`.
pub struct WorkQueue<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> WorkQueue<T> {
    /// Creates an open queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, since no `put` could ever complete.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "WorkQueue capacity must be > 0");
        Self {
            capacity,
            state: Mutex::new(State {
                items: Vec::with_capacity(capacity),
                closed: false,
                stats: QueueStats::default(),
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Appends `item`, blocking while the queue is full, then wakes one waiting consumer.
    ///
    /// # Panics
    ///
    /// Panics if the queue has been closed. Only the feeder closes the queue, and only after its
    /// last `put`, so this indicates a broken shutdown protocol.
    pub fn put(&self, item: T) {
        let mut state = self.state.lock();
        assert!(!state.closed, "put() called on a closed WorkQueue");

        if state.items.len() >= self.capacity {
            state.stats.producer_waits += 1;
            while state.items.len() >= self.capacity {
                self.not_full.wait(&mut state);
                assert!(!state.closed, "WorkQueue closed while a producer was waiting");
            }
        }

        state.items.push(item);
        state.stats.peak_len = state.stats.peak_len.max(state.items.len());
        drop(state);

        self.not_empty.notify_one();
    }

    /// Removes an item, blocking while the queue is empty and still open.
    ///
    /// Returns [`Take::EndOfInput`] without blocking once the queue is empty and closed.
    /// Removing an item wakes one waiting producer.
    pub fn take(&self) -> Take<T> {
        let mut state = self.state.lock();
        let mut counted_wait = false;

        loop {
            if let Some(item) = state.items.pop() {
                drop(state);
                self.not_full.notify_one();
                return Take::Item(item);
            }
            if state.closed {
                return Take::EndOfInput;
            }
            if !counted_wait {
                state.stats.consumer_waits += 1;
                counted_wait = true;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Marks the end of input and wakes every waiting consumer.
    ///
    /// Items already queued are still handed out; once they are gone every `take` returns
    /// [`Take::EndOfInput`].
    ///
    /// # Panics
    ///
    /// Panics if the queue is already closed.
    pub fn close(&self) {
        let mut state = self.state.lock();
        assert!(!state.closed, "close() called twice on a WorkQueue");
        state.closed = true;
        drop(state);

        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Maximum number of items held at once.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// True if no items are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once [`WorkQueue::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Copy of the wait and occupancy counters.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        self.state.lock().stats
    }
}
