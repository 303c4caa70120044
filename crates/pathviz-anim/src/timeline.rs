//! Time-ordered queue of pending playback events.
//!
//! Entries are stored in a min-heap keyed by `(offset, insertion_order)`.
//! Earlier offsets are popped first; ties are broken by insertion order
//! (FIFO), so events scheduled for the same instant fire in the order they
//! were pushed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Entry<E> {
    event: E,
    at: Duration,
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.at.cmp(&other.at).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Events keyed by their offset from the start of a run.
#[derive(Debug)]
pub struct Timeline<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `event` at offset `at`.
    pub fn push(&mut self, event: E, at: Duration) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { event, at, seq }));
    }

    /// Offset of the earliest pending event.
    pub fn peek_offset(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(e)| e.at)
    }

    /// Pop the earliest event if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<E> {
        if self.peek_offset()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| e.event)
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}
