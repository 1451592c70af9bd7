use super::types::{FingerprintSet, TimeGap};
use crate::subtitles::CaptionEntry;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

// Field order is the ranking: delta first, then arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankedGap {
    delta_ms: i64,
    seq: u64,
    at_ms: u64,
}

/// Keeps the `capacity` largest gaps seen so far.
///
/// Backed by a min-heap so the smallest retained gap is evicted in
/// O(log K) when a larger one arrives. Among equal deltas the gap that
/// arrived first ranks lowest.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    capacity: usize,
    heap: BinaryHeap<Reverse<RankedGap>>,
    seq: u64,
}

impl GapBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            seq: 0,
        }
    }

    pub fn push(&mut self, gap: TimeGap) {
        let ranked = RankedGap {
            delta_ms: gap.delta_ms,
            seq: self.seq,
            at_ms: gap.at_ms,
        };
        self.seq += 1;

        self.heap.push(Reverse(ranked));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Retained gaps, largest delta first
    pub fn gaps(&self) -> Vec<TimeGap> {
        let mut ranked: Vec<RankedGap> = self.heap.iter().map(|r| r.0).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked
            .into_iter()
            .map(|r| TimeGap {
                delta_ms: r.delta_ms,
                at_ms: r.at_ms,
            })
            .collect()
    }

    /// Landmark times of the retained gaps, in chronological order
    pub fn into_fingerprint(self) -> FingerprintSet {
        FingerprintSet::new(self.heap.into_iter().map(|r| r.0.at_ms).collect())
    }
}

/// Streams caption start times in file order into a [`GapBuffer`]
#[derive(Debug, Clone)]
pub struct GapExtractor {
    buffer: GapBuffer,
    last_start: Option<u64>,
}

impl GapExtractor {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: GapBuffer::new(capacity),
            last_start: None,
        }
    }

    pub fn observe(&mut self, start_ms: u64) {
        if let Some(prev) = self.last_start {
            self.buffer.push(TimeGap {
                delta_ms: start_ms as i64 - prev as i64,
                at_ms: start_ms,
            });
        }
        self.last_start = Some(start_ms);
    }

    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    pub fn finish(self) -> FingerprintSet {
        self.buffer.into_fingerprint()
    }
}

/// Fingerprint a sequence of start times given in file order
pub fn extract_fingerprint<I>(starts: I, capacity: usize) -> FingerprintSet
where
    I: IntoIterator<Item = u64>,
{
    let mut extractor = GapExtractor::new(capacity);
    for start in starts {
        extractor.observe(start);
    }
    extractor.finish()
}

/// Fingerprint a parsed track
pub fn fingerprint_entries(entries: &[CaptionEntry], capacity: usize) -> FingerprintSet {
    extract_fingerprint(entries.iter().map(|e| e.start_ms), capacity)
}
