//! Rolling history of completed presses.
//!
//! [`HistoryRing`] is a chronological log, not a cache: records are kept in completion order and
//! the oldest one is evicted once more than [`HISTORY_CAPACITY`] have been recorded.

use crate::button::SemanticButton;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of records kept.
pub const HISTORY_CAPACITY: usize = 10;

/// One completed hold. Created at release time and never modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryRecord {
    pub button: SemanticButton,
    pub started_at: Instant,
    pub duration: Duration,
}

/// Bounded, oldest-first sequence of [`HistoryRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct HistoryRing {
    entries: VecDeque<HistoryRecord>,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Append `record`, evicting the oldest entry when over capacity.
    ///
    /// Returns the evicted record, if any.
    pub fn record(&mut self, record: HistoryRecord) -> Option<HistoryRecord> {
        self.entries.push_back(record);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryRecord> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Most recent record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<HistoryRecord> {
        self.entries.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(base: Instant, i: u64) -> HistoryRecord {
        HistoryRecord {
            button: SemanticButton::A,
            started_at: base + Duration::from_millis(i * 100),
            duration: Duration::from_millis(i),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let base = Instant::now();
        let mut ring = HistoryRing::new();
        for i in 0..3 {
            assert_eq!(ring.record(rec(base, i)), None);
        }
        let durations: Vec<_> = ring.iter().map(|r| r.duration.as_millis()).collect();
        assert_eq!(durations, vec![0, 1, 2]);
        assert_eq!(ring.iter().next_back(), Some(&rec(base, 2)));
    }

    #[test]
    fn eleventh_record_evicts_the_oldest() {
        let base = Instant::now();
        let mut ring = HistoryRing::new();
        for i in 0..10 {
            ring.record(rec(base, i));
        }
        assert_eq!(ring.len(), HISTORY_CAPACITY);

        let evicted = ring.record(rec(base, 10));
        assert_eq!(evicted, Some(rec(base, 0)));
        assert_eq!(ring.len(), HISTORY_CAPACITY);
        assert_eq!(ring.iter().next(), Some(&rec(base, 1)));
        assert_eq!(ring.iter().next_back(), Some(&rec(base, 10)));
    }
}
