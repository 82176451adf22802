//! Rolling buffer of raw telemetry lines.
//!
//! Holds the most recent lines the interceptor has seen, oldest first. The
//! capacity bound is what keeps a long session from growing without limit
//! and is the same constant the chart documents as "last ~100 events".

use std::collections::VecDeque;

use crate::TELEMETRY_CAPACITY;

/// Fixed-capacity FIFO of raw log lines.
///
/// Lines are stored unparsed; extraction happens later, per frame, over a
/// snapshot. Length never exceeds the capacity - appending at the bound
/// evicts exactly the oldest line and never reorders the survivors.
#[derive(Debug)]
pub struct TelemetryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl TelemetryBuffer {
    /// Create a buffer holding at most `capacity` lines (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one raw line, evicting the oldest at capacity.
    pub fn append(&mut self, line: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    /// Owned copy of the current contents, oldest first.
    ///
    /// A copy rather than a live view, so iterating it can never observe a
    /// concurrent append.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::with_capacity(TELEMETRY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_below_capacity() {
        let mut buffer = TelemetryBuffer::with_capacity(4);
        buffer.append("a".into());
        buffer.append("b".into());
        buffer.append("c".into());
        assert_eq!(buffer.snapshot(), vec!["a", "b", "c"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest() {
        let mut buffer = TelemetryBuffer::with_capacity(3);
        for line in ["a", "b", "c", "d", "e"] {
            buffer.append(line.into());
        }
        assert_eq!(buffer.snapshot(), vec!["c", "d", "e"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn appending_capacity_plus_k_keeps_last_capacity_entries() {
        let mut buffer = TelemetryBuffer::default();
        for i in 1..=150 {
            buffer.append(format!("line {i}"));
        }
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), TELEMETRY_CAPACITY);
        assert_eq!(snapshot.first().map(String::as_str), Some("line 51"));
        assert_eq!(snapshot.last().map(String::as_str), Some("line 150"));
    }

    #[test]
    fn snapshot_is_independent_of_later_appends() {
        let mut buffer = TelemetryBuffer::with_capacity(2);
        buffer.append("a".into());
        let snapshot = buffer.snapshot();
        buffer.append("b".into());
        buffer.append("c".into());
        assert_eq!(snapshot, vec!["a"]);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut buffer = TelemetryBuffer::with_capacity(0);
        buffer.append("a".into());
        buffer.append("b".into());
        assert_eq!(buffer.snapshot(), vec!["b"]);
    }
}
