//! Diagnostic history of applied transitions.
//!
//! The machine keeps an immutable log of every transition it applies,
//! recorded by state label so the log is serialisable without dragging
//! the user's identifier type along.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// Records carry the labels of the source and target leaf states and the
/// wall-clock instant the transition was applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Label of the leaf state the machine transitioned from
    pub from: String,
    /// Label of the leaf state the machine transitioned to
    pub to: String,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Create a record stamped with the current time.
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of applied transitions.
///
/// History is immutable - [`record`](TransitionHistory::record) returns a
/// new history with the record appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use arbor::core::{TransitionHistory, TransitionRecord};
///
/// let history = TransitionHistory::new();
/// let history = history.record(TransitionRecord::new("ShowTime", "SetTime"));
/// let history = history.record(TransitionRecord::new("SetTime", "ShowTime"));
///
/// assert_eq!(history.path(), ["ShowTime", "SetTime", "ShowTime"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
}

impl TransitionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// The sequence of leaf-state labels traversed: the source of the
    /// first record, then the target of each record in order.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records in application order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::new();
        assert_eq!(history.records().len(), 0);
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = TransitionHistory::new();
        let new_history = history.record(TransitionRecord::new("A", "B"));

        assert_eq!(history.records().len(), 0);
        assert_eq!(new_history.records().len(), 1);
    }

    #[test]
    fn path_returns_label_sequence() {
        let history = TransitionHistory::new()
            .record(TransitionRecord::new("A", "B"))
            .record(TransitionRecord::new("B", "C"));

        assert_eq!(history.path(), ["A", "B", "C"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = TransitionHistory::new().record(TransitionRecord::new("A", "B"));
        std::thread::sleep(Duration::from_millis(10));
        let history = history.record(TransitionRecord::new("B", "C"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let history = TransitionHistory::new().record(TransitionRecord::new("A", "B"));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = TransitionHistory::new()
            .record(TransitionRecord::new("A", "B"))
            .record(TransitionRecord::new("B", "A"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.records(), deserialized.records());
    }
}
