//! Submission model.
//!
//! A submission is a unit of work waiting to be dispatched, e.g. an exam
//! paper waiting to be graded. It is immutable once admitted; only its
//! tier membership changes until it is dispatched.

use serde::{Deserialize, Serialize};

use super::Tick;

/// A unit of work with an identity, an estimated cost and an arrival time.
///
/// # Time Representation
/// `arrival_time` is a logical timestamp on the scheduler's clock, not wall time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Submission {
    /// Submitter / job identifier.
    pub id: String,
    /// Estimated processing cost (e.g. grading time). Lower is dispatched first.
    pub estimated_cost: u64,
    /// Logical arrival time.
    pub arrival_time: Tick,
}

impl Submission {
    /// Creates a submission with zero cost arriving at t=0.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            estimated_cost: 0,
            arrival_time: 0,
        }
    }

    /// Sets the estimated cost.
    pub fn with_cost(mut self, estimated_cost: u64) -> Self {
        self.estimated_cost = estimated_cost;
        self
    }

    /// Sets the arrival time.
    pub fn arriving_at(mut self, arrival_time: Tick) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Time this submission has waited when the clock reads `now`.
    pub fn wait_at(&self, now: Tick) -> Tick {
        now.saturating_sub(self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_builder() {
        let s = Submission::new("S1").with_cost(5).arriving_at(50);
        assert_eq!(s.id, "S1");
        assert_eq!(s.estimated_cost, 5);
        assert_eq!(s.arrival_time, 50);
    }

    #[test]
    fn test_submission_defaults() {
        let s = Submission::new("empty");
        assert_eq!(s.estimated_cost, 0);
        assert_eq!(s.arrival_time, 0);
    }

    #[test]
    fn test_wait_at() {
        let s = Submission::new("X").arriving_at(10);
        assert_eq!(s.wait_at(310), 300);
        assert_eq!(s.wait_at(10), 0);
    }

    #[test]
    fn test_submission_serde() {
        let s = Submission::new("alice").with_cost(12).arriving_at(7);
        let json = serde_json::to_string(&s).unwrap();
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
