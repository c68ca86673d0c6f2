//! Starvation lane.
//!
//! Strict FIFO of submissions promoted out of the cost-ranked tier.
//! Members are never re-ranked; they leave only by dispatch, in lane order.

use std::collections::VecDeque;

use crate::models::Submission;

/// FIFO queue of aged submissions.
#[derive(Debug, Clone, Default)]
pub struct StarvationLane {
    queue: VecDeque<Submission>,
}

impl StarvationLane {
    /// Creates an empty lane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends promoted submissions in the order given.
    pub fn extend(&mut self, promoted: impl IntoIterator<Item = Submission>) {
        self.queue.extend(promoted);
    }

    /// Removes the head of the lane.
    pub fn pop_front(&mut self) -> Option<Submission> {
        self.queue.pop_front()
    }

    /// Members in lane order.
    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut lane = StarvationLane::new();
        lane.extend(vec![Submission::new("X"), Submission::new("Y")]);
        lane.extend(vec![Submission::new("Z")]);

        assert_eq!(lane.len(), 3);
        assert_eq!(lane.pop_front().unwrap().id, "X");
        assert_eq!(lane.pop_front().unwrap().id, "Y");
        assert_eq!(lane.pop_front().unwrap().id, "Z");
        assert!(lane.pop_front().is_none());
        assert!(lane.is_empty());
    }

    #[test]
    fn test_later_batches_queue_behind() {
        let mut lane = StarvationLane::new();
        lane.extend(vec![Submission::new("old").arriving_at(50)]);
        // An older arrival promoted in a later sweep still waits its turn.
        lane.extend(vec![Submission::new("older").arriving_at(10)]);

        let order: Vec<_> = lane.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["old", "older"]);
    }
}
