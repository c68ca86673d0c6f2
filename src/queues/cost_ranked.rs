//! Cost-ranked tier (shortest-job-first).
//!
//! Pending submissions are ordered by `(estimated_cost, arrival_time)`
//! ascending, with the admission sequence number as the final tie-breaker
//! so that equal submissions are still totally ordered.
//!
//! # Secondary index
//!
//! Aging needs every member whose arrival is older than a cutoff. A second
//! ordered index keyed by `(arrival_time, id, seq)` turns that into a range
//! split instead of a full scan, and yields the promoted set already in
//! arrival order with ties broken by identifier.
//!
//! # Complexity
//! Insert, extract-min and per-item promotion are O(log n).

use std::collections::BTreeMap;

use crate::models::{Submission, Tick};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    cost: u64,
    arrival: Tick,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct AgeKey {
    arrival: Tick,
    id: String,
    seq: u64,
}

impl AgeKey {
    /// Smallest possible key for the given arrival time.
    fn lower_bound(arrival: Tick) -> Self {
        Self {
            arrival,
            id: String::new(),
            seq: 0,
        }
    }
}

/// Priority structure for pending submissions, cheapest first.
#[derive(Debug, Clone, Default)]
pub struct CostRankedTier {
    by_cost: BTreeMap<RankKey, Submission>,
    by_arrival: BTreeMap<AgeKey, RankKey>,
    next_seq: u64,
}

impl CostRankedTier {
    /// Creates an empty tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a submission.
    pub fn insert(&mut self, submission: Submission) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let rank = RankKey {
            cost: submission.estimated_cost,
            arrival: submission.arrival_time,
            seq,
        };
        let age = AgeKey {
            arrival: submission.arrival_time,
            id: submission.id.clone(),
            seq,
        };
        self.by_arrival.insert(age, rank.clone());
        self.by_cost.insert(rank, submission);
    }

    /// The cheapest submission, earliest arrival on ties.
    pub fn peek_min(&self) -> Option<&Submission> {
        self.by_cost.values().next()
    }

    /// Removes and returns the cheapest submission.
    pub fn pop_min(&mut self) -> Option<Submission> {
        let (rank, submission) = self.by_cost.pop_first()?;
        let removed = self.by_arrival.remove(&AgeKey {
            arrival: submission.arrival_time,
            id: submission.id.clone(),
            seq: rank.seq,
        });
        debug_assert!(removed.is_some(), "arrival index out of sync for {}", submission.id);
        Some(submission)
    }

    /// Removes every submission that arrived strictly before `cutoff`.
    ///
    /// Returned in ascending arrival order, ties broken by identifier and
    /// then admission order.
    pub fn drain_arrived_before(&mut self, cutoff: Tick) -> Vec<Submission> {
        let kept = self.by_arrival.split_off(&AgeKey::lower_bound(cutoff));
        let expired = std::mem::replace(&mut self.by_arrival, kept);

        expired
            .into_values()
            .filter_map(|rank| self.by_cost.remove(&rank))
            .collect()
    }

    /// Removes every submission that has waited more than `threshold`
    /// when the clock reads `now`.
    pub fn drain_waited_longer_than(&mut self, now: Tick, threshold: Tick) -> Vec<Submission> {
        // wait > threshold  <=>  arrival < now - threshold
        match now.checked_sub(threshold) {
            Some(cutoff) => self.drain_arrived_before(cutoff),
            None => Vec::new(),
        }
    }

    /// All members in dispatch order (cheapest first).
    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.by_cost.values()
    }

    /// All members in arrival order.
    pub fn iter_by_arrival(&self) -> impl Iterator<Item = &Submission> {
        self.by_arrival
            .values()
            .filter_map(|rank| self.by_cost.get(rank))
    }

    /// Oldest arrival time among members.
    pub fn oldest_arrival(&self) -> Option<Tick> {
        self.by_arrival.keys().next().map(|k| k.arrival)
    }

    /// Number of pending submissions.
    pub fn len(&self) -> usize {
        self.by_cost.len()
    }

    /// Whether the tier is empty.
    pub fn is_empty(&self) -> bool {
        self.by_cost.is_empty()
    }
}
