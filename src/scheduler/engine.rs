//! Two-tier admission and dispatch engine.
//!
//! # Algorithm
//!
//! 1. **Admission**: a submission arriving after the deadline is rejected.
//!    Otherwise the clock observes its arrival and it joins the cost-ranked tier.
//! 2. **Aging sweep**: at the start of each dispatch cycle, every cost-ranked
//!    member that has waited longer than the starvation threshold is moved to
//!    the starvation lane, oldest arrival first.
//! 3. **Dispatch**: serve the starvation lane head if any, else the cheapest
//!    cost-ranked member, else report idle.
//!
//! Starvation-lane membership always dominates cost rank, and every member of
//! the cost-ranked tier is promoted once its wait exceeds the threshold, so no
//! submission is postponed indefinitely.
//!
//! # Complexity
//! Admission and dispatch are O(log n). A sweep is O((k + 1) log n) for k
//! promoted submissions.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::DispatchStats;
use crate::config::SchedulerConfig;
use crate::error::AdmissionError;
use crate::models::{ArrivalPolicy, LogicalClock, Submission, Tick};
use crate::queues::{CostRankedTier, StarvationLane};
use crate::validation::validate_submission;

/// Which tier a submission was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Aged submissions, FIFO.
    Starvation,
    /// Shortest-job-first.
    CostRanked,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Starvation => write!(f, "Starvation Lane"),
            Lane::CostRanked => write!(f, "Shortest Job"),
        }
    }
}

/// A successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// Admitted submission ID.
    pub id: String,
    /// Clock value after admission.
    pub clock: Tick,
}

/// A dispatched submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub submission: Submission,
    pub lane: Lane,
    /// `clock - arrival_time` at dispatch.
    pub waited: Tick,
}

/// Outcome of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Dispatched(Dispatch),
    /// Both tiers were empty.
    Idle,
}

impl DispatchResult {
    /// Dispatched submission ID, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            DispatchResult::Dispatched(d) => Some(d.submission.id.as_str()),
            DispatchResult::Idle => None,
        }
    }

    /// Lane served, if any.
    pub fn lane(&self) -> Option<Lane> {
        match self {
            DispatchResult::Dispatched(d) => Some(d.lane),
            DispatchResult::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DispatchResult::Idle)
    }
}

/// Read-only snapshot of scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub clock: Tick,
    pub starvation_len: usize,
    pub cost_ranked_len: usize,
    pub deadline: Option<Tick>,
}

/// Shortest-job-first scheduler with aging into a FIFO starvation lane.
///
/// Owns the clock, the deadline and both tiers. Every operation runs to
/// completion; wrap the whole instance in a single lock if it must be
/// shared across threads.
///
/// # Example
///
/// ```
/// use u_dispatch::scheduler::{Lane, TwoTierScheduler};
///
/// let mut scheduler = TwoTierScheduler::default();
/// scheduler.submit("X", 10, 0).unwrap();
/// scheduler.submit("Y", 1, 10).unwrap();
/// scheduler.submit("Z", 1, 310).unwrap();
///
/// // X has waited 310 > 300 and jumps the queue despite its cost.
/// let first = scheduler.process_cycle();
/// assert_eq!(first.id(), Some("X"));
/// assert_eq!(first.lane(), Some(Lane::Starvation));
/// ```
#[derive(Debug, Clone)]
pub struct TwoTierScheduler {
    clock: LogicalClock,
    deadline: Option<Tick>,
    starvation_threshold: Tick,
    arrival_policy: ArrivalPolicy,
    cost_ranked: CostRankedTier,
    starvation: StarvationLane,
    stats: DispatchStats,
}

impl TwoTierScheduler {
    /// Creates a scheduler from a configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            clock: LogicalClock::new(),
            deadline: config.deadline,
            starvation_threshold: config.starvation_threshold.max(0),
            arrival_policy: config.arrival_policy,
            cost_ranked: CostRankedTier::new(),
            starvation: StarvationLane::new(),
            stats: DispatchStats::default(),
        }
    }

    /// Sets the deadline. Returns the new value.
    pub fn set_deadline(&mut self, deadline: Tick) -> Tick {
        info!(deadline, "Deadline set");
        self.deadline = Some(deadline);
        deadline
    }

    /// Removes the deadline.
    pub fn clear_deadline(&mut self) {
        info!("Deadline cleared");
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Tick> {
        self.deadline
    }

    pub fn starvation_threshold(&self) -> Tick {
        self.starvation_threshold
    }

    pub fn arrival_policy(&self) -> ArrivalPolicy {
        self.arrival_policy
    }

    /// Current logical time.
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Admits a submission built from its parts.
    pub fn submit(
        &mut self,
        id: impl Into<String>,
        estimated_cost: u64,
        arrival_time: Tick,
    ) -> Result<Accepted, AdmissionError> {
        self.admit(
            Submission::new(id)
                .with_cost(estimated_cost)
                .arriving_at(arrival_time),
        )
    }

    /// Admission gate.
    ///
    /// On success the clock observes the arrival and the submission joins
    /// the cost-ranked tier. On rejection nothing changes.
    pub fn admit(&mut self, submission: Submission) -> Result<Accepted, AdmissionError> {
        if let Err(errors) = validate_submission(&submission) {
            self.stats.rejected_invalid += 1;
            warn!(id = %submission.id, "Rejected invalid submission");
            return Err(AdmissionError::Invalid(errors));
        }

        let arrival = submission.arrival_time;
        if let Some(deadline) = self.deadline {
            if arrival > deadline {
                self.stats.rejected_past_deadline += 1;
                warn!(id = %submission.id, arrival, deadline, "Rejected past deadline");
                return Err(AdmissionError::PastDeadline { arrival, deadline });
            }
        }

        if self.arrival_policy == ArrivalPolicy::Reject && self.clock.precedes(arrival) {
            let clock = self.clock.now();
            self.stats.rejected_out_of_order += 1;
            warn!(id = %submission.id, arrival, clock, "Rejected out-of-order arrival");
            return Err(AdmissionError::OutOfOrder { arrival, clock });
        }

        let clock = self.clock.observe_arrival(arrival, self.arrival_policy);
        let id = submission.id.clone();
        debug!(
            id = %id,
            cost = submission.estimated_cost,
            arrival,
            clock,
            "Submission accepted"
        );
        self.cost_ranked.insert(submission);
        self.stats.accepted += 1;

        Ok(Accepted { id, clock })
    }

    /// Advances the clock by `delta` without admitting anything.
    pub fn tick(&mut self, delta: u64) -> Tick {
        let now = self.clock.advance(delta);
        debug!(delta, now, "Clock ticked");
        now
    }

    /// Aging sweep.
    ///
    /// Moves every cost-ranked submission with `clock - arrival > threshold`
    /// to the back of the starvation lane, in ascending arrival order (ties
    /// by ID). Returns the number promoted. Running it twice without an
    /// intervening clock change promotes nothing the second time.
    pub fn sweep(&mut self) -> usize {
        let promoted = self
            .cost_ranked
            .drain_waited_longer_than(self.clock.now(), self.starvation_threshold);
        let count = promoted.len();

        if count > 0 {
            debug!(
                count,
                clock = self.clock.now(),
                threshold = self.starvation_threshold,
                "Promoted to starvation lane"
            );
            self.stats.promoted += count as u64;
            self.starvation.extend(promoted);
        }
        count
    }

    /// Runs one dispatch cycle: sweep, then serve the starvation lane,
    /// then the cost-ranked tier.
    pub fn process_cycle(&mut self) -> DispatchResult {
        self.sweep();

        let (submission, lane) = if let Some(s) = self.starvation.pop_front() {
            (s, Lane::Starvation)
        } else if let Some(s) = self.cost_ranked.pop_min() {
            (s, Lane::CostRanked)
        } else {
            self.stats.idle_cycles += 1;
            debug!("Dispatch cycle idle");
            return DispatchResult::Idle;
        };

        let waited = submission.wait_at(self.clock.now());
        debug!(id = %submission.id, %lane, waited, "Dispatched");
        self.stats.record_dispatch(lane, waited);

        DispatchResult::Dispatched(Dispatch {
            submission,
            lane,
            waited,
        })
    }

    /// Runs dispatch cycles until both tiers are empty.
    pub fn drain(&mut self) -> Vec<Dispatch> {
        let mut dispatched = Vec::with_capacity(self.pending());
        while let DispatchResult::Dispatched(d) = self.process_cycle() {
            dispatched.push(d);
        }
        dispatched
    }

    /// Clock, tier sizes and deadline.
    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            clock: self.clock.now(),
            starvation_len: self.starvation.len(),
            cost_ranked_len: self.cost_ranked.len(),
            deadline: self.deadline,
        }
    }

    /// Submissions waiting in either tier.
    pub fn pending(&self) -> usize {
        self.starvation.len() + self.cost_ranked.len()
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    pub fn cost_ranked(&self) -> &CostRankedTier {
        &self.cost_ranked
    }

    pub fn starvation_lane(&self) -> &StarvationLane {
        &self.starvation
    }
}

impl Default for TwoTierScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
