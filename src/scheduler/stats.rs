//! Dispatch statistics.
//!
//! Running counters kept by the scheduler as it admits, ages and
//! dispatches work.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Accepted | Submissions admitted |
//! | Rejected | Submissions refused, by reason |
//! | Promoted | Submissions moved to the starvation lane by aging |
//! | Dispatched | Submissions served, by lane |
//! | Idle cycles | Dispatch cycles that found no work |
//! | Avg / max wait | `clock - arrival` at dispatch |

use serde::{Deserialize, Serialize};

use super::Lane;
use crate::models::Tick;

/// Cumulative scheduler statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub accepted: u64,
    pub rejected_past_deadline: u64,
    pub rejected_out_of_order: u64,
    pub rejected_invalid: u64,
    pub promoted: u64,
    pub dispatched_starvation: u64,
    pub dispatched_cost_ranked: u64,
    pub idle_cycles: u64,
    /// Sum of waits at dispatch.
    pub total_wait: i128,
    /// Largest wait at dispatch.
    pub max_wait: Tick,
}

impl DispatchStats {
    pub(crate) fn record_dispatch(&mut self, lane: Lane, waited: Tick) {
        match lane {
            Lane::Starvation => self.dispatched_starvation += 1,
            Lane::CostRanked => self.dispatched_cost_ranked += 1,
        }
        self.total_wait += i128::from(waited);
        self.max_wait = self.max_wait.max(waited);
    }

    /// Total rejections across all reasons.
    pub fn rejected(&self) -> u64 {
        self.rejected_past_deadline + self.rejected_out_of_order + self.rejected_invalid
    }

    /// Total dispatches across both lanes.
    pub fn dispatched(&self) -> u64 {
        self.dispatched_starvation + self.dispatched_cost_ranked
    }

    /// Mean wait at dispatch, `None` before the first dispatch.
    pub fn average_wait(&self) -> Option<f64> {
        match self.dispatched() {
            0 => None,
            n => Some(self.total_wait as f64 / n as f64),
        }
    }

    /// Fraction of dispatches served from the starvation lane.
    pub fn starvation_share(&self) -> Option<f64> {
        match self.dispatched() {
            0 => None,
            n => Some(self.dispatched_starvation as f64 / n as f64),
        }
    }
}
