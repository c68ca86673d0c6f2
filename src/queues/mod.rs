//! The two dispatch tiers.
//!
//! - **`CostRankedTier`**: shortest-job-first ordering of pending work.
//! - **`StarvationLane`**: FIFO of work that aged out of the cost-ranked
//!   tier; always drained first.
//!
//! A submission is a member of at most one tier at a time.

mod cost_ranked;
mod starvation;

pub use cost_ranked::CostRankedTier;
pub use starvation::StarvationLane;
