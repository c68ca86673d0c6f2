//! Admission and dispatch.
//!
//! `TwoTierScheduler` combines a deadline-gated admission step, a
//! shortest-job-first tier and an aging policy that promotes long-waiting
//! work into a FIFO starvation lane.
//!
//! # Stats
//!
//! `DispatchStats` keeps running counters: admissions, rejections,
//! promotions, per-lane dispatches and wait times.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3 (SJF, aging)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
mod stats;

pub use engine::{Accepted, Dispatch, DispatchResult, Lane, SchedulerStatus, TwoTierScheduler};
pub use stats::DispatchStats;
