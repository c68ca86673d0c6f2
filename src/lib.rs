//! Two-tier admission and dispatch scheduler.
//!
//! Incoming submissions are ranked by estimated cost (shortest-job-first).
//! An aging rule moves any submission that has waited past a threshold into
//! a strict FIFO starvation lane, which is always served before the
//! cost-ranked tier. Time is a logical clock driven by the event stream.
//!
//! # Modules
//!
//! - **`models`**: `Submission`, `LogicalClock`, `ArrivalPolicy`
//! - **`queues`**: `CostRankedTier`, `StarvationLane`
//! - **`scheduler`**: `TwoTierScheduler` (admission, aging sweep, dispatch), `DispatchStats`
//! - **`validation`**: Input integrity checks (empty/unsafe IDs, duplicates, arrival order)
//! - **`config`**: `SchedulerConfig` loaded from TOML
//! - **`command`**: Line-oriented console protocol
//! - **`workload`**: Seeded synthetic workloads and batch simulation
//!
//! # Example
//!
//! ```
//! use u_dispatch::config::SchedulerConfig;
//! use u_dispatch::scheduler::TwoTierScheduler;
//!
//! let mut scheduler = TwoTierScheduler::new(SchedulerConfig::new().with_deadline(100));
//! assert!(scheduler.submit("A", 5, 50).is_ok());
//! assert!(scheduler.submit("B", 3, 150).is_err());
//!
//! let status = scheduler.status();
//! assert_eq!(status.clock, 50);
//! assert_eq!(status.cost_ranked_len, 1);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod models;
pub mod queues;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::SchedulerConfig;
pub use error::{AdmissionError, CommandError, ConfigError};
pub use models::{ArrivalPolicy, Submission, Tick};
pub use scheduler::{DispatchResult, Lane, TwoTierScheduler};
