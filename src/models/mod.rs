//! Scheduling domain models.
//!
//! # Domain Mappings
//!
//! | u-dispatch | Exam platform | Batch system | Support desk |
//! |------------|--------------|--------------|--------------|
//! | Submission | Exam paper | Job | Ticket |
//! | Estimated cost | Grading time | Runtime estimate | Effort estimate |
//! | Arrival time | Hand-in time | Queue time | Open time |

mod clock;
mod submission;

pub use clock::{ArrivalPolicy, LogicalClock, Tick};
pub use submission::Submission;
