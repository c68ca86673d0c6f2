//! Synthetic workloads and batch simulation.
//!
//! Generates a deterministic stream of Bernoulli arrivals (one coin flip
//! per tick) mixing short and long jobs, and replays it through a
//! scheduler to observe how aging bounds the wait of long jobs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchedulerConfig;
use crate::models::{Submission, Tick};
use crate::scheduler::{DispatchResult, DispatchStats, Lane, TwoTierScheduler};
use crate::validation::{validate_batch, ValidationError};

/// Parameters of a synthetic workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of ticks to generate arrivals for.
    pub ticks: u64,
    /// Probability of an arrival at each tick.
    pub p_arrival: f64,
    /// Probability that an arrival is a short job.
    pub p_short: f64,
    /// Cost of a short job.
    pub short_cost: u64,
    /// Cost of a long job.
    pub long_cost: u64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            ticks: 1_000,
            p_arrival: 0.3,
            p_short: 0.7,
            short_cost: 2,
            long_cost: 6,
            seed: 0,
        }
    }
}

impl WorkloadSpec {
    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of ticks.
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the arrival probability.
    pub fn with_arrival_rate(mut self, p_arrival: f64) -> Self {
        self.p_arrival = p_arrival;
        self
    }

    /// Generates submissions in arrival order. IDs are `S0`, `S1`, ...
    pub fn generate(&self) -> Vec<Submission> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut submissions = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let cost = if rng.random::<f64>() < self.p_short {
                    self.short_cost
                } else {
                    self.long_cost
                };
                let arrival = Tick::try_from(t).unwrap_or(Tick::MAX);
                submissions.push(
                    Submission::new(format!("S{}", submissions.len()))
                        .with_cost(cost)
                        .arriving_at(arrival),
                );
            }
        }

        submissions
    }
}

/// One dispatch observed during a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub id: String,
    pub lane: Lane,
    pub dispatched_at: Tick,
    pub waited: Tick,
}

/// Outcome of a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Dispatches in the order they happened.
    pub dispatches: Vec<DispatchRecord>,
    /// Final scheduler statistics.
    pub stats: DispatchStats,
}

impl SimulationReport {
    /// Longest wait observed in the given lane.
    pub fn max_wait_in(&self, lane: Lane) -> Option<Tick> {
        self.dispatches
            .iter()
            .filter(|d| d.lane == lane)
            .map(|d| d.waited)
            .max()
    }
}

/// Replays `submissions` through a fresh scheduler.
///
/// After each arrival the scheduler runs up to `cycles_per_arrival`
/// dispatch cycles; any remaining work is drained at the end. Rejected
/// submissions are counted in the stats and otherwise skipped.
///
/// # Errors
/// Returns the validation errors if the batch has duplicate IDs or
/// arrivals that go backwards.
pub fn simulate(
    config: SchedulerConfig,
    submissions: &[Submission],
    cycles_per_arrival: usize,
) -> Result<SimulationReport, Vec<ValidationError>> {
    validate_batch(submissions)?;

    let mut scheduler = TwoTierScheduler::new(config);
    let mut dispatches = Vec::new();

    for submission in submissions {
        if let Err(err) = scheduler.admit(submission.clone()) {
            debug!(id = %submission.id, %err, "Simulation arrival rejected");
            continue;
        }
        for _ in 0..cycles_per_arrival {
            match scheduler.process_cycle() {
                DispatchResult::Dispatched(d) => dispatches.push(DispatchRecord {
                    id: d.submission.id,
                    lane: d.lane,
                    dispatched_at: scheduler.now(),
                    waited: d.waited,
                }),
                DispatchResult::Idle => break,
            }
        }
    }

    let now = scheduler.now();
    dispatches.extend(scheduler.drain().into_iter().map(|d| DispatchRecord {
        id: d.submission.id,
        lane: d.lane,
        dispatched_at: now,
        waited: d.waited,
    }));

    Ok(SimulationReport {
        dispatches,
        stats: scheduler.stats().clone(),
    })
}
