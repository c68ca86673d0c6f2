use clap::{Parser, Subcommand};

use u_dispatch::models::{ArrivalPolicy, Tick};

/// Shortest-job-first dispatcher with aging into a starvation lane.
///
/// Reads commands from stdin (SET_DEADLINE, SUBMIT, PROCESS, STATUS,
/// TICK, STATS, EXIT) unless a subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "u-dispatch", about = "Two-tier admission and dispatch scheduler")]
pub struct CliArgs {
    /// Path to a TOML config file
    #[arg(long, env = "U_DISPATCH_CONFIG")]
    pub config: Option<String>,

    /// Starvation threshold (overrides config)
    #[arg(long)]
    pub threshold: Option<Tick>,

    /// Admission deadline (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    pub deadline: Option<Tick>,

    /// Out-of-order arrivals: reject, clamp or permissive (overrides config)
    #[arg(long)]
    pub arrival_policy: Option<ArrivalPolicy>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Replay a seeded synthetic workload and print a summary
    Simulate {
        /// Ticks of arrivals to generate
        #[arg(long, default_value = "1000")]
        ticks: u64,

        /// Probability of an arrival per tick
        #[arg(long, default_value = "0.3")]
        arrival_rate: f64,

        /// Dispatch cycles run after each arrival
        #[arg(long, default_value = "1")]
        cycles: usize,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Print every dispatch, not just the summary
        #[arg(long)]
        verbose: bool,
    },
}
