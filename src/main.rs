mod cli;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use u_dispatch::command::Session;
use u_dispatch::config::SchedulerConfig;
use u_dispatch::scheduler::{Lane, TwoTierScheduler};
use u_dispatch::workload::{simulate, WorkloadSpec};

use crate::cli::{CliArgs, Mode};

fn main() -> Result<()> {
    // Logs go to stderr so protocol output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = resolve_config(&args)?;
    info!(?config, "Scheduler configured");

    match args.mode {
        None => {
            let mut session = Session::new(TwoTierScheduler::new(config));
            session
                .run(io::stdin().lock(), io::stdout().lock())
                .context("console session failed")?;
        }
        Some(Mode::Simulate {
            ticks,
            arrival_rate,
            cycles,
            seed,
            verbose,
        }) => {
            let spec = WorkloadSpec::default()
                .with_ticks(ticks)
                .with_arrival_rate(arrival_rate)
                .with_seed(seed);
            let submissions = spec.generate();
            let report = simulate(config, &submissions, cycles).map_err(|errors| {
                let reasons: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
                anyhow::anyhow!("generated workload is invalid: {}", reasons.join("; "))
            })?;

            if verbose {
                for d in &report.dispatches {
                    println!(
                        "t={} Grading {} (Priority: {}) waited {}",
                        d.dispatched_at, d.id, d.lane, d.waited
                    );
                }
            }

            let stats = &report.stats;
            println!("Submissions: {}", submissions.len());
            println!(
                "Dispatched: {} (Starvation Lane: {}, Shortest Job: {})",
                stats.dispatched(),
                stats.dispatched_starvation,
                stats.dispatched_cost_ranked
            );
            println!("Promoted: {}", stats.promoted);
            if let Some(share) = stats.starvation_share() {
                println!("Starvation share: {:.2}%", share * 100.0);
            }
            match stats.average_wait() {
                Some(avg) => println!("Average wait: {avg:.2} ticks"),
                None => println!("Average wait: n/a"),
            }
            println!("Max wait: {} ticks", stats.max_wait);
            if let Some(w) = report.max_wait_in(Lane::CostRanked) {
                println!("Max wait (Shortest Job): {w} ticks");
            }
        }
    }

    Ok(())
}

/// Config file first, then CLI overrides.
fn resolve_config(args: &CliArgs) -> Result<SchedulerConfig> {
    let mut config = match &args.config {
        Some(path) => SchedulerConfig::load(path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => SchedulerConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config.starvation_threshold = threshold;
    }
    if let Some(deadline) = args.deadline {
        config.deadline = Some(deadline);
    }
    if let Some(policy) = args.arrival_policy {
        config.arrival_policy = policy;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
