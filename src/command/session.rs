//! Interactive session over the line protocol.
//!
//! Executes parsed commands against a scheduler and renders the console
//! responses. Errors are reported and the session continues.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use super::parser::{parse, Command};
use crate::error::{AdmissionError, CommandError};
use crate::scheduler::{DispatchResult, TwoTierScheduler};

/// Greeting printed when a session starts.
pub const BANNER: &str = "--- Online Exam Backend Initialized ---";
/// Input prompt.
pub const PROMPT: &str = "> ";

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to print; keep reading.
    Continue(Vec<String>),
    /// End the session.
    Exit,
}

/// A console session owning one scheduler.
#[derive(Debug, Clone, Default)]
pub struct Session {
    scheduler: TwoTierScheduler,
}

impl Session {
    pub fn new(scheduler: TwoTierScheduler) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &TwoTierScheduler {
        &self.scheduler
    }

    /// Parses and executes one line.
    pub fn execute(&mut self, line: &str) -> Outcome {
        match parse(line) {
            Ok(Command::Exit) => Outcome::Exit,
            Ok(command) => Outcome::Continue(self.apply(command)),
            Err(err) => {
                debug!(%err, line, "Command rejected");
                Outcome::Continue(vec![render_command_error(&err).to_string()])
            }
        }
    }

    fn apply(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::SetDeadline(deadline) => {
                let deadline = self.scheduler.set_deadline(deadline);
                vec![format!("Deadline set to: {deadline}")]
            }
            Command::Submit {
                id,
                estimated_cost,
                arrival_time,
            } => match self.scheduler.submit(id, estimated_cost, arrival_time) {
                Ok(accepted) => vec![format!("Submission accepted from {}", accepted.id)],
                Err(err) => vec![render_admission_error(&err)],
            },
            Command::Process => match self.scheduler.process_cycle() {
                DispatchResult::Dispatched(d) => vec![format!(
                    "Grading {} (Priority: {})",
                    d.submission.id, d.lane
                )],
                DispatchResult::Idle => vec!["No submissions to process.".to_string()],
            },
            Command::Status => {
                let status = self.scheduler.status();
                vec![
                    "--- Current Status ---".to_string(),
                    format!("Current Time: {}", status.clock),
                    format!("Starvation Queue: {}", status.starvation_len),
                    format!("SJF Heap: {}", status.cost_ranked_len),
                ]
            }
            Command::Tick(delta) => {
                let now = self.scheduler.tick(delta);
                vec![format!("Current Time: {now}")]
            }
            Command::Stats => {
                let stats = self.scheduler.stats();
                let avg_wait = stats
                    .average_wait()
                    .map(|w| format!("{w:.2}"))
                    .unwrap_or_else(|| "n/a".to_string());
                let share = stats
                    .starvation_share()
                    .map(|r| format!("{:.2}%", r * 100.0))
                    .unwrap_or_else(|| "n/a".to_string());
                vec![
                    "--- Statistics ---".to_string(),
                    format!("Accepted: {}", stats.accepted),
                    format!("Rejected: {}", stats.rejected()),
                    format!("Promoted: {}", stats.promoted),
                    format!(
                        "Dispatched: {} (Starvation Lane: {}, Shortest Job: {})",
                        stats.dispatched(),
                        stats.dispatched_starvation,
                        stats.dispatched_cost_ranked
                    ),
                    format!("Starvation Share: {share}"),
                    format!("Idle Cycles: {}", stats.idle_cycles),
                    format!("Average Wait: {avg_wait}"),
                    format!("Max Wait: {}", stats.max_wait),
                ]
            }
            Command::Exit => Vec::new(),
        }
    }

    /// Runs the read-eval-print loop until `EXIT` or end of input.
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 end up as an
    /// unknown command rather than ending the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        info!("Session started");
        writeln!(output, "{BANNER}")?;

        let mut buf = Vec::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            match self.execute(line.trim_end_matches(['\n', '\r'])) {
                Outcome::Exit => break,
                Outcome::Continue(response) => {
                    for text in response {
                        writeln!(output, "{text}")?;
                    }
                }
            }
        }

        info!(pending = self.scheduler.pending(), "Session ended");
        Ok(())
    }
}

fn render_admission_error(err: &AdmissionError) -> String {
    match err {
        AdmissionError::PastDeadline { .. } => "Error: Rejected. Past Deadline.".to_string(),
        AdmissionError::OutOfOrder { .. } => {
            "Error: Rejected. Arrival precedes current time.".to_string()
        }
        AdmissionError::Invalid(errors) => {
            let reasons: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
            format!("Error: Rejected. {}.", reasons.join("; "))
        }
    }
}

fn render_command_error(err: &CommandError) -> &'static str {
    match err {
        CommandError::Malformed { .. } => "Invalid input format.",
        CommandError::Unknown(_) => "Unknown command.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use std::io::Cursor;

    fn said(outcome: Outcome) -> Vec<String> {
        match outcome {
            Outcome::Continue(lines) => lines,
            Outcome::Exit => panic!("unexpected exit"),
        }
    }

    fn one(session: &mut Session, line: &str) -> String {
        let mut lines = said(session.execute(line));
        assert_eq!(lines.len(), 1, "expected one line for {line:?}");
        lines.remove(0)
    }

    #[test]
    fn test_deadline_scenario() {
        let mut session = Session::default();
        assert_eq!(one(&mut session, "SET_DEADLINE 100"), "Deadline set to: 100");
        assert_eq!(one(&mut session, "SUBMIT A 5 50"), "Submission accepted from A");
        assert_eq!(
            one(&mut session, "SUBMIT B 3 150"),
            "Error: Rejected. Past Deadline."
        );
        assert_eq!(
            said(session.execute("STATUS")),
            vec![
                "--- Current Status ---",
                "Current Time: 50",
                "Starvation Queue: 0",
                "SJF Heap: 1",
            ]
        );
    }

    #[test]
    fn test_process_lanes() {
        let mut session = Session::default();
        one(&mut session, "SUBMIT X 10 0");
        one(&mut session, "SUBMIT Y 1 10");
        one(&mut session, "SUBMIT Z 1 310");

        assert_eq!(
            one(&mut session, "PROCESS"),
            "Grading X (Priority: Starvation Lane)"
        );
        assert_eq!(
            one(&mut session, "PROCESS"),
            "Grading Y (Priority: Shortest Job)"
        );
        assert_eq!(
            one(&mut session, "PROCESS"),
            "Grading Z (Priority: Shortest Job)"
        );
        assert_eq!(one(&mut session, "PROCESS"), "No submissions to process.");
    }

    #[test]
    fn test_errors_do_not_mutate() {
        let mut session = Session::default();
        one(&mut session, "SUBMIT A 5 50");
        let before = session.scheduler().status();

        assert_eq!(one(&mut session, "SUBMIT B x 60"), "Invalid input format.");
        assert_eq!(one(&mut session, "SUBMIT B 1"), "Invalid input format.");
        assert_eq!(one(&mut session, "SET_DEADLINE"), "Invalid input format.");
        assert_eq!(one(&mut session, "FROBNICATE"), "Unknown command.");
        assert_eq!(one(&mut session, ""), "Unknown command.");
        assert_eq!(
            one(&mut session, "SUBMIT C 1 10"),
            "Error: Rejected. Arrival precedes current time."
        );

        assert_eq!(session.scheduler().status(), before);
    }

    #[test]
    fn test_tick_and_stats() {
        let mut session = Session::default();
        one(&mut session, "SUBMIT A 5 0");
        assert_eq!(one(&mut session, "TICK 301"), "Current Time: 301");
        one(&mut session, "PROCESS");

        let stats = said(session.execute("STATS"));
        assert_eq!(stats[0], "--- Statistics ---");
        assert!(stats.contains(&"Promoted: 1".to_string()));
        assert!(stats.contains(&"Dispatched: 1 (Starvation Lane: 1, Shortest Job: 0)".to_string()));
        assert!(stats.contains(&"Average Wait: 301.00".to_string()));
        assert!(stats.contains(&"Starvation Share: 100.00%".to_string()));
    }

    #[test]
    fn test_exit_case_insensitive() {
        let mut session = Session::default();
        assert_eq!(session.execute("exit"), Outcome::Exit);
        assert_eq!(session.execute("EXIT"), Outcome::Exit);
        assert_eq!(session.execute("Exit"), Outcome::Exit);
    }

    #[test]
    fn test_permissive_session_rewinds() {
        let config =
            SchedulerConfig::new().with_arrival_policy(crate::models::ArrivalPolicy::Permissive);
        let mut session = Session::new(TwoTierScheduler::new(config));
        one(&mut session, "SUBMIT A 1 100");
        assert_eq!(one(&mut session, "SUBMIT B 1 10"), "Submission accepted from B");
        assert_eq!(session.scheduler().now(), 10);
    }

    #[test]
    fn test_run_loop() {
        let input = "SUBMIT A 5 50\nPROCESS\nbogus\nEXIT\nSUBMIT never 1 1\n";
        let mut output = Vec::new();
        let mut session = Session::default();
        session.run(Cursor::new(input), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "--- Online Exam Backend Initialized ---\n\
             > Submission accepted from A\n\
             > Grading A (Priority: Shortest Job)\n\
             > Unknown command.\n\
             > "
        );
        assert_eq!(session.scheduler().stats().accepted, 1);
    }

    #[test]
    fn test_run_survives_invalid_utf8() {
        let input: &[u8] = b"SUBMIT A 1 0\n\xff\xfe\nSUBMIT B 1 5\r\nSTATUS\n";
        let mut output = Vec::new();
        let mut session = Session::default();
        session.run(input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "--- Online Exam Backend Initialized ---\n\
             > Submission accepted from A\n\
             > Unknown command.\n\
             > Submission accepted from B\n\
             > --- Current Status ---\n\
             Current Time: 5\n\
             Starvation Queue: 0\n\
             SJF Heap: 2\n\
             > "
        );
        assert_eq!(session.scheduler().pending(), 2);
    }

    #[test]
    fn test_run_stops_at_eof() {
        let mut output = Vec::new();
        let mut session = Session::default();
        session
            .run(Cursor::new("SUBMIT A 1 0\n"), &mut output)
            .unwrap();
        assert_eq!(session.scheduler().pending(), 1);
    }
}
