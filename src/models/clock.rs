//! Logical clock.
//!
//! The clock is not a free-running timer. It moves only when a submission
//! is admitted or when the caller ticks it explicitly, so every scheduling
//! decision is a pure function of the event sequence fed to the scheduler.

use serde::{Deserialize, Serialize};

/// Logical timestamp.
pub type Tick = i64;

/// How the clock reacts to a submission whose arrival time is earlier
/// than the current clock value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// Refuse the submission. Keeps the clock monotonic.
    #[default]
    Reject,
    /// Accept the submission but leave the clock where it is.
    Clamp,
    /// Accept the submission and set the clock to its arrival time,
    /// even if that moves the clock backwards.
    Permissive,
}

impl std::str::FromStr for ArrivalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unknown arrival policy '{other}' (expected reject, clamp or permissive)"
            )),
        }
    }
}

/// Current logical time of a scheduler instance.
///
/// A fresh clock reads 0 but is unanchored: the first admitted arrival
/// sets it outright, whatever its sign, and no arrival precedes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalClock {
    now: Tick,
    anchored: bool,
}

impl LogicalClock {
    /// Creates an unanchored clock reading t=0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock anchored at the given time.
    pub fn starting_at(now: Tick) -> Self {
        Self {
            now,
            anchored: true,
        }
    }

    /// Current time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Whether an arrival at `arrival` would be earlier than the clock.
    pub fn precedes(&self, arrival: Tick) -> bool {
        self.anchored && arrival < self.now
    }

    /// Applies an admitted arrival under the given policy.
    ///
    /// Returns the new clock value.
    pub fn observe_arrival(&mut self, arrival: Tick, policy: ArrivalPolicy) -> Tick {
        self.now = match policy {
            _ if !self.anchored => arrival,
            ArrivalPolicy::Permissive => arrival,
            ArrivalPolicy::Reject | ArrivalPolicy::Clamp => self.now.max(arrival),
        };
        self.anchored = true;
        self.now
    }

    /// Moves the clock forward by `delta`, saturating at `Tick::MAX`.
    pub fn advance(&mut self, delta: u64) -> Tick {
        let delta = Tick::try_from(delta).unwrap_or(Tick::MAX);
        self.now = self.now.saturating_add(delta);
        self.anchored = true;
        self.now
    }

    /// Time elapsed since `arrival`.
    ///
    /// Negative when the clock was rewound past `arrival`.
    pub fn wait_since(&self, arrival: Tick) -> Tick {
        self.now.saturating_sub(arrival)
    }
}
