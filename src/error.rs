//! Error types.

use thiserror::Error;

use crate::models::Tick;
use crate::validation::ValidationError;

/// Why a submission was not admitted.
///
/// A rejected submission leaves the scheduler untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdmissionError {
    #[error("arrival time {arrival} is past deadline {deadline}")]
    PastDeadline { arrival: Tick, deadline: Tick },

    #[error("arrival time {arrival} precedes current time {clock}")]
    OutOfOrder { arrival: Tick, clock: Tick },

    #[error("invalid submission: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

/// A line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("malformed {command}: {reason}")]
    Malformed { command: String, reason: String },

    #[error("unknown command: {0}")]
    Unknown(String),
}

impl CommandError {
    pub(crate) fn malformed(command: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Submission;
    use crate::validation::validate_submission;

    #[test]
    fn test_admission_messages() {
        let err = AdmissionError::PastDeadline {
            arrival: 150,
            deadline: 100,
        };
        assert_eq!(err.to_string(), "arrival time 150 is past deadline 100");

        let err = AdmissionError::OutOfOrder {
            arrival: 5,
            clock: 50,
        };
        assert_eq!(err.to_string(), "arrival time 5 precedes current time 50");
    }

    #[test]
    fn test_invalid_joins_messages() {
        let errors = validate_submission(&Submission::new("")).unwrap_err();
        let err = AdmissionError::Invalid(errors);
        assert_eq!(err.to_string(), "invalid submission: Submission ID is empty");
    }

    #[test]
    fn test_command_messages() {
        let err = CommandError::malformed("SUBMIT", "expected 3 arguments, got 1");
        assert_eq!(
            err.to_string(),
            "malformed SUBMIT: expected 3 arguments, got 1"
        );
        assert_eq!(
            CommandError::Unknown("FOO".into()).to_string(),
            "unknown command: FOO"
        );
    }
}
