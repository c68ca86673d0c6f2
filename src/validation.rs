//! Input validation for submissions.
//!
//! Checks structural integrity of submissions before admission. Detects:
//! - Empty identifiers
//! - Identifiers that cannot round-trip through the line protocol
//! - Duplicate identifiers within a batch
//! - Batches whose arrival times go backwards

use std::collections::HashSet;
use std::fmt;

use crate::models::Submission;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Identifier is empty.
    EmptyId,
    /// Identifier contains whitespace or control characters.
    InvalidId,
    /// Two submissions in a batch share the same identifier.
    DuplicateId,
    /// A batch lists an arrival earlier than the one before it.
    UnorderedArrival,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a single submission.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_submission(submission: &Submission) -> ValidationResult {
    let mut errors = Vec::new();
    check_id(submission, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a batch of submissions meant to be replayed in order.
///
/// Checks:
/// 1. Every identifier is non-empty and protocol-safe
/// 2. No duplicate identifiers
/// 3. Arrival times are non-decreasing
pub fn validate_batch(submissions: &[Submission]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for s in submissions {
        check_id(s, &mut errors);
        if !seen.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate submission ID: {}", s.id),
            ));
        }
    }

    for pair in submissions.windows(2) {
        if pair[1].arrival_time < pair[0].arrival_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnorderedArrival,
                format!(
                    "Submission '{}' arrives at {} before '{}' at {}",
                    pair[1].id, pair[1].arrival_time, pair[0].id, pair[0].arrival_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_id(submission: &Submission, errors: &mut Vec<ValidationError>) {
    if submission.id.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Submission ID is empty",
        ));
    } else if submission
        .id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidId,
            format!("Submission ID '{}' contains whitespace", submission.id.escape_debug()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Vec<Submission> {
        vec![
            Submission::new("A").with_cost(5).arriving_at(0),
            Submission::new("B").with_cost(3).arriving_at(10),
            Submission::new("C").with_cost(8).arriving_at(10),
        ]
    }

    #[test]
    fn test_valid_submission() {
        assert!(validate_submission(&Submission::new("alice")).is_ok());
    }

    #[test]
    fn test_empty_id() {
        let errors = validate_submission(&Submission::new("")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
    }

    #[test]
    fn test_whitespace_id() {
        let errors = validate_submission(&Submission::new("bob smith")).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidId);

        let errors = validate_submission(&Submission::new("tab\there")).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidId);
        assert!(errors[0].to_string().contains("tab\\there"));
    }

    #[test]
    fn test_valid_batch() {
        assert!(validate_batch(&sample_batch()).is_ok());
        assert!(validate_batch(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut batch = sample_batch();
        batch.push(Submission::new("A").arriving_at(20));

        let errors = validate_batch(&batch).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_unordered_arrival() {
        let mut batch = sample_batch();
        batch.push(Submission::new("D").arriving_at(5));

        let errors = validate_batch(&batch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnorderedArrival);
        assert!(errors[0].message.contains("'D'"));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let batch = vec![
            Submission::new("").arriving_at(10),
            Submission::new("x y").arriving_at(0),
        ];
        let errors = validate_batch(&batch).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
