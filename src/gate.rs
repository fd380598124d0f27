//! Acceptance check applied to a decoded test before it is saved.

use crate::codec::{BlockDiagnostic, DecodeReport};
use crate::models::Question;

pub const DEFAULT_REQUIRED_QUESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error(
        "fill in all {required} test questions and follow the format ({found} valid question(s) found)"
    )]
    CountMismatch {
        required: usize,
        found: usize,
        dropped: Vec<BlockDiagnostic>,
    },
}

/// Requires a test to contain an exact number of valid questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceGate {
    required: usize,
}

impl AcceptanceGate {
    pub fn new(required: usize) -> Self {
        Self { required }
    }

    pub fn required(&self) -> usize {
        self.required
    }

    /// Returns the questions when the count matches, otherwise the dropped
    /// blocks so the caller can say which ones failed.
    pub fn admit(&self, report: DecodeReport) -> Result<Vec<Question>, GateError> {
        let found = report.questions.len();
        if found == self.required {
            return Ok(report.questions);
        }

        Err(GateError::CountMismatch {
            required: self.required,
            found,
            dropped: report.dropped().cloned().collect(),
        })
    }
}

impl Default for AcceptanceGate {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_QUESTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DropReason, decode_report};

    fn test_text(valid: usize, broken: usize) -> String {
        let mut blocks = Vec::new();
        for i in 0..valid {
            blocks.push(format!(
                "+++++ Valid {}\n==== a\n====# b\n==== c\n==== d",
                i + 1
            ));
        }
        for i in 0..broken {
            blocks.push(format!("+++++ Broken {}\n==== a\n==== b\n==== c\n==== d", i + 1));
        }
        blocks.join("\n\n")
    }

    #[test]
    fn test_admits_exactly_ten() {
        let questions = AcceptanceGate::default()
            .admit(decode_report(&test_text(10, 0)))
            .unwrap();
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[9].order_number, 10);
    }

    #[test]
    fn test_rejects_nine_valid_and_reports_dropped() {
        let err = AcceptanceGate::default()
            .admit(decode_report(&test_text(9, 1)))
            .unwrap_err();

        let GateError::CountMismatch {
            required,
            found,
            dropped,
        } = err;
        assert_eq!(required, 10);
        assert_eq!(found, 9);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].drop_reason(), Some(&DropReason::NoCorrectAnswer));
    }

    #[test]
    fn test_rejects_too_many() {
        let result = AcceptanceGate::default().admit(decode_report(&test_text(11, 0)));
        assert!(matches!(
            result,
            Err(GateError::CountMismatch { found: 11, .. })
        ));
    }

    #[test]
    fn test_custom_count() {
        let gate = AcceptanceGate::new(3);
        assert!(gate.admit(decode_report(&test_text(3, 2))).is_ok());
        assert!(gate.admit(decode_report(&test_text(10, 0))).is_err());
    }

    #[test]
    fn test_message_mentions_requirement() {
        let err = AcceptanceGate::new(10).admit(decode_report("")).unwrap_err();
        assert!(err.to_string().contains("all 10 test questions"));
    }
}
