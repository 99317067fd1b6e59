//! Validation verdicts

use serde::{Deserialize, Serialize};

/// The outcome of validating a single SSN.
///
/// Produced fresh per call. Rule violations are reported here, never as
/// errors: the first failed check decides `valid` and `reason`, and the
/// remaining checks are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the SSN passed every applicable check.
    pub valid: bool,

    /// Human-readable outcome; the first failed check wins.
    pub reason: String,

    /// State whose area ranges matched, when a state and a pre-2011 date of
    /// birth were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_state: Option<String>,

    /// Approximate issuance year derived from the area's recorded group
    /// sequence, or a short note when the group cannot be located there.
    /// Heuristic, not ground truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_issue_year: Option<String>,
}

impl Verdict {
    /// A rejection with the given reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Verdict {
            valid: false,
            reason: reason.into(),
            matched_state: None,
            approx_issue_year: None,
        }
    }

    /// An acceptance with no contextual facts attached.
    pub fn accepted() -> Self {
        Verdict {
            valid: true,
            reason: "Valid".to_string(),
            matched_state: None,
            approx_issue_year: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_carries_reason() {
        let verdict = Verdict::rejected("Area cannot be 000");
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, "Area cannot be 000");
        assert_eq!(verdict.matched_state, None);
    }

    #[test]
    fn test_accepted_reason_is_valid() {
        let verdict = Verdict::accepted();
        assert!(verdict.valid);
        assert_eq!(verdict.reason, "Valid");
    }
}
