use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator of a submission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Accepted by the server, awaiting manual correction.
    Pending,
    /// Scored immediately.
    Graded,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Pending => f.write_str("pending"),
            OutcomeStatus::Graded => f.write_str("graded"),
        }
    }
}

/// Realized score of an immediately graded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedScore {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    /// Normalized mark on the 0–20 scale.
    pub note: f64,
    pub feedback: String,
}

impl GradedScore {
    /// Upper bound of the normalized mark.
    pub const NOTE_SCALE: f64 = 20.0;

    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.note >= Self::NOTE_SCALE / 2.0
    }
}

/// Terminal result of a submitted attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Pending {
        message: String,
        submission_id: Option<u64>,
    },
    Graded(GradedScore),
}

impl SubmissionOutcome {
    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        match self {
            SubmissionOutcome::Pending { .. } => OutcomeStatus::Pending,
            SubmissionOutcome::Graded(_) => OutcomeStatus::Graded,
        }
    }

    #[must_use]
    pub fn graded(&self) -> Option<&GradedScore> {
        match self {
            SubmissionOutcome::Graded(score) => Some(score),
            SubmissionOutcome::Pending { .. } => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionOutcome::Pending { .. })
    }
}
