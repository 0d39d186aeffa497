use campus_core::model::{OutcomeStatus, StudentResult};

use crate::vm::time_fmt::{format_backend_date, format_clock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub id: u64,
    pub quiz_title: String,
    pub status_label: &'static str,
    pub pending: bool,
    pub note: String,
    pub percentage: String,
    pub answers: String,
    pub elapsed: String,
    pub dated_at: String,
}

impl From<&StudentResult> for ResultRowVm {
    fn from(row: &StudentResult) -> Self {
        let pending = row.outcome_status() == OutcomeStatus::Pending;
        let dash = || "-".to_string();
        Self {
            id: row.id,
            quiz_title: row.quiz_title.clone(),
            status_label: if pending {
                "Awaiting correction"
            } else {
                "Graded"
            },
            pending,
            note: if pending {
                dash()
            } else {
                format!("{:.1}/20", row.note)
            },
            percentage: if pending {
                dash()
            } else {
                format!("{:.0}%", row.percentage)
            },
            answers: if pending {
                dash()
            } else {
                format!("{} correct, {} wrong", row.correct_count, row.incorrect_count)
            },
            elapsed: format_clock(row.elapsed_secs),
            dated_at: row
                .dated_at
                .as_deref()
                .map_or_else(dash, format_backend_date),
        }
    }
}

#[must_use]
pub fn map_result_rows(rows: &[StudentResult]) -> Vec<ResultRowVm> {
    rows.iter().map(ResultRowVm::from).collect()
}
