use serde::{Deserialize, Serialize};

use crate::model::ids::QuizId;
use crate::model::outcome::OutcomeStatus;

/// Correction state of a past attempt as reported by the results endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    #[serde(rename = "soumis")]
    Submitted,
    #[serde(rename = "corrigé")]
    Corrected,
}

impl From<ResultStatus> for OutcomeStatus {
    fn from(value: ResultStatus) -> Self {
        match value {
            ResultStatus::Submitted => OutcomeStatus::Pending,
            ResultStatus::Corrected => OutcomeStatus::Graded,
        }
    }
}

/// One row of the student's results list.
///
/// Pending submissions are reported with zeroed marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
    pub id: u64,
    #[serde(default)]
    pub note: f64,
    #[serde(rename = "pourcentage", default)]
    pub percentage: f64,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(rename = "date_correction", default)]
    pub dated_at: Option<String>,
    #[serde(rename = "nombre_correctes", default)]
    pub correct_count: u32,
    #[serde(rename = "nombre_incorrectes", default)]
    pub incorrect_count: u32,
    /// Seconds spent on the attempt (0 for untimed quizzes).
    #[serde(rename = "temps_total", default)]
    pub elapsed_secs: u32,
    #[serde(rename = "qcm_id")]
    pub quiz_id: QuizId,
    #[serde(rename = "qcm_titre", default)]
    pub quiz_title: String,
    #[serde(rename = "statut", default = "default_status")]
    pub status: ResultStatus,
}

fn default_status() -> ResultStatus {
    ResultStatus::Corrected
}

impl StudentResult {
    #[must_use]
    pub fn outcome_status(&self) -> OutcomeStatus {
        self.status.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pending_row() {
        let row: StudentResult = serde_json::from_str(
            r#"{
                "id": 4, "note": 0, "pourcentage": 0,
                "feedback": "En attente de correction par l'enseignant",
                "date_correction": "2024-05-02T08:00:00",
                "nombre_correctes": 0, "nombre_incorrectes": 0,
                "temps_total": 20, "qcm_id": 7, "qcm_titre": "Algo",
                "evaluation_id": null, "statut": "soumis"
            }"#,
        )
        .unwrap();

        assert_eq!(row.outcome_status(), OutcomeStatus::Pending);
        assert_eq!(row.elapsed_secs, 20);
        assert_eq!(row.quiz_id, QuizId::new(7));
    }

    #[test]
    fn missing_status_means_corrected() {
        let row: StudentResult =
            serde_json::from_str(r#"{"id": 1, "note": 14.5, "qcm_id": 2}"#).unwrap();
        assert_eq!(row.status, ResultStatus::Corrected);
        assert!((row.note - 14.5).abs() < f64::EPSILON);
    }
}
