//! Request and response bodies of the backend endpoints.

use serde::{Deserialize, Serialize};

use campus_core::model::{AnswerMap, GradedScore, QuizId, SubmissionOutcome, User};

pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const VERIFY_TOKEN_PATH: &str = "/auth/verify-token";
pub(crate) const STUDENT_QUIZZES_PATH: &str = "/api/qcm/etudiant/qcms";
pub(crate) const SUBMIT_PATH: &str = "/api/qcm/etudiant/soumettre";
pub(crate) const STUDENT_RESULTS_PATH: &str = "/api/qcm/etudiant/resultats";
pub(crate) const STUDENT_PROFILE_PATH: &str = "/api/qcm/etudiant/profil";

/// Status the backend uses for attempts waiting on a teacher.
const PENDING_STATUS: &str = "soumis";

const PENDING_FALLBACK_MESSAGE: &str = "Awaiting correction by the teacher";

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(rename = "motDePasse")]
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyTokenResponse {
    #[serde(default)]
    pub valid: bool,
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub qcm_id: QuizId,
    pub reponses: &'a AnswerMap,
    pub temps_execution: u32,
}

/// Body of an accepted submission. Every field is optional; the status code
/// alone decides that the attempt was received.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmitResponse {
    statut: Option<String>,
    message: Option<String>,
    reponse_id: Option<u64>,
    score: Option<u32>,
    total: Option<u32>,
    pourcentage: Option<f64>,
    note: Option<f64>,
    feedback: Option<String>,
}

impl SubmitResponse {
    /// A reply without both `score` and `total` is taken as received but not
    /// yet graded.
    pub(crate) fn into_outcome(self) -> SubmissionOutcome {
        let graded = self.statut.as_deref() != Some(PENDING_STATUS);
        match (graded, self.score, self.total) {
            (true, Some(score), Some(total)) => SubmissionOutcome::Graded(GradedScore {
                score,
                total,
                percentage: self.pourcentage.unwrap_or_default(),
                note: self.note.unwrap_or_default(),
                feedback: self.feedback.unwrap_or_default(),
            }),
            _ => SubmissionOutcome::Pending {
                message: self
                    .message
                    .unwrap_or_else(|| PENDING_FALLBACK_MESSAGE.to_string()),
                submission_id: self.reponse_id,
            },
        }
    }
}
