use async_trait::async_trait;

use campus_core::model::{AnswerMap, QuizId, SubmissionOutcome};

use crate::api::ApiClient;
use crate::api::wire::{SUBMIT_PATH, SubmitRequest, SubmitResponse};
use crate::error::ApiError;

/// One attempt handed to the backend for correction.
///
/// Questions the student never answered are absent from `answers`; the
/// backend decides how they count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub quiz_id: QuizId,
    pub answers: AnswerMap,
    pub elapsed_secs: u32,
}

/// Accepts a finished attempt and reports how it was received.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit `request`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached or answers with a
    /// non-success status. Any 2xx reply is an outcome.
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionOutcome, ApiError>;
}

/// `SubmissionService` backed by the REST endpoint.
#[derive(Clone)]
pub struct HttpSubmissionService {
    client: ApiClient,
}

impl HttpSubmissionService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubmissionService for HttpSubmissionService {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionOutcome, ApiError> {
        let body = SubmitRequest {
            qcm_id: request.quiz_id,
            reponses: &request.answers,
            temps_execution: request.elapsed_secs,
        };
        let response: SubmitResponse = self.client.post_accepted(SUBMIT_PATH, &body).await?;
        let outcome = response.into_outcome();
        tracing::debug!(
            quiz_id = %request.quiz_id,
            status = %outcome.status(),
            "submission accepted"
        );
        Ok(outcome)
    }
}
