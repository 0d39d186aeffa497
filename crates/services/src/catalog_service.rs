use async_trait::async_trait;

use campus_core::model::Quiz;

use crate::api::ApiClient;
use crate::api::wire::STUDENT_QUIZZES_PATH;
use crate::error::ApiError;

/// Source of the quizzes a student may attempt.
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    /// Quizzes currently open to the signed-in student.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the catalog cannot be fetched.
    async fn available_quizzes(&self) -> Result<Vec<Quiz>, ApiError>;
}

#[derive(Clone)]
pub struct HttpQuizCatalog {
    client: ApiClient,
}

impl HttpQuizCatalog {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuizCatalog for HttpQuizCatalog {
    async fn available_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        let quizzes: Vec<Quiz> = self.client.get_json(STUDENT_QUIZZES_PATH).await?;
        tracing::debug!(count = quizzes.len(), "fetched quiz catalog");
        Ok(quizzes)
    }
}
