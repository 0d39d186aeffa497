use async_trait::async_trait;

use campus_core::model::StudentResult;

use crate::api::ApiClient;
use crate::api::wire::STUDENT_RESULTS_PATH;
use crate::error::ApiError;

/// Past attempts of the signed-in student, graded or awaiting correction.
#[async_trait]
pub trait StudentResults: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the results cannot be fetched.
    async fn my_results(&self) -> Result<Vec<StudentResult>, ApiError>;
}

#[derive(Clone)]
pub struct HttpResultsService {
    client: ApiClient,
}

impl HttpResultsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StudentResults for HttpResultsService {
    async fn my_results(&self) -> Result<Vec<StudentResult>, ApiError> {
        self.client.get_json(STUDENT_RESULTS_PATH).await
    }
}
