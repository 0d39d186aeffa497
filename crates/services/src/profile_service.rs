use async_trait::async_trait;

use campus_core::model::StudentProfile;

use crate::api::ApiClient;
use crate::api::wire::STUDENT_PROFILE_PATH;
use crate::error::ApiError;

/// Academic record of the signed-in student (matricule, track, marks per subject).
#[async_trait]
pub trait StudentProfiles: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the profile cannot be fetched, including a 404
    /// when the account has no student record.
    async fn my_profile(&self) -> Result<StudentProfile, ApiError>;
}

#[derive(Clone)]
pub struct HttpProfileService {
    client: ApiClient,
}

impl HttpProfileService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StudentProfiles for HttpProfileService {
    async fn my_profile(&self) -> Result<StudentProfile, ApiError> {
        self.client.get_json(STUDENT_PROFILE_PATH).await
    }
}
