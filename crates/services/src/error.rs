//! Shared error types for the services crate.

use thiserror::Error;

use campus_core::model::QuizError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the REST client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("request rejected ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Message suitable for showing inline to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted by the QCM session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz attempt is active")]
    NoActiveSession,
    #[error("answers can no longer be changed for this attempt")]
    AnswersLocked,
    #[error("the attempt has already been submitted")]
    AlreadySubmitted,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("the attempt has no result yet")]
    NotFinished,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Submission(#[from] ApiError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
