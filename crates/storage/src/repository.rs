use async_trait::async_trait;
use campus_core::model::User;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Domain(#[from] campus_core::Error),
}

/// Persisted login state: the bearer token and the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub access_token: String,
    pub user: User,
    pub saved_at: DateTime<Utc>,
}

/// Repository contract for the client-side session store.
///
/// Holds at most one set of credentials plus the last student page that
/// was open, so a restart can land back where the user left off.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Load the stored credentials, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError>;

    /// Replace the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the credentials cannot be written.
    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError>;

    /// Remove credentials and the remembered page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Last student page that was open.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn last_page(&self) -> Result<Option<String>, StorageError>;

    /// Remember the current student page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the page cannot be written.
    async fn save_last_page(&self, page: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    credentials: Option<StoredCredentials>,
    last_page: Option<String>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryRepository {
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.credentials.clone())
    }

    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.credentials = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.credentials = None;
        guard.last_page = None;
        Ok(())
    }

    async fn last_page(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.last_page.clone())
    }

    async fn save_last_page(&self, page: &str) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.last_page = Some(page.to_string());
        Ok(())
    }
}

/// Aggregates repository trait objects for the client.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let credentials: Arc<dyn CredentialRepository> = Arc::new(InMemoryRepository::new());
        Self { credentials }
    }
}
