use std::sync::{Arc, PoisonError, RwLock};

use campus_core::Clock;
use campus_core::model::User;
use storage::repository::{CredentialRepository, StoredCredentials};

use crate::api::wire::{
    LOGIN_PATH, LoginRequest, LoginResponse, VERIFY_TOKEN_PATH, VerifyTokenResponse,
};
use crate::api::{ApiClient, AuthEvent};
use crate::error::{ApiError, AuthError};

/// Sign-in state of the desktop client.
///
/// Owns the bearer token on the shared `ApiClient` and mirrors it into the
/// credential store so a restart can resume the session.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    credentials: Arc<dyn CredentialRepository>,
    clock: Clock,
    current: Arc<RwLock<Option<User>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient, credentials: Arc<dyn CredentialRepository>, clock: Clock) -> Self {
        Self {
            client,
            credentials,
            clock,
            current: Arc::new(RwLock::new(None)),
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Exchange `email`/`password` for a token and remember it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server message for bad
    /// credentials, or `AuthError` if the backend or the store fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let body = LoginRequest { email, password };
        let response: LoginResponse = match self.client.post_public(LOGIN_PATH, &body).await {
            Ok(response) => response,
            Err(ApiError::Rejected { message, .. }) => return Err(AuthError::Rejected(message)),
            Err(err) => return Err(err.into()),
        };

        let credentials = StoredCredentials {
            access_token: response.access_token,
            user: response.user,
            saved_at: self.clock.now(),
        };
        self.credentials.save_credentials(&credentials).await?;
        self.client.set_token(Some(credentials.access_token));
        self.set_current(Some(credentials.user.clone()));

        tracing::info!(user = %credentials.user.username, role = %credentials.user.role, "signed in");
        self.client
            .events()
            .emit(AuthEvent::LoggedIn(credentials.user.clone()));
        Ok(credentials.user)
    }

    /// Resume a stored session if the backend still accepts its token.
    ///
    /// A token the backend rejects, or that cannot be verified, is
    /// forgotten and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the credential store fails.
    pub async fn restore(&self) -> Result<Option<User>, AuthError> {
        let Some(stored) = self.credentials.load_credentials().await? else {
            return Ok(None);
        };

        self.client.set_token(Some(stored.access_token.clone()));
        match self
            .client
            .get_json::<VerifyTokenResponse>(VERIFY_TOKEN_PATH)
            .await
        {
            Ok(VerifyTokenResponse {
                valid: true,
                user: Some(user),
            }) => {
                let refreshed = StoredCredentials {
                    access_token: stored.access_token,
                    user: user.clone(),
                    saved_at: stored.saved_at,
                };
                self.credentials.save_credentials(&refreshed).await?;
                self.set_current(Some(user.clone()));
                tracing::info!(user = %user.username, "restored previous session");
                self.client.events().emit(AuthEvent::LoggedIn(user.clone()));
                Ok(Some(user))
            }
            Ok(_) => {
                tracing::warn!("stored token is no longer valid");
                self.forget().await?;
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not verify stored token");
                self.forget().await?;
                Ok(None)
            }
        }
    }

    /// Sign out and wipe the stored credentials and last page.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the credential store cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.forget().await?;
        tracing::info!("signed out");
        self.client.events().emit(AuthEvent::LoggedOut);
        Ok(())
    }

    /// Drop local state after the backend rejected the token.
    ///
    /// Emits nothing: the client already published `TokenExpired`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the credential store cannot be cleared.
    pub async fn forget_expired(&self) -> Result<(), AuthError> {
        self.forget().await
    }

    /// Remember which student page is open.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the page cannot be written.
    pub async fn remember_page(&self, page: &str) -> Result<(), AuthError> {
        self.credentials.save_last_page(page).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub async fn last_page(&self) -> Result<Option<String>, AuthError> {
        Ok(self.credentials.last_page().await?)
    }

    async fn forget(&self) -> Result<(), AuthError> {
        self.client.set_token(None);
        self.set_current(None);
        self.credentials.clear().await?;
        Ok(())
    }

    fn set_current(&self, user: Option<User>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}
