use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::events::{AuthEvent, AuthEvents};
use crate::api::wire::ErrorBody;
use crate::config::ApiConfig;
use crate::error::ApiError;

/// JSON client for the academic backend.
///
/// Authenticated calls carry the current bearer token. A 401 on such a call
/// drops the token and publishes `AuthEvent::TokenExpired`; other failures
/// are handed back to the caller untouched.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    token: Arc<RwLock<Option<String>>>,
    events: AuthEvents,
}

impl ApiClient {
    /// Build a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig, events: AuthEvents) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            token: Arc::new(RwLock::new(None)),
            events,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Authenticated `GET`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, non-success statuses, or
    /// undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.config.url(path));
        self.send(request, true).await
    }

    /// Unauthenticated `POST`; a 401 here is an ordinary rejection.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, non-success statuses, or
    /// undecodable bodies.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.config.url(path)).json(body);
        self.send(request, false).await
    }

    /// Authenticated `POST` where any 2xx counts as accepted.
    ///
    /// A success body that does not decode falls back to `T::default()`
    /// instead of turning an accepted request into an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures and non-success statuses.
    pub async fn post_accepted<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = self.http.post(self.config.url(path)).json(body);
        let response = self.checked(request, true).await?;
        match response.json::<T>().await {
            Ok(decoded) => Ok(decoded),
            Err(err) => {
                tracing::warn!(path, error = %err, "accepted response has an unreadable body");
                Ok(T::default())
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        self.checked(request, authenticated)
            .await?
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Sends `request` and keeps the response only if its status is a success.
    async fn checked(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<Response, ApiError> {
        let request = match (authenticated, self.token()) {
            (true, Some(token)) => request.bearer_auth(token),
            _ => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if authenticated && status == StatusCode::UNAUTHORIZED {
            self.expire();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Rejected { status, message });
        }

        Ok(response)
    }

    fn expire(&self) {
        tracing::warn!("access token rejected by the backend, signing out");
        self.set_token(None);
        self.events.emit(AuthEvent::TokenExpired);
    }
}
