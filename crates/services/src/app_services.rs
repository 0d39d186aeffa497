use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use storage::repository::Storage;

use crate::Clock;
use crate::api::{ApiClient, AuthEvent, AuthEvents};
use crate::auth_service::AuthService;
use crate::catalog_service::{HttpQuizCatalog, QuizCatalog};
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::profile_service::{HttpProfileService, StudentProfiles};
use crate::qcm::{QcmController, TimerTick};
use crate::results_service::{HttpResultsService, StudentResults};
use crate::submission_service::{HttpSubmissionService, SubmissionService};

/// Assembles app-facing services around one API client and credential store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    events: AuthEvents,
    auth: Arc<AuthService>,
    catalog: Arc<dyn QuizCatalog>,
    results: Arc<dyn StudentResults>,
    profiles: Arc<dyn StudentProfiles>,
    submissions: Arc<dyn SubmissionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` credential storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or HTTP client
    /// construction fails.
    pub async fn new_sqlite(
        db_url: &str,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::with_storage(storage, api, clock)
    }

    /// Build services that keep credentials in memory only.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be constructed.
    pub fn in_memory(api: ApiConfig, clock: Clock) -> Result<Self, AppServicesError> {
        Self::with_storage(Storage::in_memory(), api, clock)
    }

    fn with_storage(
        storage: Storage,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let events = AuthEvents::new();
        let client = ApiClient::new(api, events.clone())?;

        let auth = Arc::new(AuthService::new(
            client.clone(),
            Arc::clone(&storage.credentials),
            clock,
        ));
        let catalog: Arc<dyn QuizCatalog> = Arc::new(HttpQuizCatalog::new(client.clone()));
        let results: Arc<dyn StudentResults> = Arc::new(HttpResultsService::new(client.clone()));
        let profiles: Arc<dyn StudentProfiles> = Arc::new(HttpProfileService::new(client.clone()));
        let submissions: Arc<dyn SubmissionService> =
            Arc::new(HttpSubmissionService::new(client));

        Ok(Self {
            clock,
            events,
            auth,
            catalog,
            results,
            profiles,
            submissions,
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<dyn QuizCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn results(&self) -> Arc<dyn StudentResults> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<dyn StudentProfiles> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn submissions(&self) -> Arc<dyn SubmissionService> {
        Arc::clone(&self.submissions)
    }

    /// A fresh controller whose countdown ticks are delivered to `ticks`.
    #[must_use]
    pub fn qcm_controller(&self, ticks: mpsc::UnboundedSender<TimerTick>) -> QcmController {
        QcmController::new(self.submissions(), self.clock).with_tick_sink(ticks)
    }

    /// Wipe stored credentials whenever the backend reports the token expired.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn_expiry_watcher(&self) -> JoinHandle<()> {
        let auth = self.auth();
        let mut events = self.events.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::TokenExpired) => {
                        if let Err(err) = auth.forget_expired().await {
                            tracing::error!(error = %err, "failed to clear expired credentials");
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "auth event watcher lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
