use std::sync::Arc;

use services::qcm::StudentTab;
use services::{
    AuthEvents, AuthService, Clock, QcmController, QuizCatalog, StudentProfiles, StudentResults,
    SubmissionService, TimerTick,
};
use tokio::sync::mpsc;

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn events(&self) -> AuthEvents;

    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<dyn QuizCatalog>;
    fn results(&self) -> Arc<dyn StudentResults>;
    fn profiles(&self) -> Arc<dyn StudentProfiles>;
    fn submissions(&self) -> Arc<dyn SubmissionService>;

    /// Student tab that was open when the app last closed.
    fn initial_tab(&self) -> Option<StudentTab>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    events: AuthEvents,
    auth: Arc<AuthService>,
    catalog: Arc<dyn QuizCatalog>,
    results: Arc<dyn StudentResults>,
    profiles: Arc<dyn StudentProfiles>,
    submissions: Arc<dyn SubmissionService>,
    initial_tab: Option<StudentTab>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            events: app.events(),
            auth: app.auth(),
            catalog: app.catalog(),
            results: app.results(),
            profiles: app.profiles(),
            submissions: app.submissions(),
            initial_tab: app.initial_tab(),
        }
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
    pub fn initial_tab(&self) -> StudentTab {
        self.initial_tab.unwrap_or(StudentTab::Evaluations)
    }

    /// A controller for a new student shell, feeding countdown ticks to `ticks`.
    #[must_use]
    pub fn qcm_controller(&self, ticks: mpsc::UnboundedSender<TimerTick>) -> QcmController {
        QcmController::new(Arc::clone(&self.submissions), self.clock).with_tick_sink(ticks)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
