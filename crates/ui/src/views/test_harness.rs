use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campus_core::model::{GradedScore, Quiz, StudentProfile, StudentResult, SubmissionOutcome};
use campus_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    ApiClient, ApiConfig, ApiError, AuthEvents, AuthService, Clock, QuizCatalog, StudentProfiles,
    StudentResults, SubmissionRequest, SubmissionService,
};
use storage::repository::Storage;
use tokio::sync::mpsc;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    EvaluationsView, LoginNotice, LoginView, ProfileView, QcmState, ResultsView,
};

// ─── FAKE BACKEND ─────────────────────────────────────────────────────────────

pub struct FakeCatalog(pub Result<Vec<Quiz>, ApiError>);

#[async_trait]
impl QuizCatalog for FakeCatalog {
    async fn available_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        match &self.0 {
            Ok(quizzes) => Ok(quizzes.clone()),
            Err(_) => Err(ApiError::Decode("catalog unavailable".to_string())),
        }
    }
}

pub struct FakeResults(pub Option<Vec<StudentResult>>);

#[async_trait]
impl StudentResults for FakeResults {
    async fn my_results(&self) -> Result<Vec<StudentResult>, ApiError> {
        self.0.clone().ok_or(ApiError::Unauthorized)
    }
}

pub struct FakeProfile(pub Option<StudentProfile>);

#[async_trait]
impl StudentProfiles for FakeProfile {
    async fn my_profile(&self) -> Result<StudentProfile, ApiError> {
        self.0
            .clone()
            .ok_or_else(|| ApiError::Decode("profile unavailable".to_string()))
    }
}

/// Grades every submission 1/1 and records what was sent.
#[derive(Default)]
pub struct FakeSubmissions {
    pub sent: Mutex<VecDeque<SubmissionRequest>>,
}

#[async_trait]
impl SubmissionService for FakeSubmissions {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionOutcome, ApiError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push_back(request.clone());
        }
        Ok(SubmissionOutcome::Graded(GradedScore {
            score: 1,
            total: 1,
            percentage: 100.0,
            note: 20.0,
            feedback: "Excellent".to_string(),
        }))
    }
}

// ─── APP ──────────────────────────────────────────────────────────────────────

struct TestApp {
    clock: Clock,
    events: AuthEvents,
    auth: Arc<AuthService>,
    catalog: Arc<dyn QuizCatalog>,
    results: Arc<dyn StudentResults>,
    profiles: Arc<dyn StudentProfiles>,
    submissions: Arc<dyn SubmissionService>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn events(&self) -> AuthEvents {
        self.events.clone()
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn catalog(&self) -> Arc<dyn QuizCatalog> {
        Arc::clone(&self.catalog)
    }

    fn results(&self) -> Arc<dyn StudentResults> {
        Arc::clone(&self.results)
    }

    fn profiles(&self) -> Arc<dyn StudentProfiles> {
        Arc::clone(&self.profiles)
    }

    fn submissions(&self) -> Arc<dyn SubmissionService> {
        Arc::clone(&self.submissions)
    }

    fn initial_tab(&self) -> Option<services::StudentTab> {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Evaluations,
    Results,
    Profile,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    notice: Option<String>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);

    let notice = use_signal(|| props.notice.clone());
    use_context_provider(|| LoginNotice(notice));

    let view = use_signal(|| None);
    let busy = use_signal(|| false);
    let error = use_signal(|| None);
    use_context_provider(|| {
        let (ticks, _) = mpsc::unbounded_channel();
        QcmState::new(ctx.qcm_controller(ticks), view, busy, error)
    });

    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Evaluations => rsx! { EvaluationsView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub struct HarnessBuilder {
    view: ViewKind,
    catalog: Arc<dyn QuizCatalog>,
    results: Arc<dyn StudentResults>,
    profiles: Arc<dyn StudentProfiles>,
    notice: Option<String>,
}

impl HarnessBuilder {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            catalog: Arc::new(FakeCatalog(Ok(Vec::new()))),
            results: Arc::new(FakeResults(Some(Vec::new()))),
            profiles: Arc::new(FakeProfile(None)),
            notice: None,
        }
    }

    pub fn catalog(mut self, catalog: impl QuizCatalog + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn results(mut self, results: impl StudentResults + 'static) -> Self {
        self.results = Arc::new(results);
        self
    }

    pub fn profile(mut self, profiles: impl StudentProfiles + 'static) -> Self {
        self.profiles = Arc::new(profiles);
        self
    }

    pub fn notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }

    pub fn build(self) -> ViewHarness {
        let clock = Clock::fixed(fixed_now());
        let events = AuthEvents::new();
        // Nothing listens here; the views under test never reach the network.
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:9"), events.clone())
            .expect("http client");
        let storage = Storage::in_memory();
        let auth = Arc::new(AuthService::new(client, storage.credentials, clock));

        let app = Arc::new(TestApp {
            clock,
            events,
            auth,
            catalog: self.catalog,
            results: self.results,
            profiles: self.profiles,
            submissions: Arc::new(FakeSubmissions::default()),
        });
        let dom = VirtualDom::new_with_props(
            ViewRouterHarness,
            ViewHarnessProps {
                app,
                view: self.view,
                notice: self.notice,
            },
        );
        ViewHarness { dom }
    }
}
