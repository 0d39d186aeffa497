use std::sync::Arc;

use campus_core::model::{
    GradedScore, OptionId, Question, QuestionId, Quiz, QuizId, QuizOption, ResultStatus,
    StudentProfile, StudentResult, SubjectMark, SubmissionOutcome,
};
use campus_core::time::fixed_now;
use dioxus::prelude::*;
use services::{ApiError, Clock, CompletionDestination, QcmController};

use super::test_harness::{
    FakeCatalog, FakeProfile, FakeResults, FakeSubmissions, HarnessBuilder, ViewKind, drive_dom,
};
use crate::views::{CompletionPanel, QcmScreen, ResultsTable};
use crate::vm::{CompletionVm, QcmVm, ResultRowVm, map_result_rows};

fn quiz(duration_minutes: Option<u32>) -> Quiz {
    Quiz::new(
        QuizId::new(3),
        "Ownership",
        duration_minutes,
        vec![Question::new(
            QuestionId::new(1),
            "Which keyword moves a value into a closure?",
            vec![
                QuizOption::new("1_1", "move", true),
                QuizOption::new("1_2", "ref", false),
            ],
        )],
    )
}

fn result_row(id: u64, status: ResultStatus) -> StudentResult {
    StudentResult {
        id,
        note: 12.0,
        percentage: 60.0,
        feedback: None,
        dated_at: None,
        correct_count: 3,
        incorrect_count: 2,
        elapsed_secs: 40,
        quiz_id: QuizId::new(3),
        quiz_title: format!("Quiz {id}"),
        status,
    }
}

fn snapshot(controller: &QcmController) -> QcmVm {
    QcmVm::snapshot(controller).expect("active attempt")
}

// ─── PRESENTATIONAL ───────────────────────────────────────────────────────────

#[component]
fn QcmScreenFixture(vm: QcmVm, busy: bool) -> Element {
    rsx! {
        QcmScreen {
            vm,
            busy,
            error: None,
            on_select: move |_: (QuestionId, OptionId)| {},
            on_submit: move |()| {},
            on_dismiss: move |_: CompletionDestination| {},
        }
    }
}

#[component]
fn CompletionFixture(completion: CompletionVm) -> Element {
    rsx! {
        CompletionPanel { completion, on_dismiss: move |_: CompletionDestination| {} }
    }
}

#[component]
fn ResultsTableFixture(rows: Vec<ResultRowVm>) -> Element {
    rsx! { ResultsTable { rows } }
}

fn render_qcm(vm: QcmVm, busy: bool) -> String {
    let mut dom = VirtualDom::new_with_props(
        QcmScreenFixture,
        QcmScreenFixtureProps { vm, busy },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}

#[test]
fn qcm_screen_shows_countdown_and_disabled_submit() {
    let mut controller = QcmController::new(
        Arc::new(FakeSubmissions::default()),
        Clock::fixed(fixed_now()),
    );
    controller.start(quiz(Some(1))).expect("start");

    let html = render_qcm(snapshot(&controller), false);
    assert!(html.contains("Time left: 1:00"), "missing countdown in {html}");
    assert!(html.contains("Which keyword moves a value into a closure?"));
    assert!(html.contains("0/1 answered, 1 left"), "missing progress in {html}");
    assert!(html.contains("Started at"), "missing start time in {html}");
    assert!(html.contains("disabled"), "submit should be disabled in {html}");
}

#[test]
fn untimed_qcm_has_no_countdown() {
    let mut controller = QcmController::new(
        Arc::new(FakeSubmissions::default()),
        Clock::fixed(fixed_now()),
    );
    controller.start(quiz(None)).expect("start");
    controller
        .select_answer(QuestionId::new(1), OptionId::new("1_1"))
        .expect("select");

    let html = render_qcm(snapshot(&controller), false);
    assert!(!html.contains("Time left"), "unexpected countdown in {html}");
    assert!(html.contains("1/1 answered"));
    assert!(html.contains("Submit"), "missing submit button in {html}");
    assert!(!html.contains("Submitting..."));
}

#[test]
fn busy_qcm_shows_submitting_label() {
    let mut controller = QcmController::new(
        Arc::new(FakeSubmissions::default()),
        Clock::fixed(fixed_now()),
    );
    controller.start(quiz(Some(5))).expect("start");

    let html = render_qcm(snapshot(&controller), true);
    assert!(html.contains("Submitting..."), "missing busy label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn completed_qcm_renders_completion_panel() {
    let mut controller = QcmController::new(
        Arc::new(FakeSubmissions::default()),
        Clock::fixed(fixed_now()),
    );
    controller.start(quiz(None)).expect("start");
    controller
        .select_answer(QuestionId::new(1), OptionId::new("1_1"))
        .expect("select");
    controller.submit().await.expect("submit");

    let html = render_qcm(snapshot(&controller), false);
    assert!(html.contains("Quiz passed"), "missing headline in {html}");
    assert!(html.contains("Score: 1/1"));
    assert!(html.contains("See my results"));
    assert!(html.contains("Back to evaluations"));
}

#[test]
fn pending_completion_explains_manual_correction() {
    let completion = CompletionVm::from(&SubmissionOutcome::Pending {
        message: "Copie soumise".to_string(),
        submission_id: Some(9),
    });
    let mut dom = VirtualDom::new_with_props(
        CompletionFixture,
        CompletionFixtureProps { completion },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Quiz submitted"), "missing headline in {html}");
    assert!(html.contains("Copie soumise"));
    assert!(!html.contains("Score:"));
}

#[test]
fn failing_grade_is_not_labelled_passed() {
    let completion = CompletionVm::from(&SubmissionOutcome::Graded(GradedScore {
        score: 1,
        total: 4,
        percentage: 25.0,
        note: 5.0,
        feedback: String::new(),
    }));
    let mut dom = VirtualDom::new_with_props(
        CompletionFixture,
        CompletionFixtureProps { completion },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Quiz completed"), "missing headline in {html}");
    assert!(html.contains("Mark: 5.0/20"));
}

#[test]
fn results_table_marks_pending_rows() {
    let rows = map_result_rows(&[
        result_row(1, ResultStatus::Corrected),
        result_row(2, ResultStatus::Submitted),
    ]);
    let mut dom = VirtualDom::new_with_props(ResultsTableFixture, ResultsTableFixtureProps { rows });
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("12.0/20"), "missing graded mark in {html}");
    assert!(html.contains("Awaiting correction"));
    assert!(html.contains("class=\"pending\""));
}

// ─── ROUTED VIEWS ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "current_thread")]
async fn results_view_lists_rows() {
    let mut harness = HarnessBuilder::new(ViewKind::Results)
        .results(FakeResults(Some(vec![result_row(5, ResultStatus::Corrected)])))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("My results"), "missing heading in {html}");
    assert!(html.contains("Quiz 5"), "missing row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_reports_expired_session() {
    let mut harness = HarnessBuilder::new(ViewKind::Results)
        .results(FakeResults(None))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Your session has expired"), "missing error in {html}");
    assert!(html.contains("Retry"));
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_shows_academic_record() {
    let profile = StudentProfile {
        full_name: Some("sara".to_string()),
        matricule: Some("ETU-042".to_string()),
        email: Some("sara@campus.mg".to_string()),
        mention: Some("Informatique".to_string()),
        track: Some("GL".to_string()),
        level: Some("L3".to_string()),
        academic_year: Some("2024-2025".to_string()),
        phone: None,
        marks: vec![
            SubjectMark { subject: "Algorithmique".to_string(), mark: 13.5 },
            SubjectMark { subject: "Réseaux".to_string(), mark: 8.0 },
        ],
    };
    let mut harness = HarnessBuilder::new(ViewKind::Profile)
        .profile(FakeProfile(Some(profile)))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("ETU-042"), "missing matricule in {html}");
    assert!(html.contains("Informatique"));
    assert!(html.contains("2024-2025"));
    assert!(html.contains("Not provided"), "missing phone fallback in {html}");
    assert!(html.contains("Marks by subject"));
    assert!(html.contains("13.5/20"));
    assert!(html.contains("class=\"failing\""), "missing failing mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_offers_retry_on_failure() {
    let mut harness = HarnessBuilder::new(ViewKind::Profile)
        .profile(FakeProfile(None))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"));
}

#[tokio::test(flavor = "current_thread")]
async fn evaluations_view_lists_catalog() {
    let mut harness = HarnessBuilder::new(ViewKind::Evaluations)
        .catalog(FakeCatalog(Ok(vec![quiz(Some(10)), Quiz::new(
            QuizId::new(4),
            "Empty draft",
            None,
            Vec::new(),
        )])))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Ownership"), "missing quiz in {html}");
    assert!(html.contains("10 min"));
    assert!(html.contains("Untimed"));
}

#[tokio::test(flavor = "current_thread")]
async fn evaluations_view_reports_catalog_failure() {
    let mut harness = HarnessBuilder::new(ViewKind::Evaluations)
        .catalog(FakeCatalog(Err(ApiError::Decode("bad".to_string()))))
        .build();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_shows_notice() {
    let mut harness = HarnessBuilder::new(ViewKind::Login)
        .notice("Your session has expired. Please sign in again.")
        .build();
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Sign in"), "missing form in {html}");
    assert!(html.contains("Your session has expired"), "missing notice in {html}");
}
