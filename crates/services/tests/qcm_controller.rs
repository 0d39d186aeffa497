use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use campus_core::model::{
    GradedScore, OptionId, Question, QuestionId, Quiz, QuizId, QuizOption, SubmissionOutcome,
};
use campus_core::time::fixed_now;
use services::qcm::lockout::LOGOUT_WARNING;
use services::{
    ApiError, AttemptPhase, Clock, CompletionDestination, QcmController, SessionError,
    ShellAction, ShellDecision, StartOutcome, StudentTab, SubmissionRequest, SubmissionService,
    TickOutcome, TimerTick,
};
use tokio::sync::mpsc;

//
// ─── FAKES ─────────────────────────────────────────────────────────────────────
//

/// Records every request and replays queued responses (graded by default).
#[derive(Default)]
struct RecordingSubmissions {
    calls: Mutex<Vec<SubmissionRequest>>,
    responses: Mutex<VecDeque<Result<SubmissionOutcome, ApiError>>>,
}

impl RecordingSubmissions {
    fn queue(&self, response: Result<SubmissionOutcome, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<SubmissionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionService for RecordingSubmissions {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionOutcome, ApiError> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(graded()))
    }
}

fn graded() -> SubmissionOutcome {
    SubmissionOutcome::Graded(GradedScore {
        score: 2,
        total: 2,
        percentage: 100.0,
        note: 20.0,
        feedback: "Excellent".into(),
    })
}

fn pending() -> SubmissionOutcome {
    SubmissionOutcome::Pending {
        message: "Awaiting correction".into(),
        submission_id: Some(12),
    }
}

fn two_question_quiz(duration_minutes: Option<u32>) -> Quiz {
    let questions = (1..=2)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Question {id}"),
                vec![
                    QuizOption::new(OptionId::new(format!("{id}_1")), "first", true),
                    QuizOption::new(OptionId::new(format!("{id}_2")), "second", false),
                ],
            )
        })
        .collect();
    Quiz::new(QuizId::new(42), "Rust basics", duration_minutes, questions)
}

fn controller() -> (QcmController, Arc<RecordingSubmissions>) {
    let fake = Arc::new(RecordingSubmissions::default());
    let controller = QcmController::new(fake.clone(), Clock::fixed(fixed_now()));
    (controller, fake)
}

fn answer(controller: &mut QcmController, question: u64, option: &str) {
    controller
        .select_answer(QuestionId::new(question), OptionId::new(option))
        .unwrap();
}

//
// ─── START ─────────────────────────────────────────────────────────────────────
//

#[test]
fn untimed_start_leaves_timer_stopped() {
    for duration in [None, Some(0)] {
        let (mut controller, _) = controller();
        controller.start(two_question_quiz(duration)).unwrap();

        let session = controller.session().unwrap();
        assert!(!session.timer_running());
        assert_eq!(session.remaining_secs(), 0);
        assert!(!controller.timer_armed());
    }
}

#[test]
fn timed_start_counts_down_from_duration() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(Some(5))).unwrap();

    let session = controller.session().unwrap();
    assert!(session.timer_running());
    assert_eq!(session.remaining_secs(), 300);
    assert!(session.answers().is_empty());
    assert!(session.result().is_none());
}

#[test]
fn start_is_ignored_while_an_attempt_is_open() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(None)).unwrap();
    answer(&mut controller, 1, "1_1");

    let other = Quiz::new(QuizId::new(7), "Other", Some(1), Vec::new());
    assert_eq!(controller.start(other).unwrap(), StartOutcome::AlreadyActive);

    let session = controller.session().unwrap();
    assert_eq!(session.quiz().id(), QuizId::new(42));
    assert_eq!(session.answered_count(), 1);
}

#[test]
fn start_rejects_quiz_without_questions() {
    let (mut controller, _) = controller();
    let empty = Quiz::new(QuizId::new(3), "Empty", None, Vec::new());

    assert!(matches!(controller.start(empty), Err(SessionError::Quiz(_))));
    assert!(!controller.is_active());
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

#[test]
fn selecting_same_option_twice_changes_nothing() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(None)).unwrap();

    answer(&mut controller, 1, "1_2");
    let after_first = controller.session().unwrap().answers().clone();
    answer(&mut controller, 1, "1_2");

    assert_eq!(controller.session().unwrap().answers(), &after_first);
}

#[test]
fn selecting_another_option_overwrites() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(None)).unwrap();

    answer(&mut controller, 1, "1_1");
    answer(&mut controller, 1, "1_2");

    let answers = controller.session().unwrap().answers();
    assert_eq!(answers.len(), 1);
    assert_eq!(
        answers.get(QuestionId::new(1)),
        Some(&OptionId::new("1_2"))
    );
}

#[test]
fn selecting_without_attempt_fails() {
    let (mut controller, _) = controller();
    let err = controller
        .select_answer(QuestionId::new(1), OptionId::new("1_1"))
        .unwrap_err();
    assert!(matches!(err, SessionError::NoActiveSession));
}

//
// ─── TIMER ─────────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn countdown_expires_after_exactly_n_ticks_and_submits_once() {
    let (mut controller, fake) = controller();
    controller.start(two_question_quiz(Some(1))).unwrap();

    for expected in (1..60).rev() {
        assert_eq!(
            controller.tick().await.unwrap(),
            TickOutcome::Counting {
                remaining_secs: expected
            }
        );
        assert!(fake.calls().is_empty());
    }
    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Expired);
    assert_eq!(fake.calls().len(), 1);

    let session = controller.session().unwrap();
    assert!(!session.timer_running());
    assert_eq!(session.remaining_secs(), 0);

    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Idle);
    assert_eq!(fake.calls().len(), 1);
}

#[tokio::test]
async fn untimed_attempt_ignores_ticks() {
    let (mut controller, fake) = controller();
    controller.start(two_question_quiz(None)).unwrap();

    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Idle);
    assert!(fake.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn tick_task_drives_auto_submission_and_stops() {
    let fake = Arc::new(RecordingSubmissions::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller =
        QcmController::new(fake.clone(), Clock::fixed(fixed_now())).with_tick_sink(tx);

    controller.start(two_question_quiz(Some(1))).unwrap();
    assert!(controller.timer_armed());
    answer(&mut controller, 2, "2_1");

    let mut received = 0;
    loop {
        let tick = rx.recv().await.unwrap();
        received += 1;
        if controller.on_tick(tick).await.unwrap() == TickOutcome::Expired {
            break;
        }
    }

    assert_eq!(received, 60);
    assert!(!controller.timer_armed());
    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].elapsed_secs, 60);
    assert_eq!(calls[0].answers.len(), 1);

    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn ticks_from_unknown_timer_are_dropped() {
    let fake = Arc::new(RecordingSubmissions::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut controller = QcmController::new(fake, Clock::fixed(fixed_now())).with_tick_sink(tx);
    controller.start(two_question_quiz(Some(1))).unwrap();

    let outcome = controller.on_tick(TimerTick { timer: 999 }).await.unwrap();

    assert_eq!(outcome, TickOutcome::Idle);
    assert_eq!(controller.session().unwrap().remaining_secs(), 60);
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn submit_after_result_is_a_no_op() {
    let (mut controller, fake) = controller();
    fake.queue(Ok(pending()));
    fake.queue(Ok(graded()));
    controller.start(two_question_quiz(None)).unwrap();

    let first = controller.submit().await.unwrap();
    let second = controller.submit().await.unwrap();

    assert_eq!(first, pending());
    assert_eq!(second, pending());
    assert_eq!(fake.calls().len(), 1);
    assert_eq!(controller.session().unwrap().result(), Some(&pending()));
}

#[tokio::test]
async fn lock_holds_exactly_while_attempt_has_no_result() {
    let (mut controller, _) = controller();
    assert!(!controller.is_locked());

    controller.start(two_question_quiz(None)).unwrap();
    assert!(controller.is_locked());

    controller.submit().await.unwrap();
    assert!(!controller.is_locked());

    controller.dismiss(CompletionDestination::Catalog).unwrap();
    assert!(!controller.is_locked());
}

#[tokio::test]
async fn failed_submission_stays_locked_and_retries_with_frozen_time() {
    let (mut controller, fake) = controller();
    fake.queue(Err(ApiError::Decode("gateway timeout".into())));
    controller.start(two_question_quiz(Some(1))).unwrap();
    for _ in 0..15 {
        controller.tick().await.unwrap();
    }

    let err = controller.submit().await.unwrap_err();
    assert!(matches!(err, SessionError::Submission(_)));

    let session = controller.session().unwrap();
    assert!(session.result().is_none());
    assert!(!session.timer_running());
    assert!(matches!(session.phase(), AttemptPhase::Failed { .. }));
    assert!(session.can_submit_manually());
    assert!(controller.is_locked());

    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Idle);
    assert!(matches!(
        controller.select_answer(QuestionId::new(1), OptionId::new("1_1")),
        Err(SessionError::AnswersLocked)
    ));

    controller.submit().await.unwrap();
    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].elapsed_secs, 15);
    assert_eq!(calls[1].elapsed_secs, 15);
    assert!(!controller.is_locked());
}

#[tokio::test]
async fn dismiss_requires_a_result() {
    let (mut controller, _) = controller();
    assert!(matches!(
        controller.dismiss(CompletionDestination::Results),
        Err(SessionError::NoActiveSession)
    ));

    controller.start(two_question_quiz(None)).unwrap();
    assert!(matches!(
        controller.dismiss(CompletionDestination::Results),
        Err(SessionError::NotFinished)
    ));
    assert!(controller.is_active());
}

//
// ─── SCENARIOS ─────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn untimed_attempt_submits_full_answers_with_zero_elapsed() {
    let (mut controller, fake) = controller();
    controller.start(two_question_quiz(None)).unwrap();
    assert!(!controller.session().unwrap().timer_running());

    answer(&mut controller, 1, "1_1");
    answer(&mut controller, 2, "2_2");
    assert!(controller.session().unwrap().can_submit_manually());

    let outcome = controller.submit().await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].quiz_id, QuizId::new(42));
    assert_eq!(calls[0].elapsed_secs, 0);
    assert_eq!(calls[0].answers.len(), 2);
    assert_eq!(outcome, graded());
    assert!(!controller.is_locked());
}

#[tokio::test]
async fn one_minute_attempt_auto_submits_after_sixty_ticks() {
    let (mut controller, fake) = controller();
    controller.start(two_question_quiz(Some(1))).unwrap();
    assert_eq!(controller.session().unwrap().remaining_secs(), 60);
    answer(&mut controller, 1, "1_2");

    for _ in 0..60 {
        controller.tick().await.unwrap();
    }

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].elapsed_secs, 60);
    assert_eq!(calls[0].answers.len(), 1);
    assert!(!controller.session().unwrap().timer_running());
}

#[tokio::test]
async fn manual_submit_sends_partial_answers_and_elapsed_time() {
    let (mut controller, fake) = controller();
    controller.start(two_question_quiz(Some(1))).unwrap();
    answer(&mut controller, 1, "1_1");
    for _ in 0..20 {
        controller.tick().await.unwrap();
    }
    assert_eq!(controller.session().unwrap().remaining_secs(), 40);

    controller.submit().await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls[0].elapsed_secs, 20);
    assert_eq!(calls[0].answers.len(), 1);
    assert!(calls[0].answers.get(QuestionId::new(2)).is_none());
    assert!(!controller.session().unwrap().timer_running());
}

#[tokio::test]
async fn dismissing_pending_result_resets_and_targets_catalog() {
    let (mut controller, fake) = controller();
    fake.queue(Ok(pending()));
    controller.start(two_question_quiz(None)).unwrap();
    controller.submit().await.unwrap();
    assert!(controller.session().unwrap().result().unwrap().is_pending());

    let destination = controller.dismiss(CompletionDestination::Catalog).unwrap();

    assert_eq!(destination, CompletionDestination::Catalog);
    assert_eq!(destination.tab(), StudentTab::Evaluations);
    assert_eq!(CompletionDestination::Results.tab(), StudentTab::Results);
    assert!(controller.session().is_none());
    assert_eq!(
        controller.start(two_question_quiz(None)).unwrap(),
        StartOutcome::Started
    );
}

#[tokio::test]
async fn logout_is_blocked_during_attempt_without_touching_it() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(Some(2))).unwrap();
    answer(&mut controller, 1, "1_1");
    controller.tick().await.unwrap();
    let before = controller.session().unwrap().clone();

    let decision = controller.guard(ShellAction::Logout);

    assert_eq!(
        decision,
        ShellDecision::Blocked {
            warning: LOGOUT_WARNING
        }
    );
    let after = controller.session().unwrap();
    assert_eq!(after.answers(), before.answers());
    assert_eq!(after.remaining_secs(), before.remaining_secs());
    assert!(after.timer_running());
    assert!(controller.is_locked());
}

#[tokio::test]
async fn navigation_is_unrestricted_once_a_result_exists() {
    let (mut controller, _) = controller();
    controller.start(two_question_quiz(None)).unwrap();
    assert!(matches!(
        controller.guard(ShellAction::SwitchTab(StudentTab::Results)),
        ShellDecision::Blocked { .. }
    ));
    assert!(matches!(
        controller.guard(ShellAction::CloseWindow),
        ShellDecision::Confirm { .. }
    ));

    controller.submit().await.unwrap();

    assert!(controller.guard(ShellAction::Logout).is_allowed());
    assert!(controller.guard(ShellAction::CloseWindow).is_allowed());
}
