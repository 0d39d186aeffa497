use std::sync::Arc;

use tokio::sync::mpsc;

use campus_core::Clock;
use campus_core::model::{OptionId, QuestionId, Quiz, SubmissionOutcome};

use super::lockout::{self, ShellAction, ShellDecision, StudentTab};
use super::session::{QcmSession, TickOutcome};
use super::timer::{TimerHandle, TimerTick};
use crate::error::SessionError;
use crate::submission_service::{SubmissionRequest, SubmissionService};

/// Where the student goes after dismissing the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDestination {
    Results,
    Catalog,
}

impl CompletionDestination {
    /// Dashboard tab that shows this destination.
    #[must_use]
    pub fn tab(self) -> StudentTab {
        match self {
            CompletionDestination::Results => StudentTab::Results,
            CompletionDestination::Catalog => StudentTab::Evaluations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Another attempt is still open; nothing changed.
    AlreadyActive,
}

/// Owner of the single quiz attempt.
///
/// All mutations go through `&mut self`, so the attempt, its countdown, and
/// the in-flight submission are serialized by construction. When a tick sink
/// is attached, timed attempts spawn a `TimerHandle` that feeds it; the host
/// forwards each received tick to `on_tick`.
pub struct QcmController {
    submissions: Arc<dyn SubmissionService>,
    clock: Clock,
    session: Option<QcmSession>,
    tick_sink: Option<mpsc::UnboundedSender<TimerTick>>,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
}

impl QcmController {
    #[must_use]
    pub fn new(submissions: Arc<dyn SubmissionService>, clock: Clock) -> Self {
        Self {
            submissions,
            clock,
            session: None,
            tick_sink: None,
            timer: None,
            next_timer_id: 0,
        }
    }

    /// Deliver countdown ticks to `sink` instead of relying on manual `tick` calls.
    #[must_use]
    pub fn with_tick_sink(mut self, sink: mpsc::UnboundedSender<TimerTick>) -> Self {
        self.tick_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn session(&self) -> Option<&QcmSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True while an attempt is open and has no result.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.session.as_ref().is_some_and(QcmSession::is_locked)
    }

    /// Host-shell guard for `action`.
    #[must_use]
    pub fn guard(&self, action: ShellAction) -> ShellDecision {
        let decision = lockout::decide(self.is_locked(), action);
        if let ShellDecision::Blocked { .. } = decision {
            tracing::warn!(?action, "navigation blocked by quiz in progress");
        }
        decision
    }

    /// Whether the countdown task is currently armed.
    #[must_use]
    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Open an attempt on `quiz`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if the quiz has no questions.
    pub fn start(&mut self, quiz: Quiz) -> Result<StartOutcome, SessionError> {
        if let Some(active) = &self.session {
            tracing::warn!(
                active = %active.quiz().id(),
                requested = %quiz.id(),
                "ignoring start while another attempt is open"
            );
            return Ok(StartOutcome::AlreadyActive);
        }

        let session = QcmSession::start(quiz, self.clock.now())?;
        tracing::info!(
            quiz_id = %session.quiz().id(),
            questions = session.question_count(),
            time_limit_secs = session.remaining_secs(),
            "quiz attempt started"
        );
        let timed = session.timer_running();
        self.session = Some(session);
        if timed {
            self.arm_timer();
        }
        Ok(StartOutcome::Started)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without an attempt, or
    /// `SessionError::AnswersLocked` once submission has begun.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        option: OptionId,
    ) -> Result<(), SessionError> {
        self.session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?
            .select_answer(question, option)
    }

    /// Handle a tick from the countdown task.
    ///
    /// Ticks from a timer that has since been disarmed are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the submission error if this tick triggered the auto-submit.
    pub async fn on_tick(&mut self, tick: TimerTick) -> Result<TickOutcome, SessionError> {
        let current = self.timer.as_ref().map(TimerHandle::id);
        if current != Some(tick.timer) {
            tracing::trace!(timer = tick.timer, "dropping stale tick");
            return Ok(TickOutcome::Idle);
        }
        self.tick().await
    }

    /// Advance the countdown one second; auto-submits when it reaches zero.
    ///
    /// # Errors
    ///
    /// Propagates the submission error if the countdown expired and the
    /// automatic submission failed.
    pub async fn tick(&mut self) -> Result<TickOutcome, SessionError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        let outcome = session.tick();
        if outcome == TickOutcome::Expired {
            let quiz_id = session.quiz().id();
            self.disarm_timer();
            tracing::info!(%quiz_id, "time is up, submitting");
            self.submit().await?;
        }
        Ok(outcome)
    }

    /// Send the attempt for correction.
    ///
    /// Partial answer maps are accepted. Once a result exists this returns it
    /// without contacting the backend again. After a failure the attempt
    /// stays locked and may be submitted again with the same elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without an attempt, or
    /// `SessionError::Submission` if the backend call failed.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        if let Some(outcome) = session.result() {
            return Ok(outcome.clone());
        }

        let elapsed_secs = session.begin_submission()?;
        self.disarm_timer();

        let Some(session) = self.session.as_mut() else {
            return Err(SessionError::NoActiveSession);
        };
        let request = SubmissionRequest {
            quiz_id: session.quiz().id(),
            answers: session.answers().clone(),
            elapsed_secs,
        };
        tracing::info!(
            quiz_id = %request.quiz_id,
            answered = request.answers.len(),
            questions = session.question_count(),
            elapsed_secs,
            "submitting quiz attempt"
        );

        match self.submissions.submit(&request).await {
            Ok(outcome) => {
                tracing::info!(
                    quiz_id = %request.quiz_id,
                    status = %outcome.status(),
                    "quiz attempt recorded"
                );
                session.complete(outcome.clone());
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(
                    quiz_id = %request.quiz_id,
                    error = %err,
                    "quiz submission failed"
                );
                session.fail(err.user_message());
                Err(err.into())
            }
        }
    }

    /// Close the completion screen and hand navigation back to the host.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without an attempt, or
    /// `SessionError::NotFinished` while the attempt has no result.
    pub fn dismiss(
        &mut self,
        destination: CompletionDestination,
    ) -> Result<CompletionDestination, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        if session.result().is_none() {
            return Err(SessionError::NotFinished);
        }
        tracing::info!(quiz_id = %session.quiz().id(), ?destination, "quiz attempt dismissed");
        self.disarm_timer();
        self.session = None;
        Ok(destination)
    }

    fn arm_timer(&mut self) {
        let Some(sink) = self.tick_sink.clone() else {
            return;
        };
        self.next_timer_id += 1;
        self.timer = Some(TimerHandle::spawn(
            self.next_timer_id,
            TimerHandle::PERIOD,
            sink,
        ));
    }

    fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
