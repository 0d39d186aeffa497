use chrono::{DateTime, Utc};

use campus_core::model::{AnswerMap, OptionId, QuestionId, Quiz, QuizError, SubmissionOutcome};

use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where an attempt stands between start and dismissal.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptPhase {
    /// Student is answering; the countdown may be running.
    Answering,
    /// Handed to the submission service, response outstanding.
    Submitting,
    /// Last submission failed; answers stay frozen and a retry is allowed.
    Failed { message: String },
    /// Terminal. The attempt can only be dismissed.
    Completed(SubmissionOutcome),
}

/// What a single one-second tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running; nothing changed.
    Idle,
    Counting { remaining_secs: u32 },
    /// Countdown reached zero; the attempt must be submitted.
    Expired,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one quiz attempt.
///
/// Pure bookkeeping: no I/O and no timers. `QcmController` drives it and
/// owns the tick task.
#[derive(Debug, Clone)]
pub struct QcmSession {
    quiz: Quiz,
    answers: AnswerMap,
    remaining_secs: u32,
    timer_running: bool,
    phase: AttemptPhase,
    started_at: DateTime<Utc>,
    frozen_elapsed: Option<u32>,
}

impl QcmSession {
    /// Open an attempt on `quiz`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if the quiz has nothing to answer.
    pub fn start(quiz: Quiz, started_at: DateTime<Utc>) -> Result<Self, QuizError> {
        quiz.ensure_attemptable()?;
        let (remaining_secs, timer_running) = match quiz.time_limit_secs() {
            Some(limit) => (limit, true),
            None => (0, false),
        };

        Ok(Self {
            quiz,
            answers: AnswerMap::new(),
            remaining_secs,
            timer_running,
            phase: AttemptPhase::Answering,
            started_at,
            frozen_elapsed: None,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    #[must_use]
    pub fn phase(&self) -> &AttemptPhase {
        &self.phase
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn result(&self) -> Option<&SubmissionOutcome> {
        match &self.phase {
            AttemptPhase::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Message of the last failed submission, if the attempt is stuck on one.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            AttemptPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// True until a result is recorded.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.result().is_none()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    /// Whether the manual submit control should be enabled.
    ///
    /// While answering that requires every question answered; after a failed
    /// submission the same answers may be sent again.
    #[must_use]
    pub fn can_submit_manually(&self) -> bool {
        match self.phase {
            AttemptPhase::Answering => self.answers.covers(&self.quiz),
            AttemptPhase::Failed { .. } => true,
            AttemptPhase::Submitting | AttemptPhase::Completed(_) => false,
        }
    }

    /// Seconds spent so far, or the value frozen by the first submission.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(frozen) = self.frozen_elapsed {
            return frozen;
        }
        self.quiz
            .time_limit_secs()
            .map_or(0, |limit| limit.saturating_sub(self.remaining_secs))
    }

    /// Record `option` as the answer to `question`, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AnswersLocked` once submission has begun.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        option: OptionId,
    ) -> Result<(), SessionError> {
        if self.phase != AttemptPhase::Answering {
            return Err(SessionError::AnswersLocked);
        }
        self.answers.select(question, option);
        Ok(())
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.timer_running {
            return TickOutcome::Idle;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return TickOutcome::Counting {
                remaining_secs: self.remaining_secs,
            };
        }
        self.remaining_secs = 0;
        self.timer_running = false;
        TickOutcome::Expired
    }

    /// Stop the countdown and freeze the elapsed time for this attempt.
    ///
    /// Returns the elapsed seconds to send.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` once a result exists, or
    /// `SessionError::SubmissionInFlight` while a response is outstanding.
    pub fn begin_submission(&mut self) -> Result<u32, SessionError> {
        match self.phase {
            AttemptPhase::Completed(_) => return Err(SessionError::AlreadySubmitted),
            AttemptPhase::Submitting => return Err(SessionError::SubmissionInFlight),
            AttemptPhase::Answering | AttemptPhase::Failed { .. } => {}
        }
        let elapsed = self.elapsed_secs();
        self.timer_running = false;
        self.frozen_elapsed = Some(elapsed);
        self.phase = AttemptPhase::Submitting;
        Ok(elapsed)
    }

    pub fn complete(&mut self, outcome: SubmissionOutcome) {
        self.timer_running = false;
        self.phase = AttemptPhase::Completed(outcome);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.timer_running = false;
        self.phase = AttemptPhase::Failed {
            message: message.into(),
        };
    }
}
