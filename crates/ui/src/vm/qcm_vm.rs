use campus_core::model::{OptionId, QuestionId, QuizId, SubmissionOutcome};
use services::{AttemptPhase, QcmController, QcmSession};

use crate::vm::time_fmt::format_clock;

/// Remaining seconds under which the countdown is highlighted.
const URGENT_SECS: u32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct OptionVm {
    pub id: OptionId,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CompletionVm {
    Pending {
        message: String,
    },
    Graded {
        score: u32,
        total: u32,
        percentage: String,
        note: String,
        feedback: String,
        passing: bool,
    },
}

impl From<&SubmissionOutcome> for CompletionVm {
    fn from(outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Pending { message, .. } => CompletionVm::Pending {
                message: message.clone(),
            },
            SubmissionOutcome::Graded(score) => CompletionVm::Graded {
                score: score.score,
                total: score.total,
                percentage: format!("{:.0}%", score.percentage),
                note: format!("{:.1}/20", score.note),
                feedback: score.feedback.clone(),
                passing: score.is_passing(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QcmPhaseVm {
    Answering,
    Submitting,
    Failed(String),
    Completed(CompletionVm),
}

/// Render snapshot of the open attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct QcmVm {
    pub quiz_id: QuizId,
    pub title: String,
    pub difficulty: String,
    pub questions: Vec<QuestionVm>,
    /// `m:ss` countdown; `None` for untimed quizzes.
    pub countdown: Option<String>,
    pub urgent: bool,
    pub answered: usize,
    pub unanswered: usize,
    pub total: usize,
    /// Local wall-clock time the attempt started, `HH:MM`.
    pub started: String,
    pub can_submit: bool,
    pub locked: bool,
    pub phase: QcmPhaseVm,
}

impl QcmVm {
    #[must_use]
    pub fn from_session(session: &QcmSession) -> Self {
        let answers = session.answers();
        let questions = session
            .quiz()
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionVm {
                id: question.id(),
                number: index + 1,
                text: question.text().to_string(),
                options: question
                    .options()
                    .iter()
                    .map(|option| OptionVm {
                        id: option.id().clone(),
                        text: option.text().to_string(),
                        selected: answers.is_selected(question.id(), option.id()),
                    })
                    .collect(),
            })
            .collect();

        let timed = session.quiz().is_timed();
        let phase = match session.phase() {
            AttemptPhase::Answering => QcmPhaseVm::Answering,
            AttemptPhase::Submitting => QcmPhaseVm::Submitting,
            AttemptPhase::Failed { message } => QcmPhaseVm::Failed(message.clone()),
            AttemptPhase::Completed(outcome) => QcmPhaseVm::Completed(outcome.into()),
        };

        Self {
            quiz_id: session.quiz().id(),
            title: session.quiz().title().to_string(),
            difficulty: session.quiz().difficulty().to_string(),
            questions,
            countdown: timed.then(|| format_clock(session.remaining_secs())),
            urgent: session.timer_running() && session.remaining_secs() <= URGENT_SECS,
            answered: session.answered_count(),
            unanswered: answers.unanswered(session.quiz()),
            total: session.question_count(),
            started: session
                .started_at()
                .with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string(),
            can_submit: session.can_submit_manually(),
            locked: session.is_locked(),
            phase,
        }
    }

    /// Snapshot of whatever attempt `controller` holds.
    #[must_use]
    pub fn snapshot(controller: &QcmController) -> Option<Self> {
        controller.session().map(Self::from_session)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, QcmPhaseVm::Completed(_))
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        match self.unanswered {
            0 => format!("{}/{} answered", self.answered, self.total),
            left => format!("{}/{} answered, {left} left", self.answered, self.total),
        }
    }
}
