use campus_core::model::{Quiz, QuizId};

use crate::vm::time_fmt::format_backend_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: QuizId,
    pub title: String,
    pub difficulty: String,
    pub exercise_type: String,
    pub duration: String,
    pub question_count: usize,
    pub created_at: Option<String>,
    pub startable: bool,
}

impl From<&Quiz> for QuizCardVm {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().to_string(),
            difficulty: quiz.difficulty().to_string(),
            exercise_type: quiz.exercise_type().to_string(),
            duration: quiz
                .duration_minutes()
                .filter(|minutes| *minutes > 0)
                .map_or_else(|| "Untimed".to_string(), |minutes| format!("{minutes} min")),
            question_count: quiz.question_count(),
            created_at: quiz.created_at().map(format_backend_date),
            startable: quiz.ensure_attemptable().is_ok(),
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[Quiz]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from).collect()
}
