use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId, QuizId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz {0} has no questions")]
    NoQuestions(QuizId),
}

//
// ─── OPTION ───────────────────────────────────────────────────────────────────
//

/// One selectable answer of a question.
///
/// The correctness flag travels with the catalog payload but is never
/// rendered while an attempt is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    id: OptionId,
    #[serde(rename = "texte")]
    text: String,
    #[serde(rename = "est_correcte", default)]
    is_correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "texte")]
    text: String,
    #[serde(default)]
    options: Vec<QuizOption>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            id,
            text: text.into(),
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }
}

//
// ─── QUIZ ─────────────────────────────────────────────────────────────────────
//

/// A published QCM as served by the catalog endpoint.
///
/// Immutable once fetched. Field names on the wire follow the backend
/// (`titre`, `difficulte`, `duree_minutes`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    id: QuizId,
    #[serde(rename = "titre")]
    title: String,
    #[serde(rename = "difficulte", default)]
    difficulty: String,
    #[serde(rename = "type_exercice", default)]
    exercise_type: String,
    #[serde(rename = "duree_minutes", default)]
    duration_minutes: Option<u32>,
    #[serde(rename = "date_creation", default)]
    created_at: Option<String>,
    #[serde(default)]
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        duration_minutes: Option<u32>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            difficulty: "Moyen".to_string(),
            exercise_type: "QCM".to_string(),
            duration_minutes,
            created_at: None,
            questions,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn exercise_type(&self) -> &str {
        &self.exercise_type
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Raw creation timestamp as sent by the backend (ISO 8601, no zone).
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Time limit in seconds, or `None` for an untimed quiz.
    ///
    /// A missing or zero duration both mean "untimed".
    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.duration_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| minutes.saturating_mul(60))
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.time_limit_secs().is_some()
    }

    /// Checks that the quiz can be attempted.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` when the question list is empty.
    pub fn ensure_attemptable(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions(self.id));
        }
        Ok(())
    }
}
