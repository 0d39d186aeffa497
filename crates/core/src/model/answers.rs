use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, QuestionId};
use crate::model::quiz::Quiz;

/// Single-choice answers of one attempt, keyed by question.
///
/// Serializes as a JSON object with stringified question ids, which is the
/// shape the submission endpoint expects for `reponses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<QuestionId, OptionId>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `option` for `question`, replacing any earlier choice.
    ///
    /// Returns the previously selected option, if any.
    pub fn select(&mut self, question: QuestionId, option: OptionId) -> Option<OptionId> {
        self.0.insert(question, option)
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<&OptionId> {
        self.0.get(&question)
    }

    #[must_use]
    pub fn is_selected(&self, question: QuestionId, option: &OptionId) -> bool {
        self.0.get(&question) == Some(option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every question of `quiz` has a selection.
    #[must_use]
    pub fn covers(&self, quiz: &Quiz) -> bool {
        quiz.questions()
            .iter()
            .all(|question| self.0.contains_key(&question.id()))
    }

    /// Number of questions of `quiz` that have no selection yet.
    #[must_use]
    pub fn unanswered(&self, quiz: &Quiz) -> usize {
        quiz.questions()
            .iter()
            .filter(|question| !self.0.contains_key(&question.id()))
            .count()
    }
}
