mod answers;
mod ids;
mod outcome;
mod profile;
mod quiz;
mod result;
mod user;

pub use answers::AnswerMap;
pub use ids::{OptionId, QuestionId, QuizId, UserId};
pub use outcome::{GradedScore, OutcomeStatus, SubmissionOutcome};
pub use profile::{StudentProfile, SubjectMark};
pub use quiz::{Question, Quiz, QuizError, QuizOption};
pub use result::{ResultStatus, StudentResult};
pub use user::{Role, User, UserError};
