use thiserror::Error;

use crate::model::{QuizError, UserError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    User(#[from] UserError),
}
