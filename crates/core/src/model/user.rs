use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Account role as issued by the auth endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "enseignant")]
    Teacher,
    #[serde(rename = "etudiant")]
    Student,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "enseignant",
            Role::Student => "etudiant",
        }
    }

    /// Parses the wire name of a role.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UnknownRole` for anything else.
    pub fn parse(value: &str) -> Result<Self, UserError> {
        match value {
            "admin" => Ok(Role::Admin),
            "enseignant" => Ok(Role::Teacher),
            "etudiant" => Ok(Role::Student),
            other => Err(UserError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated account summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
