#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod profile_service;
pub mod qcm;
pub mod results_service;
pub mod submission_service;

pub use campus_core::Clock;

pub use api::{ApiClient, AuthEvent, AuthEvents};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use catalog_service::{HttpQuizCatalog, QuizCatalog};
pub use config::ApiConfig;
pub use error::{ApiError, AppServicesError, AuthError, SessionError};
pub use qcm::{
    AttemptPhase, CompletionDestination, QcmController, QcmSession, ShellAction, ShellDecision,
    StartOutcome, StudentTab, TickOutcome, TimerTick,
};
pub use profile_service::{HttpProfileService, StudentProfiles};
pub use results_service::{HttpResultsService, StudentResults};
pub use submission_service::{HttpSubmissionService, SubmissionRequest, SubmissionService};
