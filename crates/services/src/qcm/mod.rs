//! Single-attempt quiz controller: countdown, submission, and lockout.

mod controller;
pub mod lockout;
mod session;
mod timer;

pub use controller::{CompletionDestination, QcmController, StartOutcome};
pub use lockout::{ShellAction, ShellDecision, StudentTab};
pub use session::{AttemptPhase, QcmSession, TickOutcome};
pub use timer::{TimerHandle, TimerTick};
