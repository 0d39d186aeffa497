mod evaluations;
mod login;
mod profile;
mod qcm;
mod results;
mod shell;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use evaluations::EvaluationsView;
pub use login::{LoginNotice, LoginView};
pub use profile::ProfileView;
pub use qcm::{CompletionPanel, QcmScreen};
pub use results::{ResultsTable, ResultsView};
pub use shell::{QcmState, StudentShell};
pub(crate) use shell::open_tab;
pub use state::{ViewError, ViewState, view_state_from_resource};
