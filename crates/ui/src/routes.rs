use dioxus::prelude::*;
use dioxus_router::Routable;
use services::qcm::StudentTab;

use crate::views::{EvaluationsView, LoginView, ProfileView, ResultsView, StudentShell};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[layout(StudentShell)]
        #[route("/etudiant/evaluations", EvaluationsView)] Evaluations {},
        #[route("/etudiant/resultats", ResultsView)] Results {},
        #[route("/etudiant/profil", ProfileView)] Profile {},
}

impl Route {
    #[must_use]
    pub fn for_tab(tab: StudentTab) -> Self {
        match tab {
            StudentTab::Evaluations => Route::Evaluations {},
            StudentTab::Results => Route::Results {},
            StudentTab::Profile => Route::Profile {},
        }
    }

    /// Dashboard tab this route belongs to; `None` outside the student shell.
    #[must_use]
    pub fn tab(&self) -> Option<StudentTab> {
        match self {
            Route::Login {} => None,
            Route::Evaluations {} => Some(StudentTab::Evaluations),
            Route::Results {} => Some(StudentTab::Results),
            Route::Profile {} => Some(StudentTab::Profile),
        }
    }
}
