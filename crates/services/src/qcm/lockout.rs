//! Host-shell navigation guard while an attempt is in progress.

/// Student dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentTab {
    Evaluations,
    Results,
    Profile,
}

impl StudentTab {
    pub const ALL: [StudentTab; 3] = [
        StudentTab::Evaluations,
        StudentTab::Results,
        StudentTab::Profile,
    ];

    /// Stable name used when remembering the last open page.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            StudentTab::Evaluations => "evaluations",
            StudentTab::Results => "resultats",
            StudentTab::Profile => "profil",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StudentTab::Evaluations => "Evaluations",
            StudentTab::Results => "Results",
            StudentTab::Profile => "Profile",
        }
    }
}

/// Something the host shell is about to do on the student's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    SwitchTab(StudentTab),
    Logout,
    /// Window close or page reload.
    CloseWindow,
}

/// Verdict of the guard for a `ShellAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDecision {
    Allow,
    /// Show the warning and do nothing else.
    Blocked { warning: &'static str },
    /// Ask the student to confirm before leaving.
    Confirm { prompt: &'static str },
}

impl ShellDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == ShellDecision::Allow
    }
}

pub const TAB_SWITCH_WARNING: &str = "Quiz in progress! You cannot open another tab until \
     you submit your quiz or the time runs out.";
pub const LOGOUT_WARNING: &str = "Quiz in progress! You cannot sign out until you submit \
     your quiz or the time runs out.";
pub const LEAVE_PROMPT: &str = "You have a quiz in progress. Are you sure you want to leave?";

/// Decide whether `action` may proceed given the lock state.
#[must_use]
pub fn decide(locked: bool, action: ShellAction) -> ShellDecision {
    if !locked {
        return ShellDecision::Allow;
    }
    match action {
        ShellAction::SwitchTab(_) => ShellDecision::Blocked {
            warning: TAB_SWITCH_WARNING,
        },
        ShellAction::Logout => ShellDecision::Blocked {
            warning: LOGOUT_WARNING,
        },
        ShellAction::CloseWindow => ShellDecision::Confirm {
            prompt: LEAVE_PROMPT,
        },
    }
}
