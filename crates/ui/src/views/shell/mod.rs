mod qcm_state;
mod scripts;

use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Navigator, Outlet, use_navigator, use_route};
use services::qcm::lockout::{self, ShellAction, ShellDecision, StudentTab};
use services::{AuthEvent, AuthService};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{LoginNotice, ViewError};
use crate::vm::QcmVm;
use scripts::leave_guard_script;

pub use qcm_state::QcmState;

/// Opens `tab` and records it as the page to reopen after a restart.
pub(crate) fn open_tab(auth: Arc<AuthService>, navigator: Navigator, tab: StudentTab) {
    navigator.push(Route::for_tab(tab));
    spawn(async move { remember_tab(&auth, tab).await });
}

pub(crate) async fn remember_tab(auth: &AuthService, tab: StudentTab) {
    if let Err(err) = auth.remember_page(tab.slug()).await {
        tracing::warn!(error = %err, "could not remember page");
    }
}

/// Student dashboard chrome: sidebar, lockout guard, and the attempt owner.
#[component]
pub fn StudentShell() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let LoginNotice(mut notice) = use_context::<LoginNotice>();
    let mut warning = use_signal(|| None::<&'static str>);

    let view = use_signal(|| None::<QcmVm>);
    let busy = use_signal(|| false);
    let error = use_signal(|| None::<String>);
    let qcm = use_hook(|| {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let state = QcmState::new(ctx.qcm_controller(tx), view, busy, error);
        let ticking = state.clone();
        spawn(async move {
            while let Some(tick) = rx.recv().await {
                ticking.tick(tick).await;
            }
        });
        state
    });
    use_context_provider(|| qcm.clone());

    use_hook(|| {
        let mut events = ctx.events().subscribe();
        spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::TokenExpired) => {
                        notice.set(Some(ViewError::SessionExpired.message().to_string()));
                        navigator.replace(Route::Login {});
                        break;
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        });
    });

    let is_locked = move || view.read().as_ref().is_some_and(|vm| vm.locked);
    use_effect(move || {
        let prompt = match lockout::decide(is_locked(), ShellAction::CloseWindow) {
            ShellDecision::Confirm { prompt } => Some(prompt),
            ShellDecision::Allow | ShellDecision::Blocked { .. } => None,
        };
        let _ = eval(&leave_guard_script(prompt));
    });

    let auth = ctx.auth();
    let on_tab = use_callback(move |tab: StudentTab| {
        match lockout::decide(is_locked(), ShellAction::SwitchTab(tab)) {
            ShellDecision::Allow => {
                warning.set(None);
                open_tab(auth.clone(), navigator, tab);
            }
            ShellDecision::Blocked { warning: message } => {
                tracing::warn!(tab = tab.slug(), "tab switch blocked by quiz in progress");
                warning.set(Some(message));
            }
            ShellDecision::Confirm { .. } => {}
        }
    });

    let auth = ctx.auth();
    let on_logout = use_callback(move |()| {
        match lockout::decide(is_locked(), ShellAction::Logout) {
            ShellDecision::Allow => {
                warning.set(None);
                let auth = auth.clone();
                spawn(async move {
                    if let Err(err) = auth.logout().await {
                        tracing::error!(error = %err, "logout failed");
                    }
                    navigator.replace(Route::Login {});
                });
            }
            ShellDecision::Blocked { warning: message } => {
                tracing::warn!("logout blocked by quiz in progress");
                warning.set(Some(message));
            }
            ShellDecision::Confirm { .. } => {}
        }
    });

    let locked = is_locked();
    let current = use_route::<Route>().tab();
    let username = ctx
        .auth()
        .current_user()
        .map(|user| user.username)
        .unwrap_or_default();

    rsx! {
        div { class: "app",
            Sidebar { current, username, locked, on_tab, on_logout }
            main { class: "content",
                if let Some(message) = warning() {
                    div { class: "shell-warning", role: "alert",
                        p { "{message}" }
                        button { onclick: move |_| warning.set(None), "OK" }
                    }
                }
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar(
    current: Option<StudentTab>,
    username: String,
    locked: bool,
    on_tab: Callback<StudentTab>,
    on_logout: Callback<()>,
) -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Campus" }
            p { class: "sidebar-user", "{username}" }
            for tab in StudentTab::ALL {
                button {
                    class: if current == Some(tab) { "tab active" } else { "tab" },
                    aria_disabled: locked && current != Some(tab),
                    onclick: move |_| on_tab.call(tab),
                    "{tab.label()}"
                }
            }
            button {
                class: "logout",
                aria_disabled: locked,
                onclick: move |_| on_logout.call(()),
                "Sign out"
            }
        }
    }
}
