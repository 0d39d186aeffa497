use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::qcm::StudentTab;
use services::{AuthError, AuthService};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

/// One-shot message shown above the login form (e.g. after token expiry).
#[derive(Clone, Copy)]
pub struct LoginNotice(pub Signal<Option<String>>);

fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::Rejected(message) => message.clone(),
        AuthError::Api(api) => ViewError::from(api).message().to_string(),
        other => other.to_string(),
    }
}

async fn landing_tab(auth: &AuthService) -> StudentTab {
    auth.last_page()
        .await
        .ok()
        .flatten()
        .and_then(|slug| StudentTab::from_slug(&slug))
        .unwrap_or(StudentTab::Evaluations)
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let LoginNotice(mut notice) = use_context::<LoginNotice>();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let restored = ctx
        .auth()
        .current_user()
        .is_some_and(|user| user.is_student());
    let initial_tab = ctx.initial_tab();
    use_effect(move || {
        if restored {
            navigator.replace(Route::for_tab(initial_tab));
        }
    });

    let auth = ctx.auth();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = auth.clone();
        spawn(async move {
            busy.set(true);
            match auth.login(&email(), &password()).await {
                Ok(user) if user.is_student() => {
                    error.set(None);
                    notice.set(None);
                    password.set(String::new());
                    let tab = landing_tab(&auth).await;
                    navigator.replace(Route::for_tab(tab));
                }
                Ok(user) => {
                    tracing::info!(role = %user.role, "non-student account refused by desktop client");
                    if let Err(err) = auth.logout().await {
                        tracing::warn!(error = %err, "could not clear refused session");
                    }
                    error.set(Some(format!(
                        "This application is for students. {} accounts use the web dashboard.",
                        user.role
                    )));
                }
                Err(err) => error.set(Some(auth_error_message(&err))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page login",
            h2 { "Sign in" }
            if let Some(message) = notice() {
                p { class: "login-notice", role: "status", "{message}" }
            }
            form { onsubmit: on_submit,
                label { "Email"
                    input {
                        r#type: "email",
                        value: "{email}",
                        autofocus: true,
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { "Password"
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                button { r#type: "submit", disabled: busy(), if busy() { "Signing in..." } else { "Sign in" } }
            }
        }
    }
}
