use campus_core::model::{OptionId, QuestionId, Quiz, QuizId};
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::CompletionDestination;

use crate::context::AppContext;
use crate::views::{
    QcmScreen, QcmState, ViewError, ViewState, open_tab, view_state_from_resource,
};
use crate::vm::{QuizCardVm, map_quiz_cards};

#[derive(Clone, Debug, PartialEq)]
struct CatalogData {
    quizzes: Vec<Quiz>,
    cards: Vec<QuizCardVm>,
}

/// Quiz catalog, or the open attempt in full screen.
#[component]
pub fn EvaluationsView() -> Element {
    let ctx = use_context::<AppContext>();
    let qcm = use_context::<QcmState>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let auth = ctx.auth();

    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let quizzes = catalog.available_quizzes().await?;
            let cards = map_quiz_cards(&quizzes);
            Ok::<_, ViewError>(CatalogData { quizzes, cards })
        }
    });
    let state = view_state_from_resource(&resource);

    let active = qcm.view.read().clone();
    if let Some(vm) = active {
        let select_state = qcm.clone();
        let submit_state = qcm.clone();
        let dismiss_state = qcm.clone();
        return rsx! {
            QcmScreen {
                vm,
                busy: *qcm.busy.read(),
                error: qcm.error.read().clone(),
                on_select: move |(question, option): (QuestionId, OptionId)| {
                    let qcm = select_state.clone();
                    spawn(async move { qcm.select(question, option).await });
                },
                on_submit: move |()| {
                    let qcm = submit_state.clone();
                    spawn(async move { qcm.submit().await });
                },
                on_dismiss: move |destination: CompletionDestination| {
                    let qcm = dismiss_state.clone();
                    let auth = auth.clone();
                    spawn(async move {
                        match qcm.dismiss(destination).await {
                            Some(CompletionDestination::Catalog) => resource.restart(),
                            Some(destination) => open_tab(auth, navigator, destination.tab()),
                            None => {}
                        }
                    });
                },
            }
        };
    }

    let start_state = qcm.clone();
    let on_start = move |quiz_id: QuizId| {
        let quiz = resource.value().read().as_ref().and_then(|loaded| {
            loaded
                .as_ref()
                .ok()
                .and_then(|data| data.quizzes.iter().find(|quiz| quiz.id() == quiz_id).cloned())
        });
        if let Some(quiz) = quiz {
            let qcm = start_state.clone();
            spawn(async move { qcm.start(quiz).await });
        }
    };

    rsx! {
        div { class: "page",
            h2 { "Evaluations" }
            if let Some(message) = qcm.error.read().clone() {
                p { class: "form-error", "{message}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No quiz is available right now." }
                    } else {
                        ul { class: "quiz-list",
                            for card in data.cards {
                                QuizCard { key: "{card.id}", card, on_start: on_start.clone() }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm, on_start: EventHandler<QuizId>) -> Element {
    let id = card.id;
    rsx! {
        li { class: "quiz-card",
            h3 { "{card.title}" }
            p { "{card.exercise_type} | {card.difficulty} | {card.duration} | {card.question_count} questions" }
            if let Some(created_at) = card.created_at.clone() {
                p { class: "quiz-date", "Published {created_at}" }
            }
            button {
                disabled: !card.startable,
                onclick: move |_| on_start.call(id),
                "Start"
            }
        }
    }
}
