use campus_core::model::{OptionId, QuestionId};
use dioxus::prelude::*;
use services::CompletionDestination;

use crate::vm::{CompletionVm, OptionVm, QcmPhaseVm, QcmVm, QuestionVm};

/// Full-screen attempt: questions, countdown, submission, and completion.
#[component]
pub fn QcmScreen(
    vm: QcmVm,
    busy: bool,
    error: Option<String>,
    on_select: EventHandler<(QuestionId, OptionId)>,
    on_submit: EventHandler<()>,
    on_dismiss: EventHandler<CompletionDestination>,
) -> Element {
    let answering = vm.phase == QcmPhaseVm::Answering && !busy;
    let submit_label = match (&vm.phase, busy) {
        (QcmPhaseVm::Submitting, _) | (_, true) => "Submitting...",
        (QcmPhaseVm::Failed(_), false) => "Retry submission",
        _ => "Submit",
    };

    rsx! {
        div { class: "qcm-fullscreen", id: "qcm-root",
            header { class: "qcm-header",
                h2 { "{vm.title}" }
                span { class: "qcm-difficulty", "{vm.difficulty}" }
                span { class: "qcm-started", "Started at {vm.started}" }
                if let Some(countdown) = vm.countdown.clone() {
                    span {
                        class: if vm.urgent { "qcm-timer urgent" } else { "qcm-timer" },
                        "Time left: {countdown}"
                    }
                }
            }
            match vm.phase.clone() {
                QcmPhaseVm::Completed(completion) => rsx! {
                    CompletionPanel { completion, on_dismiss }
                },
                phase => rsx! {
                    p { class: "qcm-progress", "{vm.progress_label()}" }
                    for question in vm.questions.clone() {
                        QuestionCard {
                            key: "{question.id}",
                            question,
                            disabled: !answering,
                            on_select,
                        }
                    }
                    if let QcmPhaseVm::Failed(message) = phase {
                        p { class: "form-error", role: "alert", "{message}" }
                    }
                    if let Some(message) = error.clone() {
                        p { class: "form-error", "{message}" }
                    }
                    button {
                        id: "qcm-submit",
                        disabled: busy || !vm.can_submit,
                        onclick: move |_| on_submit.call(()),
                        "{submit_label}"
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    disabled: bool,
    on_select: EventHandler<(QuestionId, OptionId)>,
) -> Element {
    rsx! {
        section { class: "qcm-question",
            h3 { "{question.number}. {question.text}" }
            for option in question.options.clone() {
                OptionRow {
                    key: "{option.id}",
                    question: question.id,
                    option,
                    disabled,
                    on_select,
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    question: QuestionId,
    option: OptionVm,
    disabled: bool,
    on_select: EventHandler<(QuestionId, OptionId)>,
) -> Element {
    let id = option.id.clone();
    rsx! {
        label { class: if option.selected { "option selected" } else { "option" },
            input {
                r#type: "radio",
                name: "question-{question}",
                checked: option.selected,
                disabled,
                onchange: move |_| on_select.call((question, id.clone())),
            }
            "{option.text}"
        }
    }
}

#[component]
pub fn CompletionPanel(
    completion: CompletionVm,
    on_dismiss: EventHandler<CompletionDestination>,
) -> Element {
    rsx! {
        div { class: "qcm-completion",
            match completion {
                CompletionVm::Pending { message } => rsx! {
                    h3 { "Quiz submitted" }
                    p { "{message}" }
                    p { "Your mark will appear in your results once the teacher has corrected it." }
                },
                CompletionVm::Graded { score, total, percentage, note, feedback, passing } => rsx! {
                    h3 { if passing { "Quiz passed" } else { "Quiz completed" } }
                    p { "Score: {score}/{total}" }
                    p { "Percentage: {percentage}" }
                    p { "Mark: {note}" }
                    if !feedback.is_empty() {
                        p { class: "qcm-feedback", "{feedback}" }
                    }
                },
            }
            div { class: "qcm-completion-actions",
                button {
                    id: "qcm-see-results",
                    onclick: move |_| on_dismiss.call(CompletionDestination::Results),
                    "See my results"
                }
                button {
                    id: "qcm-back",
                    onclick: move |_| on_dismiss.call(CompletionDestination::Catalog),
                    "Back to evaluations"
                }
            }
        }
    }
}
