use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultRowVm, map_result_rows};

#[derive(Clone, Debug, PartialEq)]
struct ResultsData {
    rows: Vec<ResultRowVm>,
}

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();

    let mut resource = use_resource(move || {
        let results = results.clone();
        async move {
            let rows = results.my_results().await?;
            Ok::<_, ViewError>(ResultsData {
                rows: map_result_rows(&rows),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "My results" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { "You have not submitted any quiz yet." }
                    } else {
                        ResultsTable { rows: data.rows }
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
pub fn ResultsTable(rows: Vec<ResultRowVm>) -> Element {
    rsx! {
        table { class: "results",
            thead {
                tr {
                    th { "Quiz" }
                    th { "Status" }
                    th { "Mark" }
                    th { "Percentage" }
                    th { "Answers" }
                    th { "Time" }
                    th { "Date" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.id}", class: if row.pending { "pending" } else { "graded" },
                        td { "{row.quiz_title}" }
                        td { "{row.status_label}" }
                        td { "{row.note}" }
                        td { "{row.percentage}" }
                        td { "{row.answers}" }
                        td { "{row.elapsed}" }
                        td { "{row.dated_at}" }
                    }
                }
            }
        }
    }
}
