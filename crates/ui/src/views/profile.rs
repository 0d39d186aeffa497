use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ProfileVm;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let profiles = ctx.profiles();

    let mut resource = use_resource(move || {
        let profiles = profiles.clone();
        async move {
            let profile = profiles.my_profile().await?;
            Ok::<_, ViewError>(ProfileVm::from(&profile))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Profile" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    dl { class: "profile",
                        for (label, value) in vm.fields {
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                    h3 { "Marks by subject" }
                    if vm.marks.is_empty() {
                        p { "No marks recorded yet." }
                    } else {
                        ul { class: "marks",
                            for row in vm.marks {
                                li { class: if row.passing { "passing" } else { "failing" },
                                    span { "{row.subject}" }
                                    span { "{row.mark}" }
                                }
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
