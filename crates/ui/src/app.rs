use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::views::LoginNotice;

#[component]
pub fn App() -> Element {
    let notice = use_signal(|| None::<String>);
    use_context_provider(|| LoginNotice(notice));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title.
        document::Title { "Campus QCM" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
