use dioxus::prelude::*;

use crate::i18n::{t, use_locale, Msg};
use crate::routes::Route;

/// 404 page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let locale = use_locale();
    let path = format!("/{}", segments.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "{t(locale, Msg::NotFoundTitle)}" }
                p { class: "not-found-message",
                    "{t(locale, Msg::NotFoundBody)} "
                    code { "{path}" }
                }
                Link { to: Route::DashboardChatPage {},
                    class: "not-found-link",
                    "{t(locale, Msg::GoToDashboard)}"
                }
            }
        }
    }
}
