use dioxus::prelude::*;

/// Title row at the top of a panel. Children render as right-aligned actions.
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] description: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div { class: "page-heading",
                h1 { class: "page-title", "{title}" }
                if let Some(description) = description {
                    p { class: "page-description", "{description}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}
