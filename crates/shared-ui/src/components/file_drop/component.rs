use dioxus::prelude::*;

/// Drop zone backed by a native file input.
///
/// The input is stretched transparently over the zone, so both clicking and
/// dropping files land in the same `onchange` event.
#[component]
pub fn FileDrop(
    #[props(default)] accept: String,
    #[props(default = false)] multiple: bool,
    #[props(default = false)] disabled: bool,
    title: String,
    #[props(default)] hint: String,
    on_change: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let mut dragging = use_signal(|| false);
    let base = vec![
        Attribute::new("class", "file-drop", None, false),
        Attribute::new(
            "data-disabled",
            if disabled { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label {
            "data-dragging": if dragging() { "true" } else { "false" },
            ondragenter: move |_| dragging.set(true),
            ondragleave: move |_| dragging.set(false),
            ..merged,
            input {
                class: "file-drop-input",
                r#type: "file",
                accept: "{accept}",
                multiple: multiple,
                disabled: disabled,
                onchange: move |evt| {
                    dragging.set(false);
                    on_change.call(evt);
                },
            }
            span { class: "file-drop-title", "{title}" }
            if !hint.is_empty() {
                span { class: "file-drop-hint", "{hint}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_input_with_accept_list() {
        let html = dioxus_ssr::render_element(rsx! {
            FileDrop {
                accept: ".pdf,.txt",
                multiple: true,
                title: "Drop files",
                hint: "PDF or TXT",
                on_change: |_| {},
            }
        });
        assert!(html.contains("type=\"file\""));
        assert!(html.contains("accept=\".pdf,.txt\""));
        assert!(html.contains("Drop files"));
        assert!(html.contains("PDF or TXT"));
    }
}
