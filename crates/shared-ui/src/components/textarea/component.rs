use dioxus::prelude::*;

/// Multi-line input used by the chat composers.
///
/// When `max_chars` is set a live counter is shown and flips to the
/// over-limit style once the value is longer than the limit.
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] on_keydown: EventHandler<KeyboardEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 3)] rows: u32,
    #[props(default = false)] disabled: bool,
    #[props(default)] max_chars: Option<usize>,
    #[props(default)] error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let count = value.chars().count();
    let over = max_chars.is_some_and(|max| count > max);
    let base = vec![
        Attribute::new("class", "textarea", None, false),
        Attribute::new(
            "aria-invalid",
            if over || error.is_some() { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "textarea-wrapper",
            if !label.is_empty() {
                label { class: "textarea-label", "{label}" }
            }
            textarea {
                value: value,
                placeholder: placeholder,
                rows: "{rows}",
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
                onkeydown: move |evt| on_keydown.call(evt),
                ..merged,
            }
            div { class: "textarea-meta",
                if let Some(message) = error {
                    span { class: "textarea-error", role: "alert", "{message}" }
                }
                if let Some(max) = max_chars {
                    span {
                        class: "textarea-counter",
                        "data-over": if over { "true" } else { "false" },
                        "{count} / {max}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_flags_values_over_the_limit() {
        let html = dioxus_ssr::render_element(rsx! {
            Textarea { value: "abcdef", max_chars: 5usize }
        });
        assert!(html.contains("6 / 5"));
        assert!(html.contains("data-over=\"true\""));
    }

    #[test]
    fn counter_hidden_without_limit() {
        let html = dioxus_ssr::render_element(rsx! {
            Textarea { value: "abc" }
        });
        assert!(!html.contains("textarea-counter"));
    }
}
