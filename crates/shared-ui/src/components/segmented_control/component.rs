use dioxus::prelude::*;

/// One choice in a [`SegmentedControl`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOption {
    pub value: String,
    pub label: String,
    /// Tooltip and accessible name. Falls back to `label` when empty.
    pub title: String,
}

impl SegmentOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            title: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A row of mutually exclusive buttons. Holds no state of its own; the
/// caller owns `selected` and reacts to `on_change`.
#[component]
pub fn SegmentedControl(
    options: Vec<SegmentOption>,
    selected: String,
    on_change: EventHandler<String>,
    #[props(default)] aria_label: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![
        Attribute::new("class", "segmented-control", None, false),
        Attribute::new("role", "radiogroup", None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { "aria-label": "{aria_label}", ..merged,
            for option in options {
                {
                    let active = option.value == selected;
                    let title = if option.title.is_empty() {
                        option.label.clone()
                    } else {
                        option.title.clone()
                    };
                    let value = option.value.clone();
                    rsx! {
                        button {
                            key: "{option.value}",
                            r#type: "button",
                            class: "segmented-control-item",
                            role: "radio",
                            title: "{title}",
                            "aria-checked": if active { "true" } else { "false" },
                            "data-active": if active { "true" } else { "false" },
                            "data-value": "{option.value}",
                            onclick: move |_| {
                                if !active {
                                    on_change.call(value.clone());
                                }
                            },
                            "{option.label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SegmentOption> {
        vec![
            SegmentOption::new("en", "EN").with_title("English"),
            SegmentOption::new("es", "ES"),
        ]
    }

    #[test]
    fn only_selected_option_is_active() {
        let html = dioxus_ssr::render_element(rsx! {
            SegmentedControl { options: options(), selected: "es", on_change: |_| {} }
        });
        assert_eq!(html.matches("data-active=\"true\"").count(), 1);
        let es = html
            .split("<button")
            .find(|b| b.contains("data-value=\"es\""))
            .unwrap();
        assert!(es.contains("data-active=\"true\""));
    }

    #[test]
    fn title_falls_back_to_label() {
        let html = dioxus_ssr::render_element(rsx! {
            SegmentedControl { options: options(), selected: "en", on_change: |_| {} }
        });
        assert!(html.contains("title=\"English\""));
        assert!(html.contains("title=\"ES\""));
    }
}
