use dioxus::prelude::*;

/// Pulsing placeholder shown while server data loads.
#[component]
pub fn Skeleton(
    #[props(default = 1)] lines: usize,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "skeleton-group", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { "aria-busy": "true", ..merged,
            for i in 0..lines.max(1) {
                div { key: "{i}", class: "skeleton" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_requested_line_count() {
        let html = dioxus_ssr::render_element(rsx! {
            Skeleton { lines: 3 }
        });
        assert_eq!(html.matches("class=\"skeleton\"").count(), 3);
    }
}
