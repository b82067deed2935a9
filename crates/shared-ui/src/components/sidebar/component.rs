use dioxus::prelude::*;

/// Open/closed state shared by every sidebar part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarState {
    pub open: bool,
}

#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SidebarState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if state().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_sidebar() -> Signal<SidebarState> {
    use_context::<Signal<SidebarState>>()
}

/// Navigation column. On narrow viewports it overlays the content and a
/// backdrop closes it.
#[component]
pub fn Sidebar(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut state = use_sidebar();
    let is_open = state().open;

    let base = vec![
        Attribute::new("class", "sidebar", None, false),
        Attribute::new(
            "data-state",
            if is_open { "open" } else { "closed" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        if is_open {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| state.set(SidebarState { open: false }),
            }
        }
        aside {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn SidebarHeader(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-header", {children} }
    }
}

#[component]
pub fn SidebarContent(children: Element) -> Element {
    rsx! {
        nav { class: "sidebar-content", {children} }
    }
}

#[component]
pub fn SidebarFooter(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-footer", {children} }
    }
}

#[component]
pub fn SidebarMenu(children: Element) -> Element {
    rsx! {
        ul { class: "sidebar-menu", {children} }
    }
}

#[component]
pub fn SidebarMenuItem(children: Element) -> Element {
    rsx! {
        li { class: "sidebar-menu-item", {children} }
    }
}

/// Navigation entry. `active` marks the entry for the page being shown;
/// clicking runs `onclick` and closes the overlay on narrow viewports.
#[component]
pub fn SidebarMenuButton(
    #[props(default = false)] active: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut state = use_sidebar();

    let base = vec![
        Attribute::new("class", "sidebar-menu-button", None, false),
        Attribute::new(
            "data-active",
            if active { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        button {
            r#type: "button",
            "aria-current": if active { "page" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
                state.set(SidebarState { open: false });
            },
            ..merged,
            {children}
        }
    }
}

/// Opens or closes the sidebar.
#[component]
pub fn SidebarTrigger(
    #[props(default = "Toggle navigation".to_string())] label: String,
    children: Element,
) -> Element {
    let mut state = use_sidebar();

    rsx! {
        button {
            class: "sidebar-trigger",
            r#type: "button",
            "aria-label": "{label}",
            onclick: move |_| {
                let current = state().open;
                state.set(SidebarState { open: !current });
            },
            {children}
        }
    }
}

/// Content column next to the sidebar.
#[component]
pub fn SidebarInset(children: Element) -> Element {
    rsx! {
        main { class: "sidebar-inset", {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[component]
    fn Nav(active_index: usize) -> Element {
        rsx! {
            SidebarProvider {
                Sidebar {
                    SidebarContent {
                        SidebarMenu {
                            for i in 0..3usize {
                                SidebarMenuItem { key: "{i}",
                                    SidebarMenuButton { active: i == active_index, "Item {i}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn exactly_one_button_is_active() {
        let html = dioxus_ssr::render_element(rsx! { Nav { active_index: 1 } });
        assert_eq!(html.matches("data-active=\"true\"").count(), 1);
        assert_eq!(html.matches("data-active=\"false\"").count(), 2);
        assert!(html.contains("aria-current=\"page\""));
    }

    #[test]
    fn closed_provider_marks_sidebar_closed() {
        let html = dioxus_ssr::render_element(rsx! {
            SidebarProvider { default_open: false,
                Sidebar { "links" }
            }
        });
        assert!(html.contains("data-state=\"closed\""));
        assert!(!html.contains("sidebar-backdrop"));
    }
}
