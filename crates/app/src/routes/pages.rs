//! The four feature pages. Each one is a fixed composition of guard, shell
//! and panel with no state of its own.

use dioxus::prelude::*;
use shared_types::{DashboardPage, Panel};

use crate::components::{
    ChatInterface, DashboardChatInterface, DocumentUploadInterface, PrecedentFinderInterface,
};
use crate::routes::layout::DashboardLayout;
use crate::routes::protected::ProtectedRoute;

/// Builds the element for a panel. Provided as context so the page
/// composition can be rendered with lightweight panels.
#[derive(Clone, Copy)]
pub struct PanelRenderer {
    pub render: fn(Panel) -> Element,
}

impl Default for PanelRenderer {
    fn default() -> Self {
        Self {
            render: render_panel,
        }
    }
}

pub fn render_panel(panel: Panel) -> Element {
    match panel {
        Panel::Chat => rsx! { ChatInterface {} },
        Panel::DashboardChat => rsx! { DashboardChatInterface {} },
        Panel::PrecedentFinder => rsx! { PrecedentFinderInterface {} },
        Panel::DocumentUpload => rsx! { DocumentUploadInterface {} },
    }
}

#[component]
fn PanelSlot(panel: Panel) -> Element {
    let renderer = try_use_context::<PanelRenderer>().unwrap_or_default();
    rsx! {
        section { class: "panel-slot", "data-panel": panel.name(),
            {(renderer.render)(panel)}
        }
    }
}

/// Standalone chat on the bare page background.
#[component]
pub fn ChatPage() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./pages.css") }
        ProtectedRoute {
            div { class: "page-background",
                PanelSlot { panel: Panel::Chat }
            }
        }
    }
}

#[component]
pub fn DashboardChatPage() -> Element {
    rsx! {
        ProtectedRoute {
            DashboardLayout { current_page: DashboardPage::Chat,
                PanelSlot { panel: Panel::DashboardChat }
            }
        }
    }
}

#[component]
pub fn DashboardPrecedentPage() -> Element {
    rsx! {
        ProtectedRoute {
            DashboardLayout { current_page: DashboardPage::Precedent,
                PanelSlot { panel: Panel::PrecedentFinder }
            }
        }
    }
}

#[component]
pub fn DashboardUploadPage() -> Element {
    rsx! {
        ProtectedRoute {
            DashboardLayout { current_page: DashboardPage::Upload,
                PanelSlot { panel: Panel::DocumentUpload }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthState, SessionStatus};
    use crate::i18n::LocaleState;
    use crate::routes::{Route, PAGE_ROUTES};
    use dioxus::dioxus_core::NoOpMutations;
    use pretty_assertions::assert_eq;
    use shared_types::{AuthUser, Locale};
    use std::cell::{Cell, RefCell};

    const PANELS: [Panel; 4] = [
        Panel::Chat,
        Panel::DashboardChat,
        Panel::PrecedentFinder,
        Panel::DocumentUpload,
    ];

    thread_local! {
        static MOUNTED: Cell<i32> = const { Cell::new(0) };
        static CAPTURED_AUTH: RefCell<Option<AuthState>> = const { RefCell::new(None) };
    }

    fn mounted() -> i32 {
        MOUNTED.with(Cell::get)
    }

    /// Panel stand-in that counts live instances on this thread.
    #[component]
    fn CountingPanel(panel: Panel) -> Element {
        use_hook(|| MOUNTED.with(|m| m.set(m.get() + 1)));
        use_drop(|| MOUNTED.with(|m| m.set(m.get() - 1)));
        rsx! { div { class: "stub-panel", "{panel.name()}" } }
    }

    fn counting_panel(panel: Panel) -> Element {
        rsx! { CountingPanel { panel } }
    }

    fn user() -> AuthUser {
        AuthUser {
            id: 9,
            username: "sandra".into(),
            display_name: "Sandra Day".into(),
            email: "sdo@example.com".into(),
            role: "user".into(),
            locale: Locale::En,
        }
    }

    fn page_for(route: &Route) -> Element {
        match route {
            Route::ChatPage {} => rsx! { ChatPage {} },
            Route::DashboardChatPage {} => rsx! { DashboardChatPage {} },
            Route::DashboardPrecedentPage {} => rsx! { DashboardPrecedentPage {} },
            Route::DashboardUploadPage {} => rsx! { DashboardUploadPage {} },
            _ => rsx! {},
        }
    }

    #[derive(Props, Clone, PartialEq)]
    struct HarnessProps {
        route: Route,
        status: SessionStatus,
    }

    #[allow(non_snake_case)]
    fn Harness(props: HarnessProps) -> Element {
        let auth = use_context_provider(|| AuthState::with_status(props.status.clone()));
        use_hook(|| CAPTURED_AUTH.with(|c| *c.borrow_mut() = Some(auth)));
        use_context_provider(|| LocaleState::new(Locale::En));
        use_context_provider(|| PanelRenderer {
            render: counting_panel,
        });
        page_for(&props.route)
    }

    fn render(route: &Route, status: SessionStatus) -> String {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                route: route.clone(),
                status,
            },
        );
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn panel_count(html: &str, panel: Panel) -> usize {
        html.matches(&format!("data-panel=\"{}\"", panel.name())).count()
    }

    #[test]
    fn signed_out_visitors_never_see_a_panel() {
        for route in &PAGE_ROUTES {
            for status in [SessionStatus::Anonymous, SessionStatus::Pending] {
                let html = render(route, status.clone());
                assert!(!html.contains("data-panel"), "{route} rendered a panel for {status:?}");
                assert!(!html.contains("stub-panel"));
                assert!(html.contains("data-guard"));
            }
        }
        assert_eq!(mounted(), 0);
    }

    #[test]
    fn each_page_mounts_exactly_its_panel() {
        for route in &PAGE_ROUTES {
            let expected = route.composition().unwrap().panel;
            let html = render(route, SessionStatus::Authenticated(user()));
            for panel in PANELS {
                let want = usize::from(panel == expected);
                assert_eq!(panel_count(&html, panel), want, "{route} / {panel:?}");
            }
            assert_eq!(html.matches("class=\"stub-panel\"").count(), 1);
        }
    }

    #[test]
    fn shell_presence_matches_composition() {
        for route in &PAGE_ROUTES {
            let composition = route.composition().unwrap();
            let html = render(route, SessionStatus::Authenticated(user()));
            assert_eq!(html.contains("dashboard-header"), composition.shell.is_some(), "{route}");
            if let Some(page) = composition.shell {
                let active = html
                    .split("<button")
                    .find(|b| b.contains("sidebar-menu-button") && b.contains("data-active=\"true\""))
                    .unwrap();
                let position = shared_types::ALL_DASHBOARD_PAGES
                    .iter()
                    .position(|p| *p == page)
                    .unwrap();
                let nth = html
                    .split("<button")
                    .filter(|b| b.contains("sidebar-menu-button"))
                    .nth(position)
                    .unwrap();
                assert_eq!(active, nth, "{route}");
            }
        }
    }

    #[test]
    fn signing_out_unmounts_the_panel() {
        for route in &PAGE_ROUTES {
            let mut dom = VirtualDom::new_with_props(
                Harness,
                HarnessProps {
                    route: route.clone(),
                    status: SessionStatus::Authenticated(user()),
                },
            );
            dom.rebuild_in_place();
            assert_eq!(mounted(), 1, "{route}");

            let mut auth = CAPTURED_AUTH.with(|c| c.borrow().unwrap());
            dom.in_runtime(|| auth.clear_auth());
            dom.render_immediate(&mut NoOpMutations);
            assert_eq!(mounted(), 0, "{route}");
            assert!(!dioxus_ssr::render(&dom).contains("stub-panel"));

            dom.in_runtime(|| auth.set_user(user()));
            dom.render_immediate(&mut NoOpMutations);
            assert_eq!(mounted(), 1, "{route}");

            drop(dom);
            assert_eq!(mounted(), 0, "{route}");
        }
    }
}
