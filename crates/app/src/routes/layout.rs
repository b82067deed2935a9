use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdFolder, LdLogOut, LdMaximize2, LdMenu, LdMessageSquare, LdScale, LdSearch,
};
use dioxus_free_icons::Icon;
use shared_types::{DashboardPage, ALL_DASHBOARD_PAGES};
use shared_ui::{
    Button, ButtonVariant, Sidebar, SidebarContent, SidebarFooter, SidebarHeader, SidebarInset,
    SidebarMenu, SidebarMenuButton, SidebarMenuItem, SidebarProvider, SidebarTrigger,
};

use crate::auth::use_auth;
use crate::components::language_toggle::LanguageToggle;
use crate::i18n::{t, use_locale, Msg};
use crate::routes::Route;

fn nav_label(page: DashboardPage) -> Msg {
    match page {
        DashboardPage::Chat => Msg::NavChat,
        DashboardPage::Precedent => Msg::NavPrecedent,
        DashboardPage::Upload => Msg::NavUpload,
    }
}

fn page_title(page: DashboardPage) -> Msg {
    match page {
        DashboardPage::Chat => Msg::ChatTitle,
        DashboardPage::Precedent => Msg::PrecedentTitle,
        DashboardPage::Upload => Msg::UploadTitle,
    }
}

#[component]
fn NavIcon(page: DashboardPage) -> Element {
    match page {
        DashboardPage::Chat => rsx! { Icon::<LdMessageSquare> { icon: LdMessageSquare, width: 18, height: 18 } },
        DashboardPage::Precedent => rsx! { Icon::<LdSearch> { icon: LdSearch, width: 18, height: 18 } },
        DashboardPage::Upload => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 18, height: 18 } },
    }
}

/// Dashboard chrome: sidebar navigation, header actions and the content
/// column. `current_page` picks the highlighted navigation entry and the
/// header title.
#[component]
pub fn DashboardLayout(current_page: DashboardPage, children: Element) -> Element {
    let mut auth = use_auth();
    let locale = use_locale();
    let user = auth.user();

    let sign_out = move |_: MouseEvent| {
        spawn(async move {
            if let Err(err) = server::api::logout().await {
                tracing::warn!(%err, "logout request failed");
            }
        });
        navigator().push(Route::Login { redirect: None });
        auth.clear_auth();
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider { default_open: false,
            Sidebar {
                SidebarHeader {
                    div { class: "sidebar-brand",
                        Icon::<LdScale> { icon: LdScale, width: 20, height: 20 }
                        span { class: "sidebar-brand-name", "Counselor" }
                    }
                }

                SidebarContent {
                    SidebarMenu {
                        for page in ALL_DASHBOARD_PAGES.iter().copied() {
                            SidebarMenuItem { key: "{page.as_str()}",
                                SidebarMenuButton {
                                    active: page == current_page,
                                    onclick: move |_| {
                                        navigator().push(Route::for_dashboard_page(page));
                                    },
                                    NavIcon { page }
                                    span { class: "sidebar-label", "{t(locale, nav_label(page))}" }
                                }
                            }
                        }
                    }
                }

                SidebarFooter {
                    if let Some(user) = user.as_ref() {
                        div { class: "sidebar-user",
                            span { class: "sidebar-avatar", "{user.initials()}" }
                            div { class: "sidebar-user-info",
                                span { class: "sidebar-user-name", "{user.display_name}" }
                                span { class: "sidebar-user-email", "{user.email}" }
                            }
                        }
                    }
                }
            }

            SidebarInset {
                header { class: "dashboard-header",
                    SidebarTrigger { label: t(locale, Msg::ToggleNavigation),
                        Icon::<LdMenu> { icon: LdMenu, width: 18, height: 18 }
                    }
                    h1 { class: "dashboard-title", "{t(locale, page_title(current_page))}" }
                    div { class: "dashboard-actions",
                        LanguageToggle {}
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| {
                                navigator().push(Route::ChatPage {});
                            },
                            Icon::<LdMaximize2> { icon: LdMaximize2, width: 16, height: 16 }
                            span { class: "dashboard-action-label", "{t(locale, Msg::OpenFullChat)}" }
                        }
                        if let Some(user) = user.as_ref() {
                            span { class: "dashboard-user", "{user.display_name}" }
                        }
                        Button { variant: ButtonVariant::Outline, onclick: sign_out,
                            Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                            span { class: "dashboard-action-label", "{t(locale, Msg::SignOut)}" }
                        }
                    }
                }

                div { class: "page-content", {children} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthState, SessionStatus};
    use crate::i18n::LocaleState;
    use pretty_assertions::assert_eq;
    use shared_types::{AuthUser, Locale};

    #[component]
    fn Shell(page: DashboardPage, locale: Locale) -> Element {
        use_context_provider(|| {
            AuthState::with_status(SessionStatus::Authenticated(AuthUser {
                id: 3,
                username: "thurgood".into(),
                display_name: "Thurgood Marshall".into(),
                email: "tm@example.com".into(),
                role: "user".into(),
                locale,
            }))
        });
        use_context_provider(|| LocaleState::new(locale));
        rsx! {
            DashboardLayout { current_page: page,
                p { class: "content-marker", "content" }
            }
        }
    }

    fn sidebar_html(html: &str) -> &str {
        let start = html.find("<aside").unwrap();
        let end = html.find("</aside>").unwrap();
        &html[start..end]
    }

    #[test]
    fn only_current_page_is_highlighted() {
        for page in ALL_DASHBOARD_PAGES.iter().copied() {
            let html = dioxus_ssr::render_element(rsx! { Shell { page, locale: Locale::En } });
            let sidebar = sidebar_html(&html);
            let active: Vec<&str> = sidebar
                .split("<button")
                .filter(|b| b.contains("data-active=\"true\""))
                .collect();
            assert_eq!(active.len(), 1, "{page:?}");
            assert!(active[0].contains(t(Locale::En, nav_label(page))));
        }
    }

    #[test]
    fn nav_entries_follow_page_order() {
        let html = dioxus_ssr::render_element(rsx! {
            Shell { page: DashboardPage::Chat, locale: Locale::En }
        });
        let sidebar = sidebar_html(&html);
        let positions: Vec<usize> = ["Chat", "Precedents", "Documents"]
            .iter()
            .map(|label| sidebar.find(&format!(">{label}<")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn header_shows_title_user_and_children_once() {
        let html = dioxus_ssr::render_element(rsx! {
            Shell { page: DashboardPage::Upload, locale: Locale::Es }
        });
        assert!(html.contains("Documentos"));
        assert!(html.contains("Cerrar sesión"));
        assert!(html.contains("Thurgood Marshall"));
        assert!(html.contains(">TM<"));
        assert_eq!(html.matches("content-marker").count(), 1);
    }
}
