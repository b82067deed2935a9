pub mod layout;
pub mod login;
pub mod not_found;
pub mod pages;
pub mod protected;
pub mod register;

use dioxus::prelude::*;
use shared_types::{DashboardPage, PageComposition, Panel};

use login::Login;
use not_found::NotFound;
use pages::{ChatPage, DashboardChatPage, DashboardPrecedentPage, DashboardUploadPage};
use register::Register;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },
    #[route("/register")]
    Register {},
    #[redirect("/", || Route::DashboardChatPage {})]
    #[redirect("/dashboard", || Route::DashboardChatPage {})]
    #[route("/chat")]
    ChatPage {},
    #[route("/dashboard/chat")]
    DashboardChatPage {},
    #[route("/dashboard/precedent")]
    DashboardPrecedentPage {},
    #[route("/dashboard/upload")]
    DashboardUploadPage {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Routes that mount a feature panel, in navigation order.
pub const PAGE_ROUTES: [Route; 4] = [
    Route::ChatPage {},
    Route::DashboardChatPage {},
    Route::DashboardPrecedentPage {},
    Route::DashboardUploadPage {},
];

impl Route {
    /// How the page behind this route is assembled. `None` for routes that
    /// are not feature pages (sign-in, sign-up, not found).
    pub fn composition(&self) -> Option<PageComposition> {
        let (shell, panel) = match self {
            Route::ChatPage {} => (None, Panel::Chat),
            Route::DashboardChatPage {} => (Some(DashboardPage::Chat), Panel::DashboardChat),
            Route::DashboardPrecedentPage {} => {
                (Some(DashboardPage::Precedent), Panel::PrecedentFinder)
            }
            Route::DashboardUploadPage {} => (Some(DashboardPage::Upload), Panel::DocumentUpload),
            Route::Login { .. } | Route::Register {} | Route::NotFound { .. } => return None,
        };
        Some(PageComposition {
            guarded: true,
            shell,
            panel,
        })
    }

    /// The `dashboard/*` route showing `page`.
    pub fn for_dashboard_page(page: DashboardPage) -> Route {
        match page {
            DashboardPage::Chat => Route::DashboardChatPage {},
            DashboardPage::Precedent => Route::DashboardPrecedentPage {},
            DashboardPage::Upload => Route::DashboardUploadPage {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ALL_DASHBOARD_PAGES;

    #[test]
    fn composition_table_matches_routes() {
        let rows: Vec<_> = PAGE_ROUTES
            .iter()
            .map(|route| (route.to_string(), route.composition()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (
                    "/chat".to_string(),
                    Some(PageComposition { guarded: true, shell: None, panel: Panel::Chat })
                ),
                (
                    "/dashboard/chat".to_string(),
                    Some(PageComposition {
                        guarded: true,
                        shell: Some(DashboardPage::Chat),
                        panel: Panel::DashboardChat,
                    })
                ),
                (
                    "/dashboard/precedent".to_string(),
                    Some(PageComposition {
                        guarded: true,
                        shell: Some(DashboardPage::Precedent),
                        panel: Panel::PrecedentFinder,
                    })
                ),
                (
                    "/dashboard/upload".to_string(),
                    Some(PageComposition {
                        guarded: true,
                        shell: Some(DashboardPage::Upload),
                        panel: Panel::DocumentUpload,
                    })
                ),
            ]
        );
    }

    #[test]
    fn dashboard_shell_literal_matches_path() {
        for page in ALL_DASHBOARD_PAGES {
            let route = Route::for_dashboard_page(*page);
            assert_eq!(route.to_string(), page.path());
            assert_eq!(route.composition().and_then(|c| c.shell), Some(*page));
        }
    }

    #[test]
    fn account_routes_have_no_composition() {
        assert_eq!(Route::Login { redirect: None }.composition(), None);
        assert_eq!(Route::Register {}.composition(), None);
        assert_eq!(
            Route::NotFound { segments: vec!["nope".into()] }.composition(),
            None
        );
    }

    #[test]
    fn parses_page_paths() {
        for route in PAGE_ROUTES {
            let parsed: Route = route.to_string().parse().unwrap();
            assert_eq!(parsed, route);
        }
        let unknown: Route = "/dashboard/settings".parse().unwrap();
        assert!(matches!(unknown, Route::NotFound { .. }));
    }
}
