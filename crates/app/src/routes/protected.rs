use dioxus::prelude::*;

use crate::auth::{use_auth, SessionStatus};
use crate::i18n::{t, use_locale, Msg};
use crate::routes::Route;

/// What the guard shows for a session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Wait,
    Redirect,
}

pub fn guard_decision(status: &SessionStatus) -> GuardDecision {
    match status {
        SessionStatus::Authenticated(_) => GuardDecision::Render,
        SessionStatus::Pending => GuardDecision::Wait,
        SessionStatus::Anonymous => GuardDecision::Redirect,
    }
}

/// Renders `children` only for a signed-in session. Anonymous visitors are
/// sent to `/login` with the current path as the redirect target.
#[component]
pub fn ProtectedRoute(children: Element) -> Element {
    let auth = use_auth();
    let locale = use_locale();
    let router = try_use_context::<RouterContext>();

    use_effect(move || {
        if guard_decision(&auth.status.read()) != GuardDecision::Redirect {
            return;
        }
        if let Some(router) = router {
            let here = router.current::<Route>().to_string();
            router.replace(Route::Login {
                redirect: Some(here),
            });
        }
    });

    let decision = guard_decision(&auth.status.read());
    match decision {
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Wait => rsx! {
            div { class: "auth-guard-loading", "data-guard": "wait",
                p { "{t(locale, Msg::Loading)}" }
            }
        },
        GuardDecision::Redirect => rsx! {
            div { class: "auth-guard-loading", "data-guard": "redirect",
                p { "{t(locale, Msg::RedirectingToSignIn)}" }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthState;
    use crate::i18n::LocaleState;
    use shared_types::{AuthUser, Locale};

    fn user() -> AuthUser {
        AuthUser {
            id: 1,
            username: "rbg".into(),
            display_name: "Ruth Ginsburg".into(),
            email: "rbg@example.com".into(),
            role: "user".into(),
            locale: Locale::En,
        }
    }

    #[component]
    fn Guarded(status: SessionStatus) -> Element {
        use_context_provider(|| AuthState::with_status(status.clone()));
        use_context_provider(|| LocaleState::new(Locale::Es));
        rsx! {
            ProtectedRoute {
                div { class: "secret", "panel" }
            }
        }
    }

    #[test]
    fn decision_follows_session_status() {
        assert_eq!(guard_decision(&SessionStatus::Pending), GuardDecision::Wait);
        assert_eq!(guard_decision(&SessionStatus::Anonymous), GuardDecision::Redirect);
        assert_eq!(
            guard_decision(&SessionStatus::Authenticated(user())),
            GuardDecision::Render
        );
    }

    #[test]
    fn authenticated_session_renders_children() {
        let html = dioxus_ssr::render_element(rsx! {
            Guarded { status: SessionStatus::Authenticated(user()) }
        });
        assert!(html.contains("class=\"secret\""));
        assert!(!html.contains("data-guard"));
    }

    #[test]
    fn anonymous_session_shows_localized_redirect_notice() {
        let html = dioxus_ssr::render_element(rsx! {
            Guarded { status: SessionStatus::Anonymous }
        });
        assert!(!html.contains("secret"));
        assert!(html.contains("data-guard=\"redirect\""));
        assert!(html.contains(t(Locale::Es, Msg::RedirectingToSignIn)));
    }

    #[test]
    fn pending_session_waits() {
        let html = dioxus_ssr::render_element(rsx! {
            Guarded { status: SessionStatus::Pending }
        });
        assert!(!html.contains("secret"));
        assert!(html.contains("data-guard=\"wait\""));
    }
}
