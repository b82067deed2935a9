use crate::auth::use_auth;
use crate::i18n::{t, use_locale, LocaleState, Msg};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, FeatureFlags};
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input, Label};
use std::collections::HashMap;

/// Where to go after signing in. Only in-app paths are honored; anything
/// else (absolute URLs, protocol-relative paths, unknown routes) lands on
/// the dashboard.
pub fn post_login_route(redirect: Option<&str>) -> Route {
    redirect
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .and_then(|path| path.parse::<Route>().ok())
        .filter(|route| route.composition().is_some())
        .unwrap_or(Route::DashboardChatPage {})
}

/// Sign-in page. Accepts an optional `redirect` query param set by the
/// guard so the visitor returns to the page they asked for.
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut auth = use_auth();
    let mut locale_state = use_context::<LocaleState>();
    let locale = use_locale();
    let flags: FeatureFlags = use_context();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let destination = use_signal(move || post_login_route(redirect.as_deref()));

    if auth.is_authenticated() {
        navigator().replace(destination());
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password()).await {
            Ok(user) => {
                locale_state.locale.set(user.locale);
                auth.set_user(user);
                navigator().push(destination());
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "{t(locale, Msg::SignIn)}" }
                    CardDescription { "{t(locale, Msg::SignInDescription)}" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Label { html_for: "email", "{t(locale, Msg::Email)}" }
                            Input {
                                input_type: "email",
                                id: "email",
                                placeholder: "counsel@example.com",
                                value: email(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                                error: field_errors().get("email").cloned(),
                            }
                        }
                        div { class: "auth-field",
                            Label { html_for: "password", "{t(locale, Msg::Password)}" }
                            Input {
                                input_type: "password",
                                id: "password",
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                                error: field_errors().get("password").cloned(),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            disabled: loading(),
                            "{t(locale, Msg::SignIn)}"
                        }
                    }
                }

                if flags.registration {
                    CardFooter {
                        p { class: "auth-link",
                            "{t(locale, Msg::NoAccount)} "
                            Link { to: Route::Register {}, "{t(locale, Msg::CreateAccount)}" }
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
    use pretty_assertions::assert_eq;

    #[test]
    fn redirects_back_to_requested_page() {
        assert_eq!(
            post_login_route(Some("/dashboard/upload")),
            Route::DashboardUploadPage {}
        );
        assert_eq!(post_login_route(Some("/chat")), Route::ChatPage {});
    }

    #[test]
    fn falls_back_to_dashboard_chat() {
        let home = Route::DashboardChatPage {};
        assert_eq!(post_login_route(None), home);
        assert_eq!(post_login_route(Some("https://evil.example")), home);
        assert_eq!(post_login_route(Some("//evil.example/chat")), home);
        assert_eq!(post_login_route(Some("/no/such/page")), home);
        assert_eq!(post_login_route(Some("/login")), home);
    }
}
