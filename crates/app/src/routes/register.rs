use crate::auth::use_auth;
use crate::i18n::{t, use_locale, Msg};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, FeatureFlags};
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input, Label};
use std::collections::HashMap;

/// Account sign-up. Hidden behind the `registration` feature flag.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let locale = use_locale();
    let flags: FeatureFlags = use_context();
    let mut username = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if auth.is_authenticated() {
        navigator().replace(Route::DashboardChatPage {});
    }

    let handle_register = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::register(username(), display_name(), email(), password()).await {
            Ok(user) => {
                auth.set_user(user);
                navigator().push(Route::DashboardChatPage {});
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
                    CardTitle { "{t(locale, Msg::CreateAccount)}" }
                    CardDescription { "{t(locale, Msg::CreateAccountDescription)}" }
                }

                CardContent {
                    if !flags.registration {
                        div { class: "auth-error", role: "alert", "{t(locale, Msg::RegistrationClosed)}" }
                    } else {
                        if let Some(err) = error_msg() {
                            div { class: "auth-error", role: "alert", "{err}" }
                        }

                        form { onsubmit: handle_register,
                            div { class: "auth-field",
                                Label { html_for: "username", "{t(locale, Msg::Username)}" }
                                Input {
                                    id: "username",
                                    value: username(),
                                    on_input: move |e: FormEvent| username.set(e.value()),
                                    error: field_errors().get("username").cloned(),
                                }
                            }
                            div { class: "auth-field",
                                Label { html_for: "display_name", "{t(locale, Msg::DisplayName)}" }
                                Input {
                                    id: "display_name",
                                    value: display_name(),
                                    on_input: move |e: FormEvent| display_name.set(e.value()),
                                    error: field_errors().get("display_name").cloned(),
                                }
                            }
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
                                "{t(locale, Msg::CreateAccount)}"
                            }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-link",
                        "{t(locale, Msg::HaveAccount)} "
                        Link { to: Route::Login { redirect: None }, "{t(locale, Msg::SignIn)}" }
                    }
                }
            }
        }
    }
}
