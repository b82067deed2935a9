use dioxus::prelude::*;
use shared_types::{FeatureFlags, Locale};

mod auth;
mod components;
mod i18n;
mod routes;
use auth::{AuthState, SessionStatus};
use i18n::LocaleState;
use routes::Route;

const THEME: Asset = asset!("/assets/theme.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let flags = server::config::load_feature_flags();
        server::health::record_start_time();
        tracing::info!(
            llm = flags.llm,
            s3 = flags.s3,
            registration = flags.registration,
            "starting counselor"
        );

        let pool = server::db::get_db().await?.clone();
        let precedents = server::precedent_index::get_precedents().await?;
        tracing::info!(precedents = precedents.len(), "precedent index ready");
        server::storage::document_store().await?;

        let state = server::db::AppState {
            pool: pool.clone(),
            precedents,
        };

        // Uploads travel base64-encoded inside the server function body.
        let max_upload = usize::try_from(server::config::max_upload_bytes()).unwrap_or(usize::MAX);
        let max_body = (max_upload / 3).saturating_mul(4).saturating_add(64 * 1024);

        let router = dioxus::server::router(App)
            .merge(server::openapi::api_router(state))
            .layer(axum::extract::DefaultBodyLimit::max(max_body))
            .layer(axum::middleware::from_fn_with_state(
                pool,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Fetch feature flags once and provide via context (defaults all-off on error)
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);

    let mut auth = use_context_provider(AuthState::new);
    let mut locale = use_context_provider(|| LocaleState::new(Locale::default()));

    // Resolve the session once; later sign-in and sign-out update AuthState directly.
    let session =
        use_server_future(move || async move { server::api::get_current_user().await })?;

    if *auth.status.peek() == SessionStatus::Pending {
        if let Some(result) = session.read().as_ref() {
            let user = match result {
                Ok(user) => user.clone(),
                Err(err) => {
                    tracing::warn!(%err, "could not resolve session");
                    None
                }
            };
            if let Some(user) = &user {
                locale.locale.set(user.locale);
            }
            auth.resolve(user);
        }
    }

    rsx! {
        document::Link { rel: "stylesheet", href: THEME }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Loading…" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
