use dioxus::prelude::*;
use shared_types::{Locale, ALL_LOCALES};
use shared_ui::{SegmentOption, SegmentedControl};

use crate::auth::use_auth;
use crate::i18n::{persist_locale, t, LocaleState, Msg};

/// EN/ES switch. The active language lives in [`LocaleState`]; signed-in
/// users also get the choice saved on their account.
#[component]
pub fn LanguageToggle() -> Element {
    let mut state = use_context::<LocaleState>();
    let auth = use_auth();
    let current = (state.locale)();

    let options: Vec<SegmentOption> = ALL_LOCALES
        .iter()
        .map(|locale| {
            SegmentOption::new(locale.as_str(), locale.short_label())
                .with_title(locale.native_name())
        })
        .collect();

    rsx! {
        SegmentedControl {
            options,
            selected: current.as_str(),
            aria_label: t(current, Msg::Language),
            on_change: move |code: String| {
                let next = Locale::from_str_or_default(&code);
                state.locale.set(next);
                persist_locale(next);
                if auth.is_authenticated() {
                    spawn(async move {
                        if let Err(err) = server::api::set_preferred_locale(next).await {
                            tracing::warn!(%err, locale = next.as_str(), "failed to save locale preference");
                        }
                    });
                }
            },
        }
    }
}
