use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBookOpen, LdSearch};
use dioxus_free_icons::Icon;
use shared_types::{AppError, Locale, PrecedentHit, PrecedentQuery};
use shared_ui::{
    Badge, BadgeVariant, Button, Card, CardContent, CardHeader, CardTitle, Input, PageHeader,
    Skeleton,
};
use uuid::Uuid;

use crate::i18n::{t, use_locale, Msg};

/// Query to send for the form values, or `None` when there is nothing to
/// search for. An empty jurisdiction means all of them.
pub(crate) fn build_query(text: &str, jurisdiction: &str) -> Option<PrecedentQuery> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let query = PrecedentQuery::new(text);
    let jurisdiction = jurisdiction.trim();
    Some(if jurisdiction.is_empty() {
        query
    } else {
        query.with_jurisdiction(jurisdiction)
    })
}

pub(crate) fn result_count(locale: Locale, count: usize) -> String {
    if count == 1 {
        format!("1 {}", t(locale, Msg::Result))
    } else {
        format!("{count} {}", t(locale, Msg::Results))
    }
}

fn score_label(score: f32) -> String {
    format!("{score:.2}")
}

/// Numbers searches so a slow response cannot replace a newer one.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct SearchGeneration {
    latest: u64,
}

impl SearchGeneration {
    /// Start a search and return its ticket. Earlier tickets go stale.
    pub(crate) fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SearchState {
    Idle,
    Searching,
    Done(Vec<PrecedentHit>),
    Failed(String),
}

/// Search form over the precedent library with expandable results.
#[component]
pub fn PrecedentFinderInterface() -> Element {
    let locale = use_locale();
    let mut text = use_signal(String::new);
    let mut jurisdiction = use_signal(String::new);
    let mut state = use_signal(|| SearchState::Idle);
    let mut expanded = use_signal(|| Option::<Uuid>::None);
    let mut generation = use_signal(SearchGeneration::default);

    let jurisdictions = use_resource(move || async move { server::api::list_jurisdictions().await });
    let jurisdiction_options: Vec<String> = match &*jurisdictions.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    let handle_search = move |evt: FormEvent| async move {
        evt.prevent_default();
        let ticket = generation.write().begin();
        let Some(query) = build_query(&text(), &jurisdiction()) else {
            state.set(SearchState::Idle);
            return;
        };
        state.set(SearchState::Searching);
        expanded.set(None);
        let outcome = server::api::search_precedents(query).await;
        if !generation.peek().is_current(ticket) {
            return;
        }
        match outcome {
            Ok(hits) => state.set(SearchState::Done(hits)),
            Err(e) => state.set(SearchState::Failed(AppError::friendly_message(&e.to_string()))),
        }
    };

    let results = match state() {
        SearchState::Idle => rsx! {
            p { class: "precedent-hint", "{t(locale, Msg::SearchPrompt)}" }
        },
        SearchState::Searching => rsx! { Skeleton { lines: 3 } },
        SearchState::Failed(message) => rsx! {
            div { class: "precedent-error", role: "alert", "{message}" }
        },
        SearchState::Done(hits) if hits.is_empty() => rsx! {
            p { class: "precedent-empty", "{t(locale, Msg::NoPrecedents)}" }
        },
        SearchState::Done(hits) => {
            let count = result_count(locale, hits.len());
            let open_id = expanded();
            let items = hits.into_iter().map(|hit| {
                let id = hit.precedent.id;
                rsx! {
                    PrecedentResult {
                        key: "{id}",
                        open: open_id == Some(id),
                        on_toggle: move |id: Uuid| {
                            let next = if expanded() == Some(id) { None } else { Some(id) };
                            expanded.set(next);
                        },
                        hit,
                    }
                }
            });
            rsx! {
                p { class: "precedent-count", "{count}" }
                ul { class: "precedent-results", {items} }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./precedent_finder.css") }

        div { class: "precedent-panel",
            PageHeader {
                title: t(locale, Msg::PrecedentTitle),
                description: t(locale, Msg::PrecedentDescription).to_string(),
            }

            form { class: "precedent-form", onsubmit: handle_search,
                Input {
                    class: "precedent-query",
                    value: text(),
                    placeholder: t(locale, Msg::SearchPlaceholder),
                    on_input: move |e: FormEvent| text.set(e.value()),
                }
                label { class: "precedent-jurisdiction",
                    span { "{t(locale, Msg::Jurisdiction)}" }
                    select {
                        value: jurisdiction(),
                        onchange: move |e: FormEvent| jurisdiction.set(e.value()),
                        option { value: "", "{t(locale, Msg::AllJurisdictions)}" }
                        for name in jurisdiction_options {
                            option { key: "{name}", value: "{name}", "{name}" }
                        }
                    }
                }
                Button {
                    button_type: "submit",
                    loading: state() == SearchState::Searching,
                    Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                    "{t(locale, Msg::Search)}"
                }
            }

            {results}
        }
    }
}

#[component]
fn PrecedentResult(hit: PrecedentHit, open: bool, on_toggle: EventHandler<Uuid>) -> Element {
    let locale = use_locale();
    let precedent = &hit.precedent;
    let id = precedent.id;

    rsx! {
        li { class: "precedent-result", "data-open": if open { "true" } else { "false" },
            Card {
                CardHeader {
                    div { class: "precedent-result-heading",
                        Icon::<LdBookOpen> { icon: LdBookOpen, width: 16, height: 16 }
                        CardTitle { "{precedent.title}" }
                    }
                    div { class: "precedent-meta",
                        span { class: "precedent-citation", "{precedent.citation}" }
                        span { class: "precedent-court", "{precedent.court} · {precedent.decided_year}" }
                        Badge { variant: BadgeVariant::Outline, "{precedent.jurisdiction}" }
                        Badge { variant: BadgeVariant::Secondary,
                            title: t(locale, Msg::Relevance),
                            {score_label(hit.score)}
                        }
                    }
                }
                CardContent {
                    if open {
                        p { class: "precedent-summary", "{precedent.summary}" }
                    } else {
                        p { class: "precedent-snippet", "{hit.snippet}" }
                    }
                    button {
                        r#type: "button",
                        class: "precedent-toggle",
                        "aria-expanded": if open { "true" } else { "false" },
                        onclick: move |_| on_toggle.call(id),
                        if open {
                            "{t(locale, Msg::HideSummary)}"
                        } else {
                            "{t(locale, Msg::ShowSummary)}"
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
    use crate::i18n::LocaleState;
    use pretty_assertions::assert_eq;
    use shared_types::Precedent;

    #[test]
    fn only_the_latest_search_is_current() {
        let mut generation = SearchGeneration::default();
        let slow = generation.begin();
        let fast = generation.begin();
        assert!(!generation.is_current(slow));
        assert!(generation.is_current(fast));

        // A blank resubmit also retires the search still in flight.
        let _blank = generation.begin();
        assert!(!generation.is_current(fast));
    }

    fn hit() -> PrecedentHit {
        PrecedentHit {
            precedent: Precedent {
                id: Uuid::nil(),
                citation: "384 U.S. 436".into(),
                title: "Miranda v. Arizona".into(),
                court: "Supreme Court of the United States".into(),
                jurisdiction: "Federal".into(),
                decided_year: 1966,
                summary: "Statements from custodial interrogation are inadmissible without warnings.".into(),
            },
            score: 3.14159,
            snippet: "Statements from custodial interrogation…".into(),
        }
    }

    #[component]
    fn ResultCard(open: bool) -> Element {
        use_context_provider(|| LocaleState::new(Locale::En));
        rsx! { PrecedentResult { hit: hit(), open, on_toggle: |_| {} } }
    }

    #[test]
    fn blank_queries_are_not_sent() {
        assert_eq!(build_query("   ", "Federal"), None);
        assert_eq!(build_query("", ""), None);
    }

    #[test]
    fn jurisdiction_is_optional() {
        assert_eq!(build_query(" miranda ", ""), Some(PrecedentQuery::new("miranda")));
        assert_eq!(
            build_query("miranda", "California"),
            Some(PrecedentQuery::new("miranda").with_jurisdiction("California"))
        );
    }

    #[test]
    fn count_is_localized() {
        assert_eq!(result_count(Locale::En, 3), "3 results");
        assert_eq!(result_count(Locale::Es, 1), "1 resultado");
        assert_eq!(result_count(Locale::Es, 0), "0 resultados");
    }

    #[test]
    fn collapsed_result_shows_snippet_and_score() {
        let html = dioxus_ssr::render_element(rsx! { ResultCard { open: false } });
        assert!(html.contains("Miranda v. Arizona"));
        assert!(html.contains("384 U.S. 436"));
        assert!(html.contains("3.14"));
        assert!(html.contains("precedent-snippet"));
        assert!(!html.contains("precedent-summary"));
        assert!(html.contains("Show full summary"));
    }

    #[test]
    fn expanded_result_shows_full_summary() {
        let html = dioxus_ssr::render_element(rsx! { ResultCard { open: true } });
        assert!(html.contains("precedent-summary"));
        assert!(html.contains("aria-expanded=\"true\""));
        assert!(html.contains("Hide summary"));
    }
}
