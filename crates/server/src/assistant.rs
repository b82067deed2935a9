//! Answers legal research questions, either through the configured LLM or
//! from the local precedent index alone.

use shared_types::{AppError, ChatTurn, Locale, PrecedentHit, PrecedentQuery};

use crate::llm::{self, LlmConfig, WireMessage};

/// Most recent turns forwarded to the LLM.
pub const MAX_HISTORY_TURNS: usize = 20;

/// Precedents attached to each question as context.
pub const CONTEXT_PRECEDENTS: usize = 3;

/// Reply to `question` given the prior conversation.
#[tracing::instrument(skip(history, question), fields(turns = history.len()))]
pub async fn reply(history: &[ChatTurn], question: &str, locale: Locale) -> Result<String, AppError> {
    let index = crate::precedent_index::get_precedents().await?;
    let hits = index.search(&PrecedentQuery::new(question).with_limit(CONTEXT_PRECEDENTS));

    if crate::config::feature_flags().llm {
        if let Some(config) = LlmConfig::from_env() {
            let messages = build_messages(history, question, locale, &hits);
            match llm::complete(&config, &messages).await {
                Ok(answer) => return Ok(answer),
                Err(e) => tracing::warn!(error = %e, "LLM unavailable, answering from the precedent index"),
            }
        }
    }

    Ok(offline_reply(&hits, locale))
}

/// System prompt fixing the assistant's role and answer language.
pub fn system_prompt(locale: Locale, hits: &[PrecedentHit]) -> String {
    let language = match locale {
        Locale::En => "English",
        Locale::Es => "Spanish",
    };
    let mut prompt = format!(
        "You are Counselor, a legal research assistant. Explain the law clearly, \
         cite the precedents you rely on, and note that your answers are not legal advice. \
         Always answer in {language}."
    );
    if !hits.is_empty() {
        prompt.push_str("\n\nRelevant precedents:");
        for hit in hits {
            let p = &hit.precedent;
            prompt.push_str(&format!(
                "\n- {} ({}, {} {}): {}",
                p.title, p.citation, p.court, p.decided_year, hit.snippet
            ));
        }
    }
    prompt
}

/// System prompt, the last [`MAX_HISTORY_TURNS`] turns, then the question.
pub fn build_messages(
    history: &[ChatTurn],
    question: &str,
    locale: Locale,
    hits: &[PrecedentHit],
) -> Vec<WireMessage> {
    let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
    std::iter::once(WireMessage::system(system_prompt(locale, hits)))
        .chain(history[skip..].iter().map(WireMessage::from))
        .chain(std::iter::once(WireMessage::from(&ChatTurn::user(question))))
        .collect()
}

/// Reply composed from precedent hits without any external call.
pub fn offline_reply(hits: &[PrecedentHit], locale: Locale) -> String {
    if hits.is_empty() {
        return match locale {
            Locale::En => "I could not find related precedents for that question. \
                           Try naming the legal issue, a party, or a citation."
                .to_string(),
            Locale::Es => "No encontré precedentes relacionados con esa pregunta. \
                           Intente indicar el tema jurídico, una de las partes o una cita."
                .to_string(),
        };
    }

    let intro = match locale {
        Locale::En => "Here are the precedents most related to your question:",
        Locale::Es => "Estos son los precedentes más relacionados con su pregunta:",
    };
    let mut out = intro.to_string();
    for hit in hits.iter().take(CONTEXT_PRECEDENTS) {
        let p = &hit.precedent;
        out.push_str(&format!("\n\n• {} — {}: {}", p.citation, p.title, hit.snippet));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precedent_index::tests::sample_index;
    use pretty_assertions::assert_eq;

    fn hits(q: &str) -> Vec<PrecedentHit> {
        sample_index().search(&PrecedentQuery::new(q).with_limit(CONTEXT_PRECEDENTS))
    }

    #[test]
    fn offline_reply_lists_matches() {
        let reply = offline_reply(&hits("segregation"), Locale::En);
        assert!(reply.starts_with("Here are the precedents"));
        assert!(reply.contains("347 U.S. 483 — Brown v. Board of Education"));
    }

    #[test]
    fn offline_reply_is_localized() {
        let reply = offline_reply(&hits("segregation"), Locale::Es);
        assert!(reply.starts_with("Estos son los precedentes"));
        assert!(offline_reply(&[], Locale::Es).starts_with("No encontré"));
        assert!(offline_reply(&[], Locale::En).starts_with("I could not find"));
    }

    #[test]
    fn messages_keep_only_recent_history() {
        let history: Vec<ChatTurn> = (0..30)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("q{i}"))
                } else {
                    ChatTurn::assistant(format!("a{i}"))
                }
            })
            .collect();
        let messages = build_messages(&history, "latest", Locale::En, &[]);

        assert_eq!(messages.len(), MAX_HISTORY_TURNS + 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "q10");
        assert_eq!(messages.last().map(|m| m.content.as_str()), Some("latest"));
    }

    #[test]
    fn system_prompt_names_language_and_context() {
        let prompt = system_prompt(Locale::Es, &hits("judicial review"));
        assert!(prompt.contains("Always answer in Spanish."));
        assert!(prompt.contains("Marbury v. Madison (5 U.S. 137"));
    }
}
