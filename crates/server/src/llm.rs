use serde::{Deserialize, Serialize};
use shared_types::{ChatRole, ChatTurn};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl LlmConfig {
    /// `None` when `LLM_API_KEY` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self {
            api_key,
            api_url,
            model,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for WireMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            },
            content: turn.content.clone(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Send `messages` and return the first choice's text.
#[tracing::instrument(skip(config, messages), fields(model = %config.model, count = messages.len()))]
pub async fn complete(config: &LlmConfig, messages: &[WireMessage]) -> Result<String, String> {
    let body = CompletionRequest {
        model: &config.model,
        messages,
        temperature: 0.2,
    };

    let response = reqwest::Client::new()
        .post(&config.api_url)
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("LLM request failed: {e}"))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(format!("LLM API error ({status}): {text}"));
    }

    let parsed: CompletionResponse = response
        .json()
        .await
        .map_err(|e| format!("LLM response was not valid JSON: {e}"))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| "LLM returned an empty completion".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn turns_map_to_wire_roles() {
        assert_eq!(WireMessage::from(&ChatTurn::user("hi")).role, "user");
        assert_eq!(WireMessage::from(&ChatTurn::assistant("hello")).role, "assistant");
    }

    #[test]
    fn request_serializes_openai_shape() {
        let messages = vec![WireMessage::system("be brief"), WireMessage::from(&ChatTurn::user("q"))];
        let body = CompletionRequest {
            model: "m",
            messages: &messages,
            temperature: 0.2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "q");
    }

    #[test]
    fn response_without_content_is_tolerated() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
