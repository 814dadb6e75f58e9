//! Minimal client for the Anthropic Messages API, plus the JSON recovery
//! helpers used to pull structured payloads out of free-form model replies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{KlipushkaError, Result};

pub const MODEL: &str = "claude-sonnet-4-5-20250929";
pub const MAX_TOKENS: u32 = 2048;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct Client {
    http: reqwest::Client,
    api_key: String,
}

impl Client {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Send a single-turn prompt and return the raw text of the reply.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "model": MODEL,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
            }))
            .send()
            .await?
            .json::<Value>()
            .await?;

        let text = response["content"][0]["text"].as_str().ok_or_else(|| {
            KlipushkaError::AnalysisFailed {
                reason: format!("Invalid API response: {response:?}"),
            }
        })?;

        Ok(text.to_string())
    }
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Greedy match from the first `{` to the last `}`.
///
/// The prompts demand pure JSON but the model may still wrap it in prose;
/// this assumes the outermost braces delimit a single object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_code_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start <= end).then(|| &text[start..=end])
}

/// Greedy match from the first `[` to the last `]`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let text = strip_code_fences(text);
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start <= end).then(|| &text[start..=end])
}

/// Decode the object embedded in a reply, or the whole reply when no
/// braces are found. Decode errors propagate to the caller.
pub fn decode_object<T: DeserializeOwned>(response: &str) -> Result<T> {
    let payload = extract_json_object(response).unwrap_or(response);
    Ok(serde_json::from_str(payload)?)
}

/// Array counterpart of [`decode_object`].
pub fn decode_array<T: DeserializeOwned>(response: &str) -> Result<Vec<T>> {
    let payload = extract_json_array(response).unwrap_or(response);
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_extracted_from_surrounding_prose() {
        let text = "Here is the metadata you asked for:\n{\"title\": \"T\"}\nEnjoy!";
        assert_eq!(extract_json_object(text), Some("{\"title\": \"T\"}"));
    }

    #[test]
    fn object_extraction_spans_nested_braces() {
        let text = "{\"a\": {\"b\": 2}}";
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn array_extracted_from_code_fence() {
        let text = "```json\n[{\"start_time\": 1.0}]\n```";
        assert_eq!(extract_json_array(text), Some("[{\"start_time\": 1.0}]"));
    }

    #[test]
    fn fence_without_info_string_is_stripped() {
        let text = "```\n[1, 2]\n```";
        assert_eq!(extract_json_array(text), Some("[1, 2]"));
    }

    #[test]
    fn no_brackets_yields_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_array("no json here"), None);
    }

    #[test]
    fn decode_falls_through_to_whole_reply_and_fails_loudly() {
        let result: Result<Value> = decode_object("the model refused to answer");
        assert!(matches!(result, Err(KlipushkaError::Json(_))));
    }

    #[test]
    fn decode_array_recovers_payload_from_prose() {
        let values: Vec<Value> = decode_array("Sure! [1, 2, 3] -- hope that helps").unwrap();
        assert_eq!(values.len(), 3);
    }
}
