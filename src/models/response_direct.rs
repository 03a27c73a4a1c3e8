use crate::models::request::MessageAssistant;

use super::{FinishReason, Usage};
use serde::{self, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: i32,
    pub message: MessageAssistant,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Content of the first choice, if the provider returned any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_response() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "  Nice try.  "},
                "finish_reason": "eos",
                "logprobs": null
            }],
            "usage": {"prompt_tokens": 30, "completion_tokens": 4, "total_tokens": 34}
        }"#;
        let completion: ChatCompletion = serde_json::from_str(body).unwrap();
        assert_eq!(completion.first_content(), Some("  Nice try.  "));
        assert_eq!(completion.choices[0].finish_reason, Some(FinishReason::Eos));
        assert_eq!(completion.usage.unwrap().total_tokens, 34);
    }

    #[test]
    fn test_first_content_without_choices() {
        let completion: ChatCompletion = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(completion.first_content().is_none());
    }

    #[test]
    fn test_unknown_finish_reason() {
        let choice: Choice =
            serde_json::from_str(r#"{"message": {"content": "x"}, "finish_reason": "abort"}"#)
                .unwrap();
        assert_eq!(choice.finish_reason, Some(FinishReason::Other));
    }
}
