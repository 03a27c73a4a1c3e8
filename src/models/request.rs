use serde::{self, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageUser {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageAssistant {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    User(MessageUser),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatCompletionCreate {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatCompletionCreate {
    /// A single-turn request carrying `prompt` as the user message.
    pub fn user_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message::User(MessageUser {
                content: prompt.to_string(),
            })],
        }
    }
}
