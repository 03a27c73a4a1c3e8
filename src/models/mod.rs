pub mod jsonrpc;
pub mod mcp;
pub mod request;
pub mod response_direct;

use serde::{self, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    Eos,
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: i32,
    #[serde(default)]
    pub completion_tokens: i32,
    #[serde(default)]
    pub total_tokens: i32,
}
