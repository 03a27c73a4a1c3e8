#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roastmaster::errors::RoastError;
use roastmaster::llm_client::CompletionProvider;

/// Returns a canned reply and records every prompt it receives.
pub struct MockProvider {
    reply: Result<String, RoastError>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: RoastError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, RoastError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}
