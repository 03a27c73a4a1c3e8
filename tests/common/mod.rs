#![allow(dead_code)]

use std::sync::Arc;

use reqwest::Client;

use roastmaster::auth::{StaticTokenVerifier, TokenVerifier};
use roastmaster::comeback::ComebackGenerator;
use roastmaster::config::{AuthConfig, Config, ProviderConfig, ServerConfig};
use roastmaster::identity::IdentityValidator;
use roastmaster::llm_client::{CompletionProvider, LLMClient};
use roastmaster::service::McpService;
use roastmaster::tools::ToolRegistry;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_PHONE: &str = "919876543210";
pub const TEST_MODEL: &str = "test-model";
pub const TEST_API_KEY: &str = "test-key";

pub fn create_test_config(api_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
            json_response: false,
            cors_allowed_origins: vec![],
        },
        provider: ProviderConfig {
            api_url,
            api_key: TEST_API_KEY.to_string(),
            model: TEST_MODEL.to_string(),
        },
        auth: AuthConfig::Static {
            token: TEST_TOKEN.to_string(),
            client_id: "puch-client".to_string(),
        },
        phone_number: TEST_PHONE.to_string(),
    }
}

pub fn create_llm_client(config: &Config) -> LLMClient {
    LLMClient::new(Client::new(), &config.provider)
}

pub fn create_registry(provider: Arc<dyn CompletionProvider>) -> ToolRegistry {
    ToolRegistry::new(
        IdentityValidator::new(TEST_PHONE),
        ComebackGenerator::new(provider),
    )
}

pub fn create_service(provider: Arc<dyn CompletionProvider>) -> Arc<McpService> {
    Arc::new(McpService::new(create_registry(provider)))
}

pub fn create_verifier() -> Arc<dyn TokenVerifier> {
    Arc::new(StaticTokenVerifier::new(TEST_TOKEN, "puch-client"))
}
