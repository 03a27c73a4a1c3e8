pub const INVALID_STYLE_MESSAGE: &str = "Invalid style. Choose 'savage' or 'sarcastic'.";
pub const ERROR_PREFIX: &str = "Error: ";

pub const SERVER_NAME: &str = "RoastMaster";
pub const SERVER_INSTRUCTIONS: &str = "Savage & Sarcastic comeback generator";

pub const MCP_PATH: &str = "/mcp";
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_API_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";
pub const DEFAULT_CLIENT_ID: &str = "puch-client";

pub const CHANNEL_BUFFER_SIZE: usize = 8;
