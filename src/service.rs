use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::consts;
use crate::errors::RoastError;
use crate::models::jsonrpc::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND,
};
use crate::models::mcp::{
    CallToolParams, InitializeParams, InitializeResult, ListToolsResult, ServerCapabilities,
    ServerInfo, ToolsCapability,
};
use crate::tools::ToolRegistry;

/// Dispatches MCP JSON-RPC messages onto the tool registry.
pub struct McpService {
    tools: ToolRegistry,
    server_info: ServerInfo,
    instructions: String,
}

fn to_result<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))
}

fn parse_params<T: DeserializeOwned + Default>(params: Option<Value>) -> Result<T, JsonRpcError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}"))),
    }
}

fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| {
            consts::SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .find(|supported| **supported == v)
                .copied()
        })
        .unwrap_or(consts::LATEST_PROTOCOL_VERSION)
}

impl McpService {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            server_info: ServerInfo {
                name: consts::SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: consts::SERVER_INSTRUCTIONS.to_string(),
        }
    }

    /// Returns `None` for notifications, which never get a response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            log::debug!("notification {}", request.method);
            return None;
        }

        let id = request.id.clone();
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        log::debug!("request {:?} {}", id, request.method);
        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.tools.definitions(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = parse_params(params)?;
        if let Some(client) = &params.client_info {
            log::info!(
                "initialize from {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            );
        }

        to_result(InitializeResult {
            protocol_version: negotiate_protocol_version(params.protocol_version.as_deref())
                .to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.server_info.clone(),
            instructions: Some(self.instructions.clone()),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = match params {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?,
            None => return Err(JsonRpcError::new(INVALID_PARAMS, "Missing params")),
        };

        match self.tools.call(params).await {
            Ok(result) => to_result(result),
            Err(e @ RoastError::ToolNotFound(_)) => {
                Err(JsonRpcError::new(INVALID_PARAMS, e.to_string()))
            }
            Err(e) => Err(JsonRpcError::new(INTERNAL_ERROR, e.to_string())),
        }
    }
}
