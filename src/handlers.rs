use actix_web::http::{StatusCode, header};
use actix_web::mime;
use actix_web::web::{Bytes, Data};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::auth::Authenticated;
use crate::config::Config;
use crate::consts;
use crate::errors::RoastError;
use crate::models::jsonrpc::{
    INVALID_REQUEST, JsonRpcError, JsonRpcRequest, JsonRpcResponse, PARSE_ERROR,
};
use crate::service::McpService;

fn rpc_error(status: StatusCode, code: i32, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(JsonRpcResponse::failure(None, JsonRpcError::new(code, message)))
}

fn wants_event_stream(req: &HttpRequest, config: &Config) -> bool {
    if config.server.json_response {
        return false;
    }
    req.headers()
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains(mime::TEXT_EVENT_STREAM.essence_str()))
}

pub(crate) fn sse_event(response: &JsonRpcResponse) -> Result<Bytes, RoastError> {
    let data = serde_json::to_string(response)?;
    Ok(Bytes::from(format!("event: message\ndata: {data}\n\n")))
}

pub async fn mcp_post(
    _auth: Authenticated,
    service: Data<McpService>,
    config: Data<Config>,
    req: HttpRequest,
    body: Bytes,
) -> HttpResponse {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            log::info!("unparseable request body: {e}");
            return rpc_error(StatusCode::BAD_REQUEST, PARSE_ERROR, format!("Parse error: {e}"));
        }
    };

    match &value {
        Value::Object(object) if !object.contains_key("method") => {
            // A client reply to a server-initiated request; we never send any.
            return HttpResponse::Accepted().finish();
        }
        Value::Object(_) => {}
        Value::Array(_) => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                "Batch requests are not supported",
            );
        }
        _ => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                "Request must be a JSON object",
            );
        }
    }

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            );
        }
    };

    if request.is_notification() {
        service.handle(request).await;
        return HttpResponse::Accepted().finish();
    }

    if wants_event_stream(&req, &config) {
        let (sender, receiver) = mpsc::channel::<Result<Bytes, RoastError>>(consts::CHANNEL_BUFFER_SIZE);
        actix_web::rt::spawn(async move {
            if let Some(response) = service.handle(request).await {
                if sender.send(sse_event(&response)).await.is_err() {
                    log::debug!("client disconnected before {:?} was answered", response.id);
                }
            }
        });

        return HttpResponse::Ok()
            .content_type(mime::TEXT_EVENT_STREAM)
            .insert_header((header::CACHE_CONTROL, "no-cache"))
            .streaming(ReceiverStream::new(receiver));
    }

    match service.handle(request).await {
        Some(response) => HttpResponse::Ok().json(response),
        None => HttpResponse::Accepted().finish(),
    }
}

/// The server is stateless: no standalone event stream and no sessions to end.
pub async fn mcp_method_not_allowed(_auth: Authenticated) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .finish()
}
