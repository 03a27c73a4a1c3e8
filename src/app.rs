use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, Error, web};

use crate::auth::TokenVerifier;
use crate::config::{self, ServerConfig};
use crate::service::McpService;
use crate::{consts, handlers};

fn cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allowed_header("mcp-protocol-version")
        .max_age(3600);

    for origin in &config.cors_allowed_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }
    cors
}

pub fn create_app(
    service: Arc<McpService>,
    verifier: Arc<dyn TokenVerifier>,
    config: Arc<config::Config>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::default())
        .wrap(cors(&config.server))
        .wrap(NormalizePath::trim())
        // Roast messages are passed through verbatim, whatever their length.
        .app_data(web::PayloadConfig::new(usize::MAX))
        .app_data(Data::from(service))
        .app_data(Data::from(verifier))
        .app_data(Data::from(config))
        .service(
            web::resource(consts::MCP_PATH)
                .route(web::post().to(handlers::mcp_post))
                .route(web::get().to(handlers::mcp_method_not_allowed))
                .route(web::delete().to(handlers::mcp_method_not_allowed)),
        )
}
