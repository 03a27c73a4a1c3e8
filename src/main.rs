use std::sync::Arc;

use roastmaster::comeback::ComebackGenerator;
use roastmaster::config::{self, AuthConfig};
use roastmaster::identity::IdentityValidator;
use roastmaster::llm_client::LLMClient;
use roastmaster::service::McpService;
use roastmaster::tools::ToolRegistry;
use roastmaster::{app, auth, consts};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    log::info!("Initializing RoastMaster MCP server...");

    let config = config::load_config().map_err(std::io::Error::other)?;
    let verifier = auth::verifier_from_config(&config.auth).map_err(std::io::Error::other)?;
    log::info!(
        "auth mode: {}",
        match config.auth {
            AuthConfig::Static { .. } => "static token",
            AuthConfig::Jwt { .. } => "jwt",
        }
    );

    // No client-side timeout: the provider's own limits apply.
    let http_client = reqwest::Client::builder()
        .build()
        .map_err(std::io::Error::other)?;
    let llm_client = LLMClient::new(http_client, &config.provider);
    log::info!("roast model: {}", llm_client.model());

    let generator = ComebackGenerator::new(Arc::new(llm_client));
    let tools = ToolRegistry::new(IdentityValidator::new(config.phone_number.as_str()), generator);
    let service = Arc::new(McpService::new(tools));

    let config = Arc::new(config);
    let bind_addr = (config.server.host.clone(), config.server.port);
    log::info!(
        "serving MCP on http://{}:{}{}",
        bind_addr.0,
        bind_addr.1,
        consts::MCP_PATH
    );

    let server = actix_web::HttpServer::new(move || {
        app::create_app(service.clone(), verifier.clone(), config.clone())
    });

    server.bind(bind_addr)?.run().await
}
