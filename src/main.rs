mod chat_payload;
mod chat_response;
mod config;
mod doc_service;
mod handlers;
mod llm_service;
mod prompt;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use config::GatewayConfig;
use doc_service::DocServiceClient;
use handlers::AppState;
use llm_service::LlmService;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load gateway configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let state = Arc::new(AppState {
        doc_service: DocServiceClient::new(client.clone(), config.doc_service_url.clone()),
        llm: LlmService::new(
            client,
            config.llm_endpoint.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        ),
    });

    let app = handlers::router(state)
        .route_service("/", ServeFile::new("static/index.html"))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    log::info!(
        "Gateway listening on http://{}",
        listener.local_addr().unwrap()
    );
    axum::serve(listener, app).await.unwrap();
}
