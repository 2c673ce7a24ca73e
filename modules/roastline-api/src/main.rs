use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai21_client::Ai21Client;
use brightdata_client::BrightDataClient;
use roastline_common::Config;
use roastline_core::ProfileAnalyzer;

mod rest;

pub struct AppState {
    pub analyzer: ProfileAnalyzer,
}

/// Origins the local demo UI is served from.
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roastline=info".parse()?))
        .init();

    let config = Config::from_env();

    let scraper = BrightDataClient::new(config.brightdata_token, config.dataset_id);
    let model = Ai21Client::new(config.ai21_api_key, ai21_client::DEFAULT_MODEL);
    let analyzer = ProfileAnalyzer::new(Arc::new(scraper), Arc::new(model));

    let state = Arc::new(AppState { analyzer });

    let origins = ALLOWED_ORIGINS.map(HeaderValue::from_static).to_vec();

    let app = Router::new()
        .route("/analyze-profiles", post(rest::analyze_profiles))
        .route("/health", get(rest::health))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Roastline API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
