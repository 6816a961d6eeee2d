use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leadscout_common::Config;
use leadscout_pipeline::infra::build_orchestrator;
use leadscout_pipeline::{BatchOrchestrator, JobRegistry};

mod rest;

pub struct AppState {
    pub orchestrator: BatchOrchestrator,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("leadscout_api=info".parse()?)
                .add_directive("leadscout_pipeline=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let state = Arc::new(AppState {
        orchestrator: build_orchestrator(&config, JobRegistry::new()),
    });

    let app = rest::router(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Method + path only
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

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Lead profiling API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
