//! # Idea Board API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use idea_core::ports::RateLimiter;
use idea_infra::InMemoryRateLimiter;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::cors::{OriginPolicy, cors};
use middleware::rate_limit::RateLimitMiddleware;
use middleware::security_headers::security_headers;
use observability::RequestIdMiddleware;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let telemetry = match &config {
        Ok(config) => TelemetryConfig::from_app(config),
        Err(_) => TelemetryConfig::default(),
    };
    telemetry::init_telemetry(&telemetry);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        "Starting Idea Board API server"
    );

    if config.environment.is_production() && config.security.jwt_secret == "dev-secret-key" {
        tracing::warn!("JWT_SECRET is using the development default");
    }
    tracing::debug!(
        api_key_configured = config.security.api_key.is_some(),
        "Security settings loaded"
    );

    let (state, resources) = state::bootstrap(&config).await?;

    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())?);
    let origins = Arc::new(OriginPolicy::new(&config.cors_origins));
    let trust_proxy = config.trust_proxy;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RateLimitMiddleware::new(limiter.clone()).trust_proxy(trust_proxy))
            .wrap(security_headers())
            .wrap(cors(origins.clone()))
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    tracing::info!("Server running at http://{}:{}", config.host, config.port);

    let result = server.await;

    tracing::info!("Shutting down...");
    resources.close().await;

    result.map_err(Into::into)
}
