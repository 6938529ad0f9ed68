//! Health and service descriptor endpoints.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use idea_shared::{ApiResponse, DbHealth, ErrorCode, HealthInfo};
use serde_json::json;

use crate::state::AppState;

/// Service descriptor.
///
/// GET /
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": "Idea Board API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Share ideas and upvote the best ones",
        "endpoints": {
            "health": "/api/health",
            "databaseHealth": "/api/health/db",
            "ideas": "/api/ideas",
            "idea": "/api/ideas/:id",
            "upvote": "/api/ideas/:id/upvote",
        },
        "timestamp": Utc::now(),
    }))
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let info = HealthInfo {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.environment.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(ApiResponse::ok_with_message(info, "Service is healthy"))
}

/// Database health check.
///
/// GET /api/health/db
pub async fn db_health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.ideas.ping().await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok_with_message(
            DbHealth {
                status: "healthy".to_string(),
                timestamp: Utc::now(),
                connection: "active".to_string(),
            },
            "Database connection is healthy",
        )),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            let body = ApiResponse::failure(ErrorCode::DatabaseUnhealthy, "Database connection failed")
                .with_data(DbHealth {
                    status: "unhealthy".to_string(),
                    timestamp: Utc::now(),
                    connection: "failed".to_string(),
                });
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}
