//! HTTP handlers and route configuration.

mod health;
mod ideas;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, web};

use crate::middleware::error::{AppError, AppResult, json_config, path_config, query_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/", web::get().to(health::service_info))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/health/db", web::get().to(health::db_health_check))
                .service(
                    web::scope("/ideas")
                        .route("", web::get().to(ideas::list_ideas))
                        .route("", web::post().to(ideas::create_idea))
                        .route("/{id}", web::get().to(ideas::get_idea))
                        .route("/{id}", web::put().to(ideas::update_idea))
                        .route("/{id}", web::patch().to(ideas::update_idea))
                        .route("/{id}", web::delete().to(ideas::delete_idea))
                        .route("/{id}/upvote", web::patch().to(ideas::upvote_idea)),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// Fallback for unknown routes.
async fn not_found(req: HttpRequest) -> AppResult<()> {
    Err(AppError::NotFound(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}
