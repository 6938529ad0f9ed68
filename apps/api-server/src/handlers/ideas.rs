//! Idea endpoints.

use actix_web::{HttpResponse, web};
use idea_core::domain::now;
use idea_core::{Idea, IdeaChanges, ListIdeas, NewIdea};
use idea_shared::{ApiResponse, CreateIdeaRequest, ErrorCode, UpdateIdeaRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/ideas?limit&offset&sortBy&order
pub async fn list_ideas(
    state: web::Data<AppState>,
    query: web::Query<ListIdeas>,
) -> AppResult<HttpResponse> {
    let ideas = state
        .ideas
        .list(query.into_inner())
        .await
        .map_err(|e| AppError::store(ErrorCode::FetchError, "Failed to fetch ideas", e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ideas,
        "Ideas fetched successfully",
    )))
}

/// GET /api/ideas/{id}
pub async fn get_idea(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let idea = state
        .ideas
        .find_by_id(path.into_inner())
        .await
        .map_err(|e| AppError::store(ErrorCode::FetchError, "Failed to fetch idea", e))?
        .ok_or_else(|| AppError::NotFound("Idea not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        idea,
        "Idea fetched successfully",
    )))
}

/// POST /api/ideas
pub async fn create_idea(
    state: web::Data<AppState>,
    body: web::Json<CreateIdeaRequest>,
) -> AppResult<HttpResponse> {
    let input = NewIdea::parse(&body.title, &body.description)?;

    let idea = state
        .ideas
        .insert(Idea::new(input))
        .await
        .map_err(|e| AppError::store(ErrorCode::CreateError, "Failed to create idea", e))?;

    tracing::info!(idea_id = %idea.id, "Idea created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        idea,
        "Idea created successfully",
    )))
}

/// PATCH /api/ideas/{id}/upvote
pub async fn upvote_idea(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let idea = state
        .ideas
        .increment_upvotes(&path, now())
        .await
        .map_err(|e| AppError::store(ErrorCode::UpvoteError, "Failed to upvote idea", e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        idea,
        "Idea upvoted successfully",
    )))
}

/// PUT or PATCH /api/ideas/{id}
pub async fn update_idea(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateIdeaRequest>,
) -> AppResult<HttpResponse> {
    let changes = IdeaChanges::parse(body.title.as_deref(), body.description.as_deref())?;

    let idea = state
        .ideas
        .update(&path, &changes, now())
        .await
        .map_err(|e| AppError::store(ErrorCode::UpdateError, "Failed to update idea", e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        idea,
        "Idea updated successfully",
    )))
}

/// DELETE /api/ideas/{id}
pub async fn delete_idea(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .ideas
        .delete(id.clone())
        .await
        .map_err(|e| AppError::store(ErrorCode::DeleteError, "Failed to delete idea", e))?;

    tracing::info!(idea_id = %id, "Idea deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        (),
        "Idea deleted successfully",
    )))
}
