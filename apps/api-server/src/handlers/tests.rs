use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use idea_core::domain::now;
use idea_core::ports::{BaseRepository, IdeaRepository};
use idea_core::{Idea, IdeaChanges, ListIdeas, NewIdea, RepoError};
use idea_infra::InMemoryIdeaRepository;
use serde_json::{Value, json};

use super::configure_routes;
use crate::config::Environment;
use crate::state::AppState;

macro_rules! test_app {
    ($repo:expr) => {{
        let ideas: Arc<dyn IdeaRepository> = $repo;
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(ideas, Environment::Test)))
                .configure(configure_routes),
        )
        .await
    }};
}

/// Store that fails every call, as if the database were unreachable.
struct UnreachableRepository;

#[async_trait]
impl BaseRepository<Idea, String> for UnreachableRepository {
    async fn find_by_id(&self, _id: String) -> Result<Option<Idea>, RepoError> {
        Err(unreachable())
    }

    async fn insert(&self, _idea: Idea) -> Result<Idea, RepoError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: String) -> Result<(), RepoError> {
        Err(unreachable())
    }
}

#[async_trait]
impl IdeaRepository for UnreachableRepository {
    async fn list(&self, _query: ListIdeas) -> Result<Vec<Idea>, RepoError> {
        Err(unreachable())
    }

    async fn increment_upvotes(&self, _id: &str, _at: DateTime<Utc>) -> Result<Idea, RepoError> {
        Err(unreachable())
    }

    async fn update(
        &self,
        _id: &str,
        _changes: &IdeaChanges,
        _at: DateTime<Utc>,
    ) -> Result<Idea, RepoError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Err(unreachable())
    }
}

fn unreachable() -> RepoError {
    RepoError::Connection("connection refused (os error 111) at 10.0.0.5:5432".to_string())
}

fn stored(id: &str, title: &str, upvotes: u32, age_hours: i64) -> Idea {
    let mut idea = Idea::with_id(
        id.to_string(),
        NewIdea::parse(title, "Seeded for tests").unwrap(),
        now() - Duration::hours(age_hours),
    );
    for _ in 0..upvotes {
        idea.upvote(idea.created_at);
    }
    idea
}

fn seeded() -> Arc<InMemoryIdeaRepository> {
    Arc::new(InMemoryIdeaRepository::with_ideas([
        stored("old", "Old idea", 7, 48),
        stored("mid", "Middle idea", 2, 5),
        stored("new", "New idea", 4, 1),
    ]))
}

#[actix_web::test]
async fn test_create_upvote_then_list() {
    let app = test_app!(seeded());

    let req = test::TestRequest::post()
        .uri("/api/ideas")
        .set_json(json!({ "title": "T", "description": "D" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["upvotes"], 0);
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let req = test::TestRequest::patch()
        .uri(&format!("/api/ideas/{id}/upvote"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["upvotes"], 1);

    let req = test::TestRequest::get().uri("/api/ideas").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], id.as_str());
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_create_sanitizes_input() {
    let app = test_app!(Arc::new(InMemoryIdeaRepository::new()));

    let req = test::TestRequest::post()
        .uri("/api/ideas")
        .set_json(json!({ "title": "  a   b<script>  ", "description": "<b>bold</b> plan" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["title"], "a b");
    assert_eq!(body["data"]["description"], "bold plan");
}

#[actix_web::test]
async fn test_create_length_limits() {
    let app = test_app!(Arc::new(InMemoryIdeaRepository::new()));

    let cases = [
        ("x".repeat(100), "d".repeat(500), StatusCode::CREATED),
        ("x".repeat(101), "d".to_string(), StatusCode::BAD_REQUEST),
        ("x".to_string(), "d".repeat(501), StatusCode::BAD_REQUEST),
        ("   ".to_string(), "d".to_string(), StatusCode::BAD_REQUEST),
    ];

    for (title, description, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/ideas")
            .set_json(json!({ "title": title, "description": description }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "title={} desc={}", title.len(), description.len());

        if expected == StatusCode::BAD_REQUEST {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "VALIDATION_ERROR");
        }
    }
}

#[actix_web::test]
async fn test_malformed_body_is_validation_error() {
    let app = test_app!(Arc::new(InMemoryIdeaRepository::new()));

    let req = test::TestRequest::post()
        .uri("/api/ideas")
        .set_json(json!({ "title": "Only a title" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_list_sorting_and_paging() {
    let app = test_app!(seeded());

    let req = test::TestRequest::get()
        .uri("/api/ideas?sortBy=upvotes&order=asc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let votes: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["upvotes"].as_u64().unwrap())
        .collect();
    assert_eq!(votes, vec![2, 4, 7]);

    let req = test::TestRequest::get()
        .uri("/api/ideas?sortBy=upvotes&order=desc&limit=1&offset=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], "new");

    let req = test::TestRequest::get()
        .uri("/api/ideas?sortBy=created_at&order=asc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], "old");
}

#[actix_web::test]
async fn test_list_rejects_bad_query() {
    let app = test_app!(seeded());

    for uri in [
        "/api/ideas?sortBy=title",
        "/api/ideas?order=sideways",
        "/api/ideas?limit=-1",
        "/api/ideas?offset=abc",
        "/api/ideas?limit=9223372036854775808",
        "/api/ideas?offset=18446744073709551615",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[actix_web::test]
async fn test_get_idea() {
    let app = test_app!(seeded());

    let req = test::TestRequest::get().uri("/api/ideas/mid").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Middle idea");

    let req = test::TestRequest::get().uri("/api/ideas/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Idea not found");
}

#[actix_web::test]
async fn test_upvote_missing_idea() {
    let repo = seeded();
    let app = test_app!(repo.clone());

    let req = test::TestRequest::patch()
        .uri("/api/ideas/missing/upvote")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.len().await, 3);
}

#[actix_web::test]
async fn test_concurrent_upvotes() {
    let repo = seeded();
    let app = test_app!(repo.clone());

    let calls = (0..25).map(|_| {
        test::call_service(
            &app,
            test::TestRequest::patch()
                .uri("/api/ideas/mid/upvote")
                .to_request(),
        )
    });
    for resp in join_all(calls).await {
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let idea = repo.find_by_id("mid".to_string()).await.unwrap().unwrap();
    assert_eq!(idea.upvotes, 27);
}

#[actix_web::test]
async fn test_update_idea_with_put_and_patch() {
    let repo = seeded();
    let app = test_app!(repo.clone());

    let req = test::TestRequest::put()
        .uri("/api/ideas/mid")
        .set_json(json!({ "title": "Renamed" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["description"], "Seeded for tests");
    assert_eq!(body["data"]["upvotes"], 2);

    let req = test::TestRequest::patch()
        .uri("/api/ideas/mid")
        .set_json(json!({ "description": "New plan" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["description"], "New plan");
    assert_ne!(body["data"]["updatedAt"], body["data"]["createdAt"]);
}

#[actix_web::test]
async fn test_update_idea_errors() {
    let app = test_app!(seeded());

    let req = test::TestRequest::patch()
        .uri("/api/ideas/mid")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/ideas/mid")
        .set_json(json!({ "title": "x".repeat(101) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/ideas/missing")
        .set_json(json!({ "title": "Renamed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_idea() {
    let repo = seeded();
    let app = test_app!(repo.clone());

    let req = test::TestRequest::delete().uri("/api/ideas/old").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);
    assert!(body.as_object().unwrap().contains_key("data"));
    assert_eq!(repo.len().await, 2);

    let req = test::TestRequest::delete().uri("/api/ideas/old").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.len().await, 2);
}

#[actix_web::test]
async fn test_store_failures_do_not_leak() {
    let app = test_app!(Arc::new(UnreachableRepository));

    let cases = [
        (test::TestRequest::get().uri("/api/ideas"), "FETCH_ERROR"),
        (test::TestRequest::get().uri("/api/ideas/a"), "FETCH_ERROR"),
        (
            test::TestRequest::post()
                .uri("/api/ideas")
                .set_json(json!({ "title": "T", "description": "D" })),
            "CREATE_ERROR",
        ),
        (
            test::TestRequest::patch().uri("/api/ideas/a/upvote"),
            "UPVOTE_ERROR",
        ),
        (
            test::TestRequest::put()
                .uri("/api/ideas/a")
                .set_json(json!({ "title": "T" })),
            "UPDATE_ERROR",
        ),
        (test::TestRequest::delete().uri("/api/ideas/a"), "DELETE_ERROR"),
    ];

    for (req, code) in cases {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{code}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], code);
        assert!(!body.to_string().contains("10.0.0.5"));
    }
}

#[actix_web::test]
async fn test_health_endpoints() {
    let app = test_app!(seeded());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["environment"], "test");
    assert!(body["data"]["uptime"].as_f64().unwrap() >= 0.0);

    let req = test::TestRequest::get().uri("/api/health/db").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["connection"], "active");
}

#[actix_web::test]
async fn test_db_health_reports_unhealthy() {
    let app = test_app!(Arc::new(UnreachableRepository));

    let req = test::TestRequest::get().uri("/api/health/db").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "DATABASE_UNHEALTHY");
    assert_eq!(body["data"]["connection"], "failed");
    assert!(!body.to_string().contains("10.0.0.5"));
}

#[actix_web::test]
async fn test_service_descriptor_and_unknown_route() {
    let app = test_app!(seeded());

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Idea Board API");
    assert_eq!(body["endpoints"]["ideas"], "/api/ideas");

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Route GET /api/nope not found");
}
