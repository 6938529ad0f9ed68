use chrono::{SubsecRound, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

use idea_core::error::RepoError;
use idea_core::ports::{BaseRepository, IdeaRepository};
use idea_core::{Idea, IdeaChanges, ListIdeas, SortBy, SortOrder};

use crate::database::entity::idea;
use crate::database::postgres_repo::PostgresIdeaRepository;

/// First logged statement, with Debug escaping removed.
fn first_sql(log: Vec<Transaction>) -> String {
    format!("{:?}", log[0]).replace('\\', "")
}

fn row(id: &str, upvotes: i32) -> idea::Model {
    let now = Utc::now().trunc_subsecs(6).naive_utc();
    idea::Model {
        id: id.to_owned(),
        title: "Test Idea".to_owned(),
        description: "Description".to_owned(),
        upvotes,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_find_idea_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row("abc", 3)]])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);

    let result: Option<Idea> = repo.find_by_id("abc".to_string()).await.unwrap();

    let idea = result.unwrap();
    assert_eq!(idea.id, "abc");
    assert_eq!(idea.upvotes, 3);
    assert_eq!(idea.title, "Test Idea");
}

#[tokio::test]
async fn test_increment_issues_single_atomic_update() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row("abc", 1)]])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);
    let idea = repo
        .increment_upvotes("abc", Utc::now().trunc_subsecs(6))
        .await
        .unwrap();
    assert_eq!(idea.upvotes, 1);

    let log = std::sync::Arc::try_unwrap(repo.db).unwrap().into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = first_sql(log);
    assert!(sql.contains(r#""upvotes" = "upvotes" + "#), "unexpected sql: {sql}");
    assert!(sql.contains("RETURNING"), "unexpected sql: {sql}");
}

#[tokio::test]
async fn test_increment_unknown_id_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<idea::Model>::new()])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);
    let result = repo.increment_upvotes("missing", Utc::now()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);
    let result = BaseRepository::<Idea, String>::delete(&repo, "missing".to_string()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_update_sets_only_provided_columns() {
    let mut updated = row("abc", 0);
    updated.title = "New title".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated]])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);
    let changes = IdeaChanges::parse(Some("New title"), None).unwrap();
    let idea = repo.update("abc", &changes, Utc::now()).await.unwrap();
    assert_eq!(idea.title, "New title");

    let sql = first_sql(std::sync::Arc::try_unwrap(repo.db).unwrap().into_transaction_log());
    assert!(sql.contains(r#""title" = "#), "unexpected sql: {sql}");
    assert!(!sql.contains(r#""description" = "#), "unexpected sql: {sql}");
}

#[tokio::test]
async fn test_list_orders_by_requested_column() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row("b", 1), row("a", 7)]])
        .into_connection();

    let repo = PostgresIdeaRepository::new(db);
    let query = ListIdeas {
        limit: 10,
        offset: 5,
        sort_by: SortBy::Upvotes,
        order: SortOrder::Asc,
    };
    let ideas = repo.list(query).await.unwrap();
    assert_eq!(ideas.len(), 2);

    let sql = first_sql(std::sync::Arc::try_unwrap(repo.db).unwrap().into_transaction_log());
    assert!(sql.contains(r#"ORDER BY "ideas"."upvotes" ASC"#), "unexpected sql: {sql}");
    assert!(sql.contains("LIMIT"), "unexpected sql: {sql}");
    assert!(sql.contains("OFFSET"), "unexpected sql: {sql}");
}
