//! PostgreSQL idea repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect};

use idea_core::error::RepoError;
use idea_core::ports::IdeaRepository;
use idea_core::{Idea, IdeaChanges, ListIdeas, SortBy, SortOrder};

use super::entity::idea::{self, Entity as IdeaEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL idea repository.
pub type PostgresIdeaRepository = PostgresBaseRepository<IdeaEntity>;

fn sql_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[async_trait]
impl IdeaRepository for PostgresIdeaRepository {
    async fn list(&self, query: ListIdeas) -> Result<Vec<Idea>, RepoError> {
        let column = match query.sort_by {
            SortBy::CreatedAt => idea::Column::CreatedAt,
            SortBy::Upvotes => idea::Column::Upvotes,
        };

        let rows = IdeaEntity::find()
            .order_by(column, sql_order(query.order))
            .order_by(idea::Column::CreatedAt, sql_order(query.order))
            .order_by(idea::Column::Id, sql_order(query.order))
            .limit(query.limit)
            .offset(query.offset)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn increment_upvotes(&self, id: &str, at: DateTime<Utc>) -> Result<Idea, RepoError> {
        tracing::debug!(idea_id = %id, "Incrementing upvotes");

        // UPDATE ... SET upvotes = upvotes + 1 ... RETURNING *
        let rows = IdeaEntity::update_many()
            .col_expr(
                idea::Column::Upvotes,
                Expr::col(idea::Column::Upvotes).add(1),
            )
            .col_expr(idea::Column::UpdatedAt, Expr::value(at.naive_utc()))
            .filter(idea::Column::Id.eq(id))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn update(
        &self,
        id: &str,
        changes: &IdeaChanges,
        at: DateTime<Utc>,
    ) -> Result<Idea, RepoError> {
        let mut statement = IdeaEntity::update_many()
            .col_expr(idea::Column::UpdatedAt, Expr::value(at.naive_utc()));

        if let Some(title) = changes.title() {
            statement = statement.col_expr(idea::Column::Title, Expr::value(title.to_owned()));
        }
        if let Some(description) = changes.description() {
            statement = statement.col_expr(
                idea::Column::Description,
                Expr::value(description.to_owned()),
            );
        }

        let rows = statement
            .filter(idea::Column::Id.eq(id))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db
            .ping()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}
