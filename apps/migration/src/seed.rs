//! Sample data for fresh databases.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use idea_core::domain::{generate_id, now};

use crate::m20250101_000001_create_ideas_table::Ideas;

/// `(title, description, upvotes)` rows inserted into an empty table.
pub const SAMPLE_IDEAS: &[(&str, &str, i32)] = &[
    (
        "Smart Home Integration",
        "Create a unified app to control all smart home devices from different manufacturers",
        15,
    ),
    (
        "AI-Powered Learning Assistant",
        "Develop an AI tutor that adapts to individual learning styles and provides personalized education",
        23,
    ),
    (
        "Sustainable Shopping Platform",
        "Build a marketplace that only features eco-friendly and sustainable products with carbon footprint tracking",
        8,
    ),
    (
        "Community Garden Network",
        "Connect local communities to share garden spaces, tools, and knowledge for urban farming",
        12,
    ),
    (
        "Mental Health Check-in App",
        "Daily mood tracking with personalized wellness recommendations and professional support connections",
        31,
    ),
];

/// Insert the sample ideas if the table is empty.
///
/// Returns the number of rows inserted; an already populated table is left
/// alone and yields `0`.
pub async fn seed<C>(db: &C) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();

    let count = Query::select()
        .expr(Expr::col(Ideas::Id).count())
        .from(Ideas::Table)
        .to_owned();
    let existing: i64 = match db.query_one(backend.build(&count)).await? {
        Some(row) => row.try_get_by_index(0)?,
        None => 0,
    };

    if existing > 0 {
        tracing::info!(existing, "Ideas table already populated, skipping seed");
        return Ok(0);
    }

    let at = now().naive_utc();
    let mut insert = Query::insert();
    insert.into_table(Ideas::Table).columns([
        Ideas::Id,
        Ideas::Title,
        Ideas::Description,
        Ideas::Upvotes,
        Ideas::CreatedAt,
        Ideas::UpdatedAt,
    ]);

    for (title, description, upvotes) in SAMPLE_IDEAS {
        let row: [SimpleExpr; 6] = [
            generate_id().into(),
            (*title).into(),
            (*description).into(),
            (*upvotes).into(),
            at.into(),
            at.into(),
        ];
        insert
            .values(row)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }

    db.execute(backend.build(&insert)).await?;
    tracing::info!(count = SAMPLE_IDEAS.len(), "Seeded sample ideas");

    Ok(SAMPLE_IDEAS.len())
}
