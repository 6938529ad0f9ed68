//! Migration CLI tool.
//!
//! Wraps the SeaORM migration CLI and adds a `seed` command that fills an
//! empty `ideas` table with sample data.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Database;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    if std::env::args().nth(1).as_deref() == Some("seed") {
        if let Err(e) = run_seed().await {
            tracing::error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
        return;
    }

    cli::run_cli(migration::Migrator).await;
}

async fn run_seed() -> Result<(), DbErr> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL is required".to_string()))?;

    let db = Database::connect(&url).await?;
    migration::Migrator::up(&db, None).await?;
    migration::seed(&db).await?;
    db.close().await
}
