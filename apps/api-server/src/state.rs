//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use idea_core::ports::IdeaRepository;

use crate::config::{AppConfig, Environment};

#[cfg(feature = "postgres")]
use idea_infra::{DatabasePool, PostgresIdeaRepository};
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ideas: Arc<dyn IdeaRepository>,
    pub environment: Environment,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(ideas: Arc<dyn IdeaRepository>, environment: Environment) -> Self {
        Self {
            ideas,
            environment,
            started_at: Instant::now(),
        }
    }
}

/// Startup failures that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Database setup failed: {0}")]
    Database(String),
}

/// Resources owned by `main` and released after the server stops.
pub struct Resources {
    #[cfg(feature = "postgres")]
    pool: DatabasePool,
}

impl Resources {
    pub async fn close(self) {
        #[cfg(feature = "postgres")]
        match self.pool.close().await {
            Ok(()) => tracing::info!("Database pool closed"),
            Err(e) => tracing::error!(error = %e, "Failed to close database pool"),
        }
    }
}

/// Build the application state.
///
/// The pool connects lazily, so an unreachable database only degrades
/// startup: the failure is logged and requests fail individually later.
#[cfg(feature = "postgres")]
pub async fn bootstrap(config: &AppConfig) -> Result<(AppState, Resources), StartupError> {
    let pool = DatabasePool::init(&config.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    match pool.ping().await {
        Ok(()) => {
            tracing::info!("Database connection established");
            if config.environment.is_production() {
                prepare_schema(&pool).await;
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Database connection failed, but server will continue"
            );
        }
    }

    let ideas: Arc<dyn IdeaRepository> = Arc::new(PostgresIdeaRepository::new(pool.shared()));

    tracing::info!("Application state initialized");
    Ok((AppState::new(ideas, config.environment), Resources { pool }))
}

#[cfg(feature = "postgres")]
async fn prepare_schema(pool: &DatabasePool) {
    tracing::info!("Running database migrations...");
    if let Err(e) = Migrator::up(pool.conn(), None).await {
        tracing::warn!(error = %e, "Migration failed, skipping seed");
        return;
    }

    tracing::info!("Seeding database...");
    match migration::seed(pool.conn()).await {
        Ok(0) => tracing::info!("Ideas table already populated, seed skipped"),
        Ok(inserted) => tracing::info!(inserted, "Sample ideas seeded"),
        Err(e) => tracing::warn!(error = %e, "Seeding failed"),
    }
}

/// Without the `postgres` feature ideas live in process memory only.
#[cfg(not(feature = "postgres"))]
pub async fn bootstrap(config: &AppConfig) -> Result<(AppState, Resources), StartupError> {
    tracing::warn!("Running without postgres feature - ideas are kept in memory");
    let ideas: Arc<dyn IdeaRepository> = Arc::new(idea_infra::InMemoryIdeaRepository::new());
    Ok((AppState::new(ideas, config.environment), Resources {}))
}
