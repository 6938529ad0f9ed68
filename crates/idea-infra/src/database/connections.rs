#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the idea database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection pool for the idea database.
///
/// The pool connects lazily: `init` only fails on a malformed URL, and an
/// unreachable server surfaces later as per-query errors. Call [`ping`] for
/// an explicit connectivity check and [`close`] on shutdown.
///
/// [`ping`]: DatabasePool::ping
/// [`close`]: DatabasePool::close
#[cfg(feature = "postgres")]
pub struct DatabasePool {
    conn: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabasePool {
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .connect_lazy(true)
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database pool ready"
        );

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    pub fn conn(&self) -> &DbConn {
        &self.conn
    }

    /// Handle for repositories. Every handle uses the same pool.
    pub fn shared(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close_by_ref().await?;
        tracing::info!("Database pool closed");
        Ok(())
    }
}
