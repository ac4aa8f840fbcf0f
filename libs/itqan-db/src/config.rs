use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};

/// Connection settings for the relational store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// Connection string, e.g. `postgres://user@host/itqan` or `sqlite::memory:`.
    pub dsn: String,
    pub max_conns: u32,
    pub min_conns: u32,
    pub connect_timeout_secs: u64,
    /// Forward sqlx statement logging into `tracing`.
    pub sqlx_logging: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite::memory:".to_owned(),
            max_conns: 10,
            min_conns: 1,
            connect_timeout_secs: 5,
            sqlx_logging: false,
        }
    }
}

impl DbConfig {
    fn is_in_memory(&self) -> bool {
        self.dsn.contains(":memory:")
    }
}

/// Open a pooled connection described by `cfg`.
///
/// In-memory `SQLite` keeps the driver's single-connection pool, since every
/// extra connection would open a separate empty database.
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established.
pub async fn connect(cfg: &DbConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if !cfg.is_in_memory() {
        opts.max_connections(cfg.max_conns)
            .min_connections(cfg.min_conns);
    }

    tracing::debug!(
        in_memory = cfg.is_in_memory(),
        max_conns = cfg.max_conns,
        "connecting to database"
    );
    Database::connect(opts).await
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_in_memory_sqlite() {
        let cfg = DbConfig::default();
        assert!(cfg.is_in_memory());
        assert_eq!(cfg.max_conns, 10);
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = connect(&DbConfig::default()).await;
        assert!(db.is_ok());
    }
}
