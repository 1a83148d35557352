//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::DatabaseConfig,
    database::{self, Db},
    domain::products::{InMemoryProductsRepository, PgProductsRepository, ProductsRepository},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Storage backend handle, acquired at start-up and released by
/// [`AppContext::shutdown`].
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsRepository>,
    db: Option<Db>,
}

impl AppContext {
    /// Build application context from a database URL, applying migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!("connected to postgres products store");

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsRepository::new(db.clone())),
            db: Some(db),
        })
    }

    /// Build application context from configuration: `PostgreSQL` when a
    /// database URL is set, otherwise an in-memory store that lives only as
    /// long as this context.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        match config.database_url.as_deref() {
            Some(url) => Self::from_database_url(url).await,
            None => {
                warn!("DATABASE_URL is unset; products are not kept after this process exits");

                Ok(Self::in_memory())
            }
        }
    }

    /// Build application context over an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        info!("using in-memory products store");

        Self {
            products: Arc::new(InMemoryProductsRepository::new()),
            db: None,
        }
    }

    /// Whether stored products are lost when this context is dropped.
    pub fn is_ephemeral(&self) -> bool {
        self.db.is_none()
    }

    /// Release the storage backend.
    pub async fn shutdown(self) {
        if let Some(db) = self.db {
            db.close().await;
        }

        info!("products store released");
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
