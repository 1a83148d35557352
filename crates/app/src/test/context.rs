//! Test context for repository-level integration tests.

use crate::{database::Db, domain::products::PgProductsRepository};

use super::db::TestDb;

pub struct TestContext {
    pub products: PgProductsRepository,
    _db: TestDb,
}

impl TestContext {
    /// `None` when the PostgreSQL container cannot be started.
    pub async fn new() -> Option<Self> {
        let db = TestDb::new().await?;

        Some(Self {
            products: PgProductsRepository::new(Db::new(db.pool().clone())),
            _db: db,
        })
    }
}
