//! In-memory products backend for tests and local development.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::products::{
    errors::DataValidationError,
    models::{Category, Product, ProductId},
    repository::ProductsRepository,
};

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// Products backend holding rows in a `BTreeMap`.
///
/// Ids are assigned from a counter starting at 1 and never reused. Clones
/// share the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductsRepository {
    rows: Arc<RwLock<Rows>>,
}

impl InMemoryProductsRepository {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter(&self, predicate: impl Fn(&Product) -> bool + Send) -> Vec<Product> {
        self.rows
            .read()
            .await
            .products
            .values()
            .filter(|&product| predicate(product))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProductsRepository {
    async fn insert_product(&self, product: &Product) -> Result<ProductId, DataValidationError> {
        product.validate()?;

        let mut rows = self.rows.write().await;

        rows.last_id += 1;
        let id = ProductId::from_i64(rows.last_id);

        rows.products.insert(
            id,
            Product {
                id: Some(id),
                ..product.clone()
            },
        );

        Ok(id)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<(), DataValidationError> {
        product.validate()?;

        let mut rows = self.rows.write().await;

        let stored = rows
            .products
            .get_mut(&id)
            .ok_or(DataValidationError::NotFound)?;

        *stored = Product {
            id: Some(id),
            ..product.clone()
        };

        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), DataValidationError> {
        self.rows
            .write()
            .await
            .products
            .remove(&id)
            .map(|_removed| ())
            .ok_or(DataValidationError::NotFound)
    }

    async fn list_products(&self) -> Result<Vec<Product>, DataValidationError> {
        Ok(self.filter(|_product| true).await)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, DataValidationError> {
        Ok(self.rows.read().await.products.get(&id).cloned())
    }

    async fn find_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Product>, DataValidationError> {
        Ok(self.filter(|product| product.name == name).await)
    }

    async fn find_products_by_price(
        &self,
        price: Decimal,
    ) -> Result<Vec<Product>, DataValidationError> {
        Ok(self.filter(|product| product.price == price).await)
    }

    async fn find_products_by_availability(
        &self,
        available: bool,
    ) -> Result<Vec<Product>, DataValidationError> {
        Ok(self.filter(|product| product.available == available).await)
    }

    async fn find_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Product>, DataValidationError> {
        Ok(self.filter(|product| product.category == category).await)
    }
}
