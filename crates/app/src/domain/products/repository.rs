//! Products Repository

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, Row,
    postgres::{PgArguments, PgRow},
    query,
    query::QueryAs,
    query_as, query_scalar,
};
use tracing::instrument;

use crate::{
    database::Db,
    domain::products::{
        errors::DataValidationError,
        models::{Category, Product, ProductId},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const FIND_BY_NAME_SQL: &str = include_str!("sql/find_products_by_name.sql");
const FIND_BY_PRICE_SQL: &str = include_str!("sql/find_products_by_price.sql");
const FIND_BY_AVAILABILITY_SQL: &str = include_str!("sql/find_products_by_available.sql");
const FIND_BY_CATEGORY_SQL: &str = include_str!("sql/find_products_by_category.sql");

/// Storage backend for products.
///
/// Every method is a single backend call. Returned products are owned copies.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Stores a new row and returns the id the backend assigned.
    async fn insert_product(&self, product: &Product) -> Result<ProductId, DataValidationError>;

    /// Overwrites the row with the given id.
    async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<(), DataValidationError>;

    /// Removes the row with the given id.
    async fn delete_product(&self, id: ProductId) -> Result<(), DataValidationError>;

    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, DataValidationError>;

    /// Retrieve a single product, if stored.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, DataValidationError>;

    /// Products whose name equals `name` exactly.
    async fn find_products_by_name(&self, name: &str)
    -> Result<Vec<Product>, DataValidationError>;

    /// Products whose price is numerically equal to `price`.
    async fn find_products_by_price(
        &self,
        price: Decimal,
    ) -> Result<Vec<Product>, DataValidationError>;

    /// Products whose availability flag equals `available`.
    async fn find_products_by_availability(
        &self,
        available: bool,
    ) -> Result<Vec<Product>, DataValidationError>;

    /// Products in `category`.
    async fn find_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Product>, DataValidationError>;
}

/// `PostgreSQL` products backend.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn fetch_products<'q>(
        &self,
        query: QueryAs<'q, Postgres, Product, PgArguments>,
    ) -> Result<Vec<Product>, DataValidationError> {
        Ok(query.fetch_all(self.db.pool()).await?)
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    #[instrument(skip_all, fields(name = %product.name))]
    async fn insert_product(&self, product: &Product) -> Result<ProductId, DataValidationError> {
        let mut tx = self.db.begin().await?;

        let id: i64 = query_scalar(INSERT_PRODUCT_SQL)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.available)
            .bind(product.category.code())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ProductId::from_i64(id))
    }

    #[instrument(skip(self, product))]
    async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<(), DataValidationError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(id.into_i64())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.available)
            .bind(product.category.code())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DataValidationError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), DataValidationError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(id.into_i64())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DataValidationError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, DataValidationError> {
        self.fetch_products(query_as(LIST_PRODUCTS_SQL)).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, DataValidationError> {
        Ok(query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(id.into_i64())
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn find_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Product>, DataValidationError> {
        self.fetch_products(query_as(FIND_BY_NAME_SQL).bind(name.to_string()))
            .await
    }

    async fn find_products_by_price(
        &self,
        price: Decimal,
    ) -> Result<Vec<Product>, DataValidationError> {
        self.fetch_products(query_as(FIND_BY_PRICE_SQL).bind(price))
            .await
    }

    async fn find_products_by_availability(
        &self,
        available: bool,
    ) -> Result<Vec<Product>, DataValidationError> {
        self.fetch_products(query_as(FIND_BY_AVAILABILITY_SQL).bind(available))
            .await
    }

    async fn find_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Product>, DataValidationError> {
        self.fetch_products(query_as(FIND_BY_CATEGORY_SQL).bind(category.code()))
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: i16 = row.try_get("category")?;

        let category = Category::from_repr(code).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "category".to_string(),
            source: format!("unknown category code {code}").into(),
        })?;

        Ok(Self {
            id: Some(ProductId::from_i64(row.try_get("id")?)),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            available: row.try_get("available")?,
            category,
        })
    }
}
