//! Product persistence operations.
//!
//! Each operation issues one call against the [`ProductsRepository`] handle it
//! is given.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::domain::products::{
    errors::DataValidationError,
    models::{Category, Product, ProductId},
    repository::ProductsRepository,
};

/// A price query argument: a [`Decimal`] or a decimal string such as `"6.00"`.
pub trait IntoPrice {
    /// Resolve into a decimal price.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::InvalidPrice`] when the value does not
    /// parse.
    fn into_price(self) -> Result<Decimal, DataValidationError>;
}

impl IntoPrice for Decimal {
    fn into_price(self) -> Result<Decimal, DataValidationError> {
        Ok(self)
    }
}

impl IntoPrice for &str {
    fn into_price(self) -> Result<Decimal, DataValidationError> {
        Decimal::from_str(self.trim())
            .map_err(|_err| DataValidationError::InvalidPrice(self.to_string()))
    }
}

impl IntoPrice for String {
    fn into_price(self) -> Result<Decimal, DataValidationError> {
        self.as_str().into_price()
    }
}

impl Product {
    /// Persist a new product; the backend-assigned id is stored on `self`.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::AlreadyPersisted`] when the product
    /// already has an id, a validation error for invalid fields, or the
    /// backend's error.
    #[instrument(skip_all, fields(product = %self))]
    pub async fn create(
        &mut self,
        repository: &dyn ProductsRepository,
    ) -> Result<(), DataValidationError> {
        if let Some(id) = self.id {
            warn!(%id, "create called on a persisted product");
            return Err(DataValidationError::AlreadyPersisted(id));
        }

        self.validate()?;

        let id = repository.insert_product(self).await?;
        self.id = Some(id);

        debug!(%id, "product created");

        Ok(())
    }

    /// Overwrite the stored row matching this product's id.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::MissingId`] when the product has no id,
    /// [`DataValidationError::NotFound`] when no row matches, a validation
    /// error for invalid fields, or the backend's error.
    #[instrument(skip_all, fields(product = %self))]
    pub async fn update(
        &self,
        repository: &dyn ProductsRepository,
    ) -> Result<(), DataValidationError> {
        let Some(id) = self.id else {
            warn!("update called with empty id field");
            return Err(DataValidationError::MissingId("update"));
        };

        self.validate()?;

        repository.update_product(id, self).await?;

        debug!(%id, "product updated");

        Ok(())
    }

    /// Remove the stored row and clear this product's id.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::MissingId`] when the product has no id,
    /// [`DataValidationError::NotFound`] when no row matches, or the backend's
    /// error.
    #[instrument(skip_all, fields(product = %self))]
    pub async fn delete(
        &mut self,
        repository: &dyn ProductsRepository,
    ) -> Result<(), DataValidationError> {
        let Some(id) = self.id else {
            warn!("delete called with empty id field");
            return Err(DataValidationError::MissingId("delete"));
        };

        repository.delete_product(id).await?;
        self.id = None;

        debug!(%id, "product deleted");

        Ok(())
    }

    /// All stored products. Callers must not rely on the order.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn all(
        repository: &dyn ProductsRepository,
    ) -> Result<Vec<Self>, DataValidationError> {
        debug!("listing all products");

        repository.list_products().await
    }

    /// Find a product by id.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn find(
        repository: &dyn ProductsRepository,
        id: ProductId,
    ) -> Result<Option<Self>, DataValidationError> {
        debug!(%id, "finding product by id");

        repository.get_product(id).await
    }

    /// Products whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn find_by_name(
        repository: &dyn ProductsRepository,
        name: &str,
    ) -> Result<Vec<Self>, DataValidationError> {
        debug!(name, "finding products by name");

        repository.find_products_by_name(name).await
    }

    /// Products with exactly this price.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::InvalidPrice`] for an unparsable price,
    /// or the backend's error.
    pub async fn find_by_price(
        repository: &dyn ProductsRepository,
        price: impl IntoPrice,
    ) -> Result<Vec<Self>, DataValidationError> {
        let price = price.into_price()?;

        debug!(%price, "finding products by price");

        repository.find_products_by_price(price).await
    }

    /// Products with this availability.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn find_by_availability(
        repository: &dyn ProductsRepository,
        available: bool,
    ) -> Result<Vec<Self>, DataValidationError> {
        debug!(available, "finding products by availability");

        repository.find_products_by_availability(available).await
    }

    /// Products in this category.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn find_by_category(
        repository: &dyn ProductsRepository,
        category: Category,
    ) -> Result<Vec<Self>, DataValidationError> {
        debug!(%category, "finding products by category");

        repository.find_products_by_category(category).await
    }
}
