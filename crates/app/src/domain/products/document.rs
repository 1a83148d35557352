//! Product external representation.
//!
//! A flat JSON object with the keys `id`, `name`, `description`, `price`,
//! `available` and `category`. `price` is always the canonical decimal string
//! and `category` the symbolic name.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::domain::products::{
    errors::DataValidationError,
    models::{Category, Product},
    persistence::IntoPrice,
};

impl Product {
    /// Serialize into the external representation.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id.map(i64::from),
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.name(),
        })
    }

    /// Build an unpersisted product from the external representation.
    ///
    /// # Errors
    ///
    /// See [`Product::deserialize`].
    pub fn from_value(data: &Value) -> Result<Self, DataValidationError> {
        let fields = data.as_object().ok_or(DataValidationError::NotAnObject)?;

        let name = string_field(fields, "name")?;
        let description = string_field(fields, "description")?;

        let price = string_field(fields, "price")?.into_price()?;

        let available = match required(fields, "available")? {
            Value::Bool(available) => *available,
            _ => {
                return Err(DataValidationError::InvalidType {
                    field: "available",
                    expected: "boolean",
                });
            }
        };

        let category = string_field(fields, "category")?;
        let category = Category::from_str(category)
            .map_err(|_err| DataValidationError::UnknownCategory(category.to_string()))?;

        let product = Self::new(name, description, price, available, category);

        product.validate()?;

        Ok(product)
    }

    /// Populate this product from the external representation.
    ///
    /// The `id` key is ignored; the receiver keeps its own id. Either every
    /// field is replaced or none is.
    ///
    /// # Errors
    ///
    /// Returns a [`DataValidationError`] when the input is not an object, a key
    /// is missing or has the wrong type, `available` is not a boolean,
    /// `category` is not a known name, or `price` is not a storable decimal.
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let Self {
            name,
            description,
            price,
            available,
            category,
            ..
        } = Self::from_value(data)?;

        self.name = name;
        self.description = description;
        self.price = price;
        self.available = available;
        self.category = category;

        Ok(self)
    }
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DataValidationError> {
    fields
        .get(field)
        .ok_or(DataValidationError::MissingField(field))
}

fn string_field<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DataValidationError> {
    required(fields, field)?
        .as_str()
        .ok_or(DataValidationError::InvalidType {
            field,
            expected: "string",
        })
}
