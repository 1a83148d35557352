//! Product Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use strum::{EnumIter, EnumString, FromRepr, IntoStaticStr};

use crate::{domain::products::errors::DataValidationError, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Maximum length of a product name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of a product description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Fractional digits the store keeps for a price.
pub const PRICE_SCALE: u32 = 2;

/// Prices must stay strictly below this magnitude (`NUMERIC(10, 2)`).
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Product category.
///
/// The symbolic name is the external representation; the discriminant is the
/// stored encoding.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    IntoStaticStr,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum Category {
    /// Clothing.
    Cloths = 1,

    /// Food.
    Food = 2,

    /// Housewares.
    Housewares = 3,

    /// Automotive parts.
    Automotive = 4,

    /// Tools.
    Tools = 5,
}

impl Category {
    /// Symbolic name, e.g. `CLOTHS`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Stored encoding.
    #[must_use]
    pub const fn code(self) -> i16 {
        self as i16
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Backend-assigned id; `None` until created.
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Build an unpersisted product.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Check the field constraints the store enforces.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError::InvalidField`] for an empty or over-long
    /// name or description, and [`DataValidationError::InvalidPrice`] for a
    /// price with more than two fractional digits or eight integer digits.
    pub fn validate(&self) -> Result<(), DataValidationError> {
        if self.name.is_empty() {
            return Err(DataValidationError::InvalidField {
                field: "name",
                reason: "must not be empty",
            });
        }

        if self.name.chars().count() > NAME_MAX_LEN {
            return Err(DataValidationError::InvalidField {
                field: "name",
                reason: "must be at most 100 characters",
            });
        }

        if self.description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(DataValidationError::InvalidField {
                field: "description",
                reason: "must be at most 250 characters",
            });
        }

        if self.price.normalize().scale() > PRICE_SCALE || self.price.abs() >= PRICE_LIMIT {
            return Err(DataValidationError::InvalidPrice(self.price.to_string()));
        }

        Ok(())
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{id}]>", self.name),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    fn fedora() -> Product {
        Product::new("Fedora", "A red hat", Decimal::new(1250, 2), true, Category::Cloths)
    }

    #[test]
    fn new_product_is_unpersisted() {
        let product = fedora();

        assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
        assert_eq!(product.id, None);
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description, "A red hat");
        assert!(product.available);
        assert_eq!(product.price, Decimal::new(125, 1));
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn display_includes_assigned_id() {
        let mut product = fedora();
        product.id = Some(ProductId::from_i64(7));

        assert_eq!(product.to_string(), "<Product Fedora id=[7]>");
    }

    #[test]
    fn category_names_round_trip() {
        for category in Category::iter() {
            assert_eq!(Category::from_str(category.name()), Ok(category));
            assert_eq!(Category::from_repr(category.code()), Some(category));
        }
    }

    #[test]
    fn category_rejects_unknown_and_lowercase_names() {
        assert!(Category::from_str("UNKNOWN").is_err());
        assert!(Category::from_str("cloths").is_err());
        assert_eq!(Category::from_repr(0), None);
    }

    #[test]
    fn category_names_are_upper_case() {
        assert_eq!(Category::Cloths.name(), "CLOTHS");
        assert_eq!(Category::Housewares.to_string(), "HOUSEWARES");
    }

    #[test]
    fn validate_accepts_well_formed_product() {
        assert!(fedora().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut product = fedora();
        product.name.clear();

        assert!(matches!(
            product.validate(),
            Err(DataValidationError::InvalidField { field: "name", .. })
        ));
    }

    #[test]
    fn validate_rejects_long_description() {
        let mut product = fedora();
        product.description = "x".repeat(DESCRIPTION_MAX_LEN + 1);

        assert!(matches!(
            product.validate(),
            Err(DataValidationError::InvalidField {
                field: "description",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_sub_cent_prices() {
        let mut product = fedora();
        product.price = Decimal::new(12505, 3);

        assert!(matches!(
            product.validate(),
            Err(DataValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn validate_allows_trailing_zeros_beyond_scale() {
        let mut product = fedora();
        product.price = Decimal::new(125_000, 4);

        assert!(product.validate().is_ok());
    }

    #[test]
    fn validate_rejects_prices_beyond_column_precision() {
        let mut product = fedora();
        product.price = Decimal::new(10_000_000_000, 2);

        assert!(matches!(
            product.validate(),
            Err(DataValidationError::InvalidPrice(_))
        ));
    }
}
