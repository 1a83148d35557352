//! Product fixtures

use rand::{Rng, seq::SliceRandom, thread_rng};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::domain::products::models::{Category, Product};

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const WORDS: &[&str] = &[
    "sturdy", "bright", "classic", "durable", "soft", "compact", "light", "handmade", "weekly",
    "fresh", "spare", "premium", "everyday", "garden", "kitchen", "workshop", "red", "blue",
];

/// Builds random, valid, unpersisted products.
pub(crate) struct ProductFactory;

impl ProductFactory {
    pub(crate) fn build() -> Product {
        Self::build_with(&mut thread_rng())
    }

    pub(crate) fn build_batch(count: usize) -> Vec<Product> {
        let mut rng = thread_rng();

        (0..count).map(|_| Self::build_with(&mut rng)).collect()
    }

    pub(crate) fn build_with<R: Rng + ?Sized>(rng: &mut R) -> Product {
        let name = NAMES.choose(rng).copied().unwrap_or("Hat");

        let word_count = rng.gen_range(3..=12);
        let description = (0..word_count)
            .filter_map(|_| WORDS.choose(rng).copied())
            .collect::<Vec<_>>()
            .join(" ");

        // 0.50 to 2000.00
        let price = Decimal::new(rng.gen_range(50..=200_000), 2);

        let categories: Vec<Category> = Category::iter().collect();
        let category = categories.choose(rng).copied().unwrap_or(Category::Cloths);

        Product::new(name, description, price, rng.gen_bool(0.5), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_products_are_valid_and_unpersisted() {
        for product in ProductFactory::build_batch(50) {
            assert!(product.validate().is_ok(), "invalid fixture {product:?}");
            assert_eq!(product.id, None);
        }
    }
}
