//! Products

mod document;
pub mod errors;
pub mod in_memory;
pub mod models;
mod persistence;
pub mod repository;

pub use errors::DataValidationError;
pub use in_memory::InMemoryProductsRepository;
pub use models::{Category, Product, ProductId};
pub use persistence::IntoPrice;
pub use repository::{PgProductsRepository, ProductsRepository};
