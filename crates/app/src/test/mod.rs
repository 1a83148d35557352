//! Test support

mod context;
mod factories;

pub(crate) use context::TestContext;
pub(crate) use factories::ProductFactory;
