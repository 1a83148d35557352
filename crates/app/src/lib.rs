//! Product catalog model, persistence and application wiring.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod logging;

#[cfg(test)]
mod test;
