//! Product validation and persistence errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::models::ProductId;

/// The single error kind raised by the product model.
///
/// Covers malformed input, invalid field values and failures surfaced by the
/// storage backend.
#[derive(Debug, Error)]
pub enum DataValidationError {
    /// The external representation is not a JSON object.
    #[error("invalid product: body of request is not an object")]
    NotAnObject,

    /// A required key is absent.
    #[error("invalid product: missing {0}")]
    MissingField(&'static str),

    /// A key is present with the wrong JSON type.
    #[error("invalid type for {field}: expected {expected}")]
    InvalidType {
        /// Offending key.
        field: &'static str,

        /// Expected JSON type.
        expected: &'static str,
    },

    /// The category name is not a member of the category set.
    #[error("invalid attribute: unknown category {0:?}")]
    UnknownCategory(String),

    /// The price is not a decimal the store can hold.
    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    /// A field value violates a model constraint.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Offending field.
        field: &'static str,

        /// Violated constraint.
        reason: &'static str,
    },

    /// The named operation needs a persisted product.
    #[error("{0} called with empty id field")]
    MissingId(&'static str),

    /// `create` was called on a product that already has an id.
    #[error("product already persisted with id {0}")]
    AlreadyPersisted(ProductId),

    /// No stored product matches the id.
    #[error("product not found")]
    NotFound,

    /// The store reported a uniqueness conflict.
    #[error("product already exists")]
    AlreadyExists,

    /// The store rejected the row.
    #[error("invalid data")]
    InvalidData,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DataValidationError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => {
                Self::Sql(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = DataValidationError::from(Error::RowNotFound);

        assert!(
            matches!(error, DataValidationError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn other_sql_errors_are_kept_as_source() {
        let error = DataValidationError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, DataValidationError::Sql(Error::PoolTimedOut)),
            "expected Sql(PoolTimedOut), got {error:?}"
        );
    }

    #[test]
    fn missing_id_message_names_the_operation() {
        assert_eq!(
            DataValidationError::MissingId("update").to_string(),
            "update called with empty id field"
        );
    }
}
