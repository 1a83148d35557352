//! Row ids
//!
//! Stores hand out `BIGSERIAL` keys. Wrapping them in [`TypedId`] keeps a
//! product id from being passed where some other model's id is expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// A store key for rows of model `T`.
///
/// The traits are implemented by hand so that none of them require anything
/// of `T`; the marker is never constructed.
pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedId<T> {
    pub const fn from_i64(id: i64) -> Self {
        Self(id, PhantomData)
    }

    /// The key as the store sees it, for binding into queries.
    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

// Keys are assigned in insertion order, so ordering by key orders rows by age.
impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(id: i64) -> Self {
        Self::from_i64(id)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(id: TypedId<T>) -> Self {
        id.into_i64()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    // Deliberately implements nothing.
    struct Row;

    #[test]
    fn ids_need_nothing_from_their_model() {
        let a = TypedId::<Row>::from_i64(1);
        let b = TypedId::<Row>::from(2);
        let copy = a;

        assert_eq!(a, copy);
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}/{b}"), "1/2");
    }

    #[test]
    fn ids_order_rows_by_insertion() {
        let ids: BTreeSet<TypedId<Row>> = [3, 1, 2].into_iter().map(TypedId::from_i64).collect();

        let raw: Vec<i64> = ids.into_iter().map(i64::from).collect();

        assert_eq!(raw, vec![1, 2, 3]);
    }
}
