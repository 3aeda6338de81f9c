//! # Fetch State
//!
//! What a view sees while a lookup runs: exactly one of loading, failed or
//! ready, each carrying only what that state needs.

use crate::error::{CatalogError, CatalogResult};

/// Observable state of one remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Request in flight.
    Loading,
    /// Request failed; the detail explains why.
    Failed(CatalogError),
    /// Data arrived.
    Ready(T),
}

impl<T> FetchState<T> {
    /// The data, if the lookup succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The failure, if the lookup failed.
    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// True once the lookup has either failed or succeeded.
    #[inline]
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn map<U, F>(self, f: F) -> FetchState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(err) => FetchState::Failed(err),
            FetchState::Ready(data) => FetchState::Ready(f(data)),
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> From<CatalogResult<T>> for FetchState<T> {
    fn from(result: CatalogResult<T>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ProductId;

    #[test]
    fn test_accessors() {
        let loading: FetchState<u32> = FetchState::Loading;
        assert!(loading.is_loading());
        assert!(loading.data().is_none());
        assert!(loading.error().is_none());

        let ready = FetchState::Ready(7u32);
        assert!(ready.is_settled());
        assert_eq!(ready.data(), Some(&7));

        let failed: FetchState<u32> = FetchState::Failed(CatalogError::NotFound(ProductId(1)));
        assert!(failed.is_settled());
        assert!(failed.data().is_none());
        assert!(failed.error().unwrap().is_not_found());
    }

    #[test]
    fn test_from_result() {
        let ok: FetchState<&str> = Ok("mug").into();
        assert_eq!(ok, FetchState::Ready("mug"));

        let err: FetchState<&str> = Err(CatalogError::Abandoned(ProductId(2))).into();
        assert!(matches!(err, FetchState::Failed(CatalogError::Abandoned(_))));
    }

    #[test]
    fn test_map() {
        let state = FetchState::Ready(2u32).map(|n| n * 10);
        assert_eq!(state, FetchState::Ready(20));
    }
}
