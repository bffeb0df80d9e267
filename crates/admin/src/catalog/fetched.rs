//! Outcome of a catalog read, distinguishing "nothing there" from "could not ask".

use super::CatalogError;

/// Result of a catalog read as seen by a page handler.
///
/// Pages render in all three cases; only the message shown differs.
#[derive(Debug)]
pub enum Fetched<T> {
    /// The catalog returned data.
    Found(T),
    /// The catalog answered but had nothing to return.
    Empty,
    /// The catalog could not be reached or answered badly.
    Unavailable(CatalogError),
}

impl<T> Fetched<Vec<T>> {
    /// Classify a list read. An empty list is [`Fetched::Empty`].
    pub fn list(result: Result<Vec<T>, CatalogError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Found(items),
            Err(e) => Self::Unavailable(e),
        }
    }

    /// Items, or an empty list when nothing was fetched.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found(items) => items,
            Self::Empty | Self::Unavailable(_) => Vec::new(),
        }
    }
}

impl<T> Fetched<T> {
    /// Classify a single-item read. [`CatalogError::NotFound`] is [`Fetched::Empty`].
    pub fn single(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(item) => Self::Found(item),
            Err(CatalogError::NotFound(_)) => Self::Empty,
            Err(e) => Self::Unavailable(e),
        }
    }

    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_classification() {
        assert!(matches!(Fetched::list(Ok(vec![1, 2])), Fetched::Found(v) if v == vec![1, 2]));
        assert!(matches!(Fetched::<Vec<i32>>::list(Ok(vec![])), Fetched::Empty));
        assert!(
            Fetched::<Vec<i32>>::list(Err(CatalogError::Parse("bad".to_string()))).is_unavailable()
        );
    }

    #[test]
    fn test_single_not_found_is_empty() {
        let fetched: Fetched<i32> = Fetched::single(Err(CatalogError::NotFound("x".to_string())));
        assert!(matches!(fetched, Fetched::Empty));
        assert!(!fetched.is_unavailable());
    }

    #[test]
    fn test_into_items_drops_errors() {
        let fetched: Fetched<Vec<i32>> = Fetched::Unavailable(CatalogError::Parse("bad".into()));
        assert!(fetched.into_items().is_empty());
    }
}
