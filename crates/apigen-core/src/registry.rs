//! Identifier value-object registry.

use serde::Serialize;
use std::collections::BTreeSet;

/// Names of identifier-wrapper types.
///
/// Registered types map to `number` on the client side whatever their
/// declared shape. An empty registry is valid.
///
/// Iteration is in lexicographic order, so every consumer sees the same
/// sequence on every run.
///
/// # Examples
///
/// ```
/// use apigen_core::ValueObjectRegistry;
///
/// let registry: ValueObjectRegistry = ["UserId", "ArticleId", "Slug"].into_iter().collect();
/// assert!(registry.contains("UserId"));
/// assert_eq!(registry.id_types().collect::<Vec<_>>(), ["ArticleId", "UserId"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueObjectRegistry(BTreeSet<String>);

impl ValueObjectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Returns `true` if `name` is a registered identifier type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// All registered names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Registered names ending in `Id`, sorted.
    pub fn id_types(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|name| name.ends_with("Id"))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValueObjectRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes() {
        let mut registry = ValueObjectRegistry::new();
        assert!(registry.insert("UserId"));
        assert!(!registry.insert("UserId"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let registry: ValueObjectRegistry = ["TagId", "ArticleId", "CommentId"].into_iter().collect();
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            ["ArticleId", "CommentId", "TagId"]
        );
    }

    #[test]
    fn test_empty() {
        let registry = ValueObjectRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.id_types().count(), 0);
    }
}
