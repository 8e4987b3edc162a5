//! The capability set shared by trie implementations.

use std::fmt::Debug;

use crate::{Result, Trie};

/// Operations every trie variant offers.
///
/// Implementations are persistent: modifying operations leave `self`
/// untouched and return the new version alongside the outcome.
pub trait Tree<V>: Sized {
    /// Inserts a key, returning the new tree and whether the key was new.
    fn insert(&self, key: &str, value: V) -> Result<(Self, bool)>;

    /// Replaces the value of an existing key, returning the new tree and
    /// whether the key was found.
    fn update(&self, key: &str, value: V) -> Result<(Self, bool)>;

    /// Removes a key, returning its value, the new tree and whether it was found.
    fn delete(&self, key: &str) -> Result<(Option<V>, Self, bool)>;

    /// Looks up the value stored for a key.
    fn get(&self, key: &str) -> Result<Option<&V>>;

    /// Returns every stored key.
    fn keys(&self) -> Vec<String>;

    /// Renders the structure of the tree for debugging.
    fn render(&self) -> String;
}

impl<V: Clone + Debug> Tree<V> for Trie<V> {
    fn insert(&self, key: &str, value: V) -> Result<(Self, bool)> {
        Trie::insert(self, key, value)
    }

    fn update(&self, key: &str, value: V) -> Result<(Self, bool)> {
        Trie::update(self, key, value)
    }

    fn delete(&self, key: &str) -> Result<(Option<V>, Self, bool)> {
        Trie::delete(self, key)
    }

    fn get(&self, key: &str) -> Result<Option<&V>> {
        Trie::get(self, key)
    }

    fn keys(&self) -> Vec<String> {
        Trie::keys(self).collect()
    }

    fn render(&self) -> String {
        Trie::render(self)
    }
}
