//! The main trie implementation.
//!
//! This module contains the `Trie` type, the root handle through which every
//! whole-tree operation goes. It validates keys, handles the empty tree, and
//! adopts whatever replacement root the node-level algorithms hand back.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::iter::{Iter, Keys};
use crate::node::{NodeKind, TrieNode};
use crate::{Error, Result};

/// A persistent compressed prefix tree over string keys.
///
/// Each node stores a whole fragment of a key rather than a single
/// character, so chains of single-child nodes never appear.
///
/// All operations that would modify the trie return a new trie instance that
/// shares unchanged parts of the structure with the original via `Arc`.
/// The original stays valid and unchanged, and can keep being read from other
/// threads while new versions are built.
#[derive(Debug)]
pub struct Trie<V> {
    /// The root node of the trie, absent until the first key is inserted
    pub(crate) root: Option<Arc<TrieNode<V>>>,

    /// The number of keys stored in the trie
    size: usize,
}

impl<V> Clone for Trie<V> {
    fn clone(&self) -> Self {
        Trie {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }
    Ok(())
}

impl<V> Trie<V> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie { root: None, size: 0 }
    }

    /// Creates a trie holding a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("hello", 1).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn with_entry(key: &str, value: V) -> Result<Self> {
        Self::new().insert(key, value).map(|(trie, _)| trie)
    }

    /// Returns the number of keys stored in the trie.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, if any key has been inserted.
    pub fn root(&self) -> Option<&TrieNode<V>> {
        self.root.as_deref()
    }

    /// Returns the shape of the root node, or `None` for an empty trie.
    pub fn root_kind(&self) -> Option<NodeKind> {
        self.root().map(TrieNode::kind)
    }

    /// Inserts a key-value pair, returning the new trie and whether the key
    /// was inserted.
    ///
    /// Keys that are already stored are rejected: the returned flag is
    /// `false` and the returned trie keeps the original value. Use
    /// [`Trie::update`] to replace a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] for the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let (trie, inserted) = Trie::new().insert("hello", 42).unwrap();
    /// assert!(inserted);
    ///
    /// let (trie, inserted) = trie.insert("hello", 7).unwrap();
    /// assert!(!inserted);
    /// assert_eq!(trie.get("hello").unwrap(), Some(&42));
    /// ```
    pub fn insert(&self, key: &str, value: V) -> Result<(Self, bool)> {
        check_key(key)?;
        let value = Arc::new(value);

        let root = match &self.root {
            Some(root) => root,
            None => {
                trace!(key, "initializing root");
                let trie = Trie {
                    root: Some(Arc::new(TrieNode::with_value(key.to_string(), value))),
                    size: 1,
                };
                return Ok((trie, true));
            }
        };

        let (new_root, inserted) = TrieNode::insert(root, key, value);
        if !inserted {
            return Ok((self.clone(), false));
        }

        if new_root.fragment != root.fragment {
            trace!(old = %root.fragment, new = %new_root.fragment, "adopting new root");
        }

        let trie = Trie {
            root: Some(new_root),
            size: self.size + 1,
        };
        Ok((trie, true))
    }

    /// Replaces the value stored for an existing key.
    ///
    /// Returns the new trie and `true` if the key was found, or an unchanged
    /// trie and `false` otherwise. The number of keys never changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] for the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("hello", 1).unwrap();
    /// let (trie, updated) = trie.update("hello", 2).unwrap();
    ///
    /// assert!(updated);
    /// assert_eq!(trie.get("hello").unwrap(), Some(&2));
    /// ```
    pub fn update(&self, key: &str, value: V) -> Result<(Self, bool)> {
        check_key(key)?;

        let new_root = self
            .root
            .as_ref()
            .and_then(|root| TrieNode::update(root, key, Arc::new(value)));

        match new_root {
            Some(root) => Ok((
                Trie {
                    root: Some(root),
                    size: self.size,
                },
                true,
            )),
            None => Ok((self.clone(), false)),
        }
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] for the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("amore", 42).unwrap();
    ///
    /// assert_eq!(trie.get("amore").unwrap(), Some(&42));
    /// assert_eq!(trie.get("amor").unwrap(), None);
    /// ```
    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        check_key(key)?;
        Ok(self.root.as_ref().and_then(|root| root.get(key)))
    }

    /// Returns `true` if the trie contains a value for the given key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] for the empty string.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        self.get(key).map(|value| value.is_some())
    }

    /// Returns an iterator over the stored keys.
    ///
    /// Keys come out in traversal order (a key before the keys it is a prefix
    /// of, siblings in insertion order), not in lexicographic order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("hello", ()).unwrap();
    /// let keys: Vec<String> = trie.keys().collect();
    /// assert_eq!(keys, vec!["hello"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the stored `(key, value)` pairs, in the same
    /// order as [`Trie::keys`].
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root(), self.size)
    }
}

impl<V: Clone> Trie<V> {
    /// Removes a key, returning the removed value, the new trie, and whether
    /// the key was found.
    ///
    /// Nodes left without a value and with a single child are merged into
    /// that child, so the trie stays as compressed as if the key had never
    /// been inserted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] for the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("hello", 42).unwrap();
    /// let (removed, trie2, deleted) = trie.delete("hello").unwrap();
    ///
    /// assert!(deleted);
    /// assert_eq!(removed, Some(42));
    /// assert!(trie2.is_empty());
    ///
    /// // The original trie is unchanged
    /// assert_eq!(trie.get("hello").unwrap(), Some(&42));
    /// ```
    pub fn delete(&self, key: &str) -> Result<(Option<V>, Self, bool)> {
        check_key(key)?;

        let removal = self
            .root
            .as_ref()
            .and_then(|root| TrieNode::remove(root, key));

        match removal {
            Some((new_root, removed)) => {
                if new_root.is_none() {
                    trace!(key, "removed last key");
                }
                let trie = Trie {
                    root: new_root,
                    size: self.size - 1,
                };
                Ok((Some((*removed).clone()), trie, true))
            }
            None => Ok((None, self.clone(), false)),
        }
    }
}

impl<V: fmt::Debug> Trie<V> {
    /// Renders the structure of the trie as a nested string.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::with_entry("amore", 1).unwrap();
    /// let trie = trie.insert("amare", 2).unwrap().0;
    ///
    /// assert_eq!(trie.render(), r#""am": ["ore" -> data: 1,"are" -> data: 2]"#);
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<V: fmt::Debug> fmt::Display for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.render(f),
            None => f.write_str("<empty>"),
        }
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Default implementation
impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[&str]) -> Trie<u32> {
        let mut trie = Trie::new();
        for (i, key) in keys.iter().enumerate() {
            let (next, inserted) = trie.insert(key, i as u32).unwrap();
            assert!(inserted, "{} was not inserted", key);
            trie = next;
        }
        trie
    }

    #[test]
    fn test_new_trie() {
        let trie: Trie<u32> = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.root_kind(), None);
        assert_eq!(trie.render(), "<empty>");
    }

    #[test]
    fn test_get_nonexistent() {
        let trie: Trie<u32> = Trie::new();
        assert_eq!(trie.get("hello").unwrap(), None);
    }

    #[test]
    fn test_empty_key_rejected() {
        let trie = build(&["hello"]);

        assert_eq!(trie.insert("", 1).unwrap_err(), Error::EmptyKey);
        assert_eq!(trie.update("", 1).unwrap_err(), Error::EmptyKey);
        assert_eq!(trie.delete("").unwrap_err(), Error::EmptyKey);
        assert_eq!(trie.get("").unwrap_err(), Error::EmptyKey);
        assert_eq!(trie.contains_key("").unwrap_err(), Error::EmptyKey);
        assert_eq!(Trie::with_entry("", 1).unwrap_err(), Error::EmptyKey);
    }

    #[test]
    fn test_insert_and_get() {
        let trie = build(&["hello"]);

        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("hello").unwrap(), Some(&0));
        assert_eq!(trie.get("world").unwrap(), None);
        assert_eq!(trie.root_kind(), Some(NodeKind::Leaf));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let trie1 = build(&["hello"]);
        let (trie2, inserted) = trie1.insert("hello", 100).unwrap();

        assert!(!inserted);
        assert_eq!(trie2.len(), 1);
        assert_eq!(trie2.get("hello").unwrap(), Some(&0));
    }

    #[test]
    fn test_insert_duplicate_below_root_rejected() {
        let trie1 = build(&["amore", "amare"]);
        let (trie2, inserted) = trie1.insert("amare", 100).unwrap();

        assert!(!inserted);
        assert_eq!(trie2.len(), 2);
        assert_eq!(trie2.get("amare").unwrap(), Some(&1));
    }

    #[test]
    fn test_insert_is_persistent() {
        let trie1 = build(&["hello"]);
        let (trie2, _) = trie1.insert("help", 1).unwrap();

        assert_eq!(trie1.len(), 1);
        assert_eq!(trie2.len(), 2);
        assert_eq!(trie1.get("help").unwrap(), None);
        assert_eq!(trie2.get("help").unwrap(), Some(&1));
    }

    #[test]
    fn test_root_replaced_by_wildcard() {
        let trie = build(&["amore", "insieme"]);
        assert_eq!(trie.root_kind(), Some(NodeKind::Wildcard));

        let trie = build(&["amore", "amare"]);
        assert_eq!(trie.root_kind(), Some(NodeKind::Internal));
    }

    #[test]
    fn test_larger_key_first() {
        let trie = build(&["alphabet", "alpha"]);

        assert_eq!(trie.get("alphabet").unwrap(), Some(&0));
        assert_eq!(trie.get("alpha").unwrap(), Some(&1));
        assert_eq!(trie.render(), r#""alpha": ["bet" -> data: 0]"#);
    }

    #[test]
    fn test_shorter_key_first() {
        let trie = build(&["alpha", "alphabet"]);

        assert_eq!(trie.get("alpha").unwrap(), Some(&0));
        assert_eq!(trie.get("alphabet").unwrap(), Some(&1));
        assert_eq!(trie.render(), r#""alpha": ["bet" -> data: 1]"#);
    }

    #[test]
    fn test_update_existing() {
        let trie = build(&["amore", "amare"]);
        let (trie2, updated) = trie.update("amore", 10).unwrap();

        assert!(updated);
        assert_eq!(trie2.len(), 2);
        assert_eq!(trie2.get("amore").unwrap(), Some(&10));
        assert_eq!(trie.get("amore").unwrap(), Some(&0));
    }

    #[test]
    fn test_update_missing() {
        let trie = build(&["amore", "amare"]);

        // "am" is a branching point, not a stored key
        let (trie2, updated) = trie.update("am", 10).unwrap();
        assert!(!updated);
        assert_eq!(trie2.get("am").unwrap(), None);

        let empty: Trie<u32> = Trie::new();
        let (empty2, updated) = empty.update("am", 10).unwrap();
        assert!(!updated);
        assert!(empty2.is_empty());
    }

    #[test]
    fn test_delete_existing() {
        let trie = build(&["hello", "world"]);
        let (removed, trie2, deleted) = trie.delete("hello").unwrap();

        assert!(deleted);
        assert_eq!(removed, Some(0));
        assert_eq!(trie2.len(), 1);
        assert_eq!(trie2.get("hello").unwrap(), None);
        assert_eq!(trie2.get("world").unwrap(), Some(&1));

        // The wildcard root collapsed into the remaining key
        assert_eq!(trie2.render(), r#""world" -> data: 1"#);

        // The original trie should be unchanged
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.get("hello").unwrap(), Some(&0));
    }

    #[test]
    fn test_delete_nonexistent() {
        let trie = build(&["hello"]);
        let (removed, trie2, deleted) = trie.delete("world").unwrap();

        assert!(!deleted);
        assert_eq!(removed, None);
        assert_eq!(trie2.len(), 1);

        let empty: Trie<u32> = Trie::new();
        let (removed, empty2, deleted) = empty.delete("anything").unwrap();
        assert!(!deleted);
        assert_eq!(removed, None);
        assert!(empty2.is_empty());
    }

    #[test]
    fn test_delete_with_compression() {
        let trie = build(&["abc", "abcde"]);
        let (removed, trie2, _) = trie.delete("abc").unwrap();

        assert_eq!(removed, Some(0));
        assert_eq!(trie2.len(), 1);
        assert_eq!(trie2.get("abc").unwrap(), None);
        assert_eq!(trie2.get("abcde").unwrap(), Some(&1));
        assert_eq!(trie2.render(), r#""abcde" -> data: 1"#);
    }

    #[test]
    fn test_delete_last_key_empties_trie() {
        let trie = build(&["hello"]);
        let (_, trie2, deleted) = trie.delete("hello").unwrap();

        assert!(deleted);
        assert!(trie2.is_empty());
        assert_eq!(trie2.root_kind(), None);

        // An emptied trie behaves like a new one
        let (trie3, inserted) = trie2.insert("again", 5).unwrap();
        assert!(inserted);
        assert_eq!(trie3.render(), r#""again" -> data: 5"#);
    }

    #[test]
    fn test_delete_keeps_branch_with_siblings() {
        let trie = build(&["amore", "amare", "amici"]);
        let (_, trie2, _) = trie.delete("amare").unwrap();

        assert_eq!(trie2.render(), r#""am": ["ore" -> data: 0,"ici" -> data: 2]"#);
    }

    #[test]
    fn test_structural_sharing() {
        let trie1 = build(&["hello", "help", "world"]);
        let (trie2, _) = trie1.insert("worm", 9).unwrap();

        let root1 = trie1.root.as_ref().unwrap();
        let root2 = trie2.root.as_ref().unwrap();
        assert!(!Arc::ptr_eq(root1, root2));

        // The "hel" subtree is shared between both versions
        assert!(Arc::ptr_eq(&root1.children[0], &root2.children[0]));
        assert!(!Arc::ptr_eq(&root1.children[1], &root2.children[1]));
    }

    #[test]
    fn test_clone_shares_root() {
        let trie1 = build(&["hello", "world"]);
        let trie2 = trie1.clone();

        assert!(Arc::ptr_eq(
            trie1.root.as_ref().unwrap(),
            trie2.root.as_ref().unwrap()
        ));
    }

    #[test]
    fn test_into_iterator() {
        let trie = build(&["amore", "amare"]);
        let mut total = 0;
        for (_, value) in &trie {
            total += value;
        }
        assert_eq!(total, 1);
    }
}
