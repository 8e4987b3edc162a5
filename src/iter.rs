//! Iterators over the contents of a trie.
//!
//! Both iterators perform a lazy pre-order traversal: a node is reported
//! before its children, and children are visited in insertion order.

use std::iter::FusedIterator;

use crate::node::TrieNode;

/// An iterator over the `(key, value)` pairs of a trie.
///
/// Keys are rebuilt by concatenating the fragments along the path from the
/// root, so each yielded key is an owned `String`.
pub struct Iter<'a, V> {
    /// Nodes left to visit, each with the key path ending at that node
    stack: Vec<(&'a TrieNode<V>, String)>,

    /// Number of entries not yielded yet
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a TrieNode<V>>, len: usize) -> Self {
        let stack = root
            .map(|node| vec![(node, node.fragment.clone())])
            .unwrap_or_default();

        Iter {
            stack,
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.stack.pop() {
            // Push in reverse so the first child is visited first
            for child in node.children.iter().rev() {
                let mut child_path = String::with_capacity(path.len() + child.fragment.len());
                child_path.push_str(&path);
                child_path.push_str(&child.fragment);
                self.stack.push((child.as_ref(), child_path));
            }

            if let Some(value) = node.value.as_deref() {
                self.remaining -= 1;
                return Some((path, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

impl<'a, V> FusedIterator for Iter<'a, V> {}

/// An iterator over the keys of a trie, in traversal order.
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Keys { inner }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> ExactSizeIterator for Keys<'a, V> {}

impl<'a, V> FusedIterator for Keys<'a, V> {}
