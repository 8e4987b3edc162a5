//! Internal node implementation for the prefix tree.
//!
//! This module contains the `TrieNode` structure and the recursive algorithms
//! that restructure it. `TrieNode` instances are always wrapped in an `Arc` and
//! never mutated once shared: every modifying operation copies the nodes on
//! the path it touches and shares every other subtree with the previous
//! version of the tree.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::util::{prefix_match, split_common_prefix};

/// The shape of a node, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A node without children. Leaves always terminate a stored key.
    Leaf,
    /// A node with a non-empty fragment and at least one child.
    Internal,
    /// The synthetic root parenting keys that share no common prefix.
    Wildcard,
}

/// A node of the prefix tree.
///
/// Each node owns a key fragment, an optional value and an ordered list of
/// children. The concatenation of the fragments from the root down to a node
/// holding a value is the key that value was stored under.
#[derive(Debug)]
pub struct TrieNode<V> {
    /// The key fragment stored at this node
    pub(crate) fragment: String,

    /// The value stored at this node; present iff a key ends here
    pub(crate) value: Option<Arc<V>>,

    /// Child nodes in insertion order. No two children share a first character.
    pub(crate) children: Vec<Arc<TrieNode<V>>>,
}

impl<V> TrieNode<V> {
    /// Creates a new node with the given fragment, no value and no children
    pub(crate) fn new(fragment: String) -> Self {
        TrieNode {
            fragment,
            value: None,
            children: Vec::new(),
        }
    }

    /// Creates a new leaf holding a value
    pub(crate) fn with_value(fragment: String, value: Arc<V>) -> Self {
        TrieNode {
            fragment,
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// Creates a copy of this node with a new fragment
    fn with_fragment(&self, fragment: String) -> Self {
        TrieNode {
            fragment,
            value: self.value.clone(),
            children: self.children.clone(),
        }
    }

    /// Creates a copy of this node with a new value
    fn with_value_option(&self, value: Option<Arc<V>>) -> Self {
        TrieNode {
            fragment: self.fragment.clone(),
            value,
            children: self.children.clone(),
        }
    }

    /// Creates a copy of this node with a new set of children
    fn with_children(&self, children: Vec<Arc<TrieNode<V>>>) -> Self {
        TrieNode {
            fragment: self.fragment.clone(),
            value: self.value.clone(),
            children,
        }
    }

    /// Returns the key fragment owned by this node.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns the value stored at this node, if a key ends here.
    pub fn value(&self) -> Option<&V> {
        self.value.as_deref()
    }

    /// Returns the children of this node in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<V>> + '_ {
        self.children.iter().map(|child| child.as_ref())
    }

    /// Returns whether a stored key ends at this node
    pub fn is_word(&self) -> bool {
        self.value.is_some()
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the shape of this node.
    pub fn kind(&self) -> NodeKind {
        if self.children.is_empty() {
            NodeKind::Leaf
        } else if self.fragment.is_empty() {
            NodeKind::Wildcard
        } else {
            NodeKind::Internal
        }
    }

    /// Returns the number of keys stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let own = if self.is_word() { 1 } else { 0 };
        own + self.children.iter().map(|child| child.subtree_size()).sum::<usize>()
    }

    /// Finds the child whose fragment starts with the same character as `rest`.
    fn find_child(&self, rest: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| prefix_match(&child.fragment, rest) > 0)
    }

    /// Inserts `key` below `node`, returning the node replacing it and whether
    /// the key was inserted.
    ///
    /// A key that is already stored is rejected: the original node is handed
    /// back untouched along with `false`.
    pub(crate) fn insert(node: &Arc<Self>, key: &str, value: Arc<V>) -> (Arc<Self>, bool) {
        let (common, rest_node, rest_key) = split_common_prefix(&node.fragment, key);

        if rest_node.is_empty() {
            if rest_key.is_empty() {
                // The key ends exactly at this node
                if node.is_word() {
                    debug!(fragment = %node.fragment, "rejecting duplicate key");
                    return (Arc::clone(node), false);
                }
                return (Arc::new(node.with_value_option(Some(value))), true);
            }

            // The fragment is a strict prefix of the key, continue among the children
            let mut children = node.children.clone();
            match node.find_child(rest_key) {
                Some(idx) => {
                    let (new_child, inserted) = Self::insert(&node.children[idx], rest_key, value);
                    if !inserted {
                        return (Arc::clone(node), false);
                    }
                    children[idx] = new_child;
                }
                None => {
                    children.push(Arc::new(TrieNode::with_value(rest_key.to_string(), value)));
                }
            }
            return (Arc::new(node.with_children(children)), true);
        }

        // The key diverges inside this fragment: split
        if common.is_empty() {
            trace!(kept = rest_node, added = rest_key, "creating wildcard node");
        } else {
            trace!(common, kept = rest_node, added = rest_key, "splitting node");
        }

        let kept = Arc::new(node.with_fragment(rest_node.to_string()));
        let mut parent = TrieNode::new(common.to_string());

        if rest_key.is_empty() {
            parent.value = Some(value);
            parent.children = vec![kept];
        } else {
            let leaf = Arc::new(TrieNode::with_value(rest_key.to_string(), value));
            parent.children = vec![kept, leaf];
        }

        (Arc::new(parent), true)
    }

    /// Looks up the value stored for `key` below this node.
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        let mut current = self;
        let mut remaining = key;

        loop {
            let (_, rest_node, rest_key) = split_common_prefix(&current.fragment, remaining);

            // The key ends, or diverges, before the fragment is exhausted
            if !rest_node.is_empty() {
                return None;
            }

            if rest_key.is_empty() {
                return current.value.as_deref();
            }

            let idx = current.find_child(rest_key)?;
            current = current.children[idx].as_ref();
            remaining = rest_key;
        }
    }

    /// Replaces the value of the word node matching `key`, returning the new
    /// subtree, or `None` when no key matches.
    pub(crate) fn update(node: &Arc<Self>, key: &str, value: Arc<V>) -> Option<Arc<Self>> {
        let (_, rest_node, rest_key) = split_common_prefix(&node.fragment, key);
        if !rest_node.is_empty() {
            return None;
        }

        if rest_key.is_empty() {
            if !node.is_word() {
                return None;
            }
            return Some(Arc::new(node.with_value_option(Some(value))));
        }

        let idx = node.find_child(rest_key)?;
        let new_child = Self::update(&node.children[idx], rest_key, value)?;

        let mut children = node.children.clone();
        children[idx] = new_child;
        Some(Arc::new(node.with_children(children)))
    }

    /// Removes `key` from this subtree.
    ///
    /// Returns `None` if the key is not stored. Otherwise returns the subtree
    /// replacing `node` (absent if nothing is left of it) and the removed value.
    pub(crate) fn remove(node: &Arc<Self>, key: &str) -> Option<(Option<Arc<Self>>, Arc<V>)> {
        let (_, rest_node, rest_key) = split_common_prefix(&node.fragment, key);
        if !rest_node.is_empty() {
            return None;
        }

        if rest_key.is_empty() {
            let removed = node.value.clone()?;
            if node.is_leaf() {
                return Some((None, removed));
            }
            return Some((node.with_value_option(None).compress(), removed));
        }

        let idx = node.find_child(rest_key)?;
        let (new_child, removed) = Self::remove(&node.children[idx], rest_key)?;

        let mut children = node.children.clone();
        match new_child {
            Some(child) => children[idx] = child,
            None => {
                children.remove(idx);
            }
        }

        Some((node.with_children(children).compress(), removed))
    }

    /// Restores the compression invariant on a node that just lost a value or
    /// a child.
    ///
    /// A node without a value and with a single child is merged into that
    /// child. A node without a value and without children is dropped.
    fn compress(self) -> Option<Arc<Self>> {
        if self.is_word() {
            return Some(Arc::new(self));
        }

        match self.children.len() {
            0 => None,
            1 => {
                let child = &self.children[0];
                let mut fragment = self.fragment.clone();
                fragment.push_str(&child.fragment);
                trace!(parent = %self.fragment, child = %child.fragment, "merging node into its only child");

                Some(Arc::new(child.with_fragment(fragment)))
            }
            _ => Some(Arc::new(self)),
        }
    }
}

impl<V: fmt::Debug> TrieNode<V> {
    /// Writes the nested textual form of this subtree.
    ///
    /// A leaf renders as `"<fragment>" -> data: <value>`, any other node as
    /// `"<fragment>": [<child>,<child>,...]`.
    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "\"{}\" -> data: ", self.fragment)?;
            return match &self.value {
                Some(value) => write!(f, "{:?}", value),
                None => f.write_str("<none>"),
            };
        }

        write!(f, "\"{}\": [", self.fragment)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            child.render(f)?;
        }
        f.write_str("]")
    }
}

impl<V: fmt::Debug> fmt::Display for TrieNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<V> Clone for TrieNode<V> {
    fn clone(&self) -> Self {
        TrieNode {
            fragment: self.fragment.clone(),
            value: self.value.clone(),
            children: self.children.clone(),
        }
    }
}
