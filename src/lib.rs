//! # Prefix Tree
//!
//! A compressed prefix tree (radix trie) over string keys.
//!
//! Instead of one node per character, each node stores a whole fragment of a
//! key, so a chain of single-child nodes is always collapsed into one node.
//! Every insertion finds the longest common prefix between the new key and the
//! existing fragments, and splits, creates or descends into nodes accordingly.
//!
//! ## Features
//!
//! - **Persistent API**: All modifying operations return a new trie instance
//! - **Structural Sharing**: Unchanged subtrees are shared between versions
//! - **Canonical Shape**: The tree stays maximally compressed after inserts and deletes
//! - **UTF-8 Aware**: Fragments are always split on character boundaries
//!
//! ## Example
//!
//! ```rust
//! use prefix_tree::Trie;
//!
//! // Create a new trie
//! let trie = Trie::<u32>::new();
//!
//! // Insert some values (each operation returns a new trie)
//! let (trie, _) = trie.insert("amore", 1).unwrap();
//! let (trie, _) = trie.insert("amare", 2).unwrap();
//!
//! // Lookup values
//! assert_eq!(trie.get("amore").unwrap(), Some(&1));
//! assert_eq!(trie.get("am").unwrap(), None);
//!
//! // Inspect the structure
//! assert_eq!(trie.render(), r#""am": ["ore" -> data: 1,"are" -> data: 2]"#);
//! ```

pub mod node;
mod iter;
mod tree;
mod trie;
mod util;

// Re-export public types
pub use crate::iter::{Iter, Keys};
pub use crate::node::{NodeKind, TrieNode};
pub use crate::tree::Tree;
pub use crate::trie::Trie;
pub use crate::util::split_common_prefix;

/// Errors that can occur in trie operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The empty string cannot be stored or looked up.
    ///
    /// An empty fragment is reserved for the root that parents keys sharing
    /// no common prefix.
    #[error("Empty key not allowed")]
    EmptyKey,
}

/// Result type for trie operations
pub type Result<T> = std::result::Result<T, Error>;
