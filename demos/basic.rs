//! Examples of using the prefix tree
//!
//! Run with `RUST_LOG=prefix_tree=trace` to see every split and merge.
use prefix_tree::{Tree, Trie};
use tracing_subscriber::EnvFilter;

fn main() -> prefix_tree::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Create a new trie and insert some values
    let trie = Trie::<u32>::new();
    let (trie, _) = trie.insert("amore", 1)?;
    let (trie, _) = trie.insert("amare", 2)?;
    let (trie, _) = trie.insert("amici", 3)?;
    println!("{}", trie);

    // Check values
    assert_eq!(trie.get("amore")?, Some(&1));
    assert_eq!(trie.get("amor")?, None);

    // Inserting an existing key is rejected, updating it is not
    let (trie, inserted) = trie.insert("amore", 10)?;
    assert!(!inserted);
    let (trie, updated) = trie.update("amore", 10)?;
    assert!(updated);

    // Keys with no common prefix hang below an empty root
    let (trie, _) = trie.insert("insieme", 4)?;
    let (trie, _) = trie.insert("te", 5)?;
    println!("{}", trie);

    // Older versions stay valid after a delete
    let (removed, smaller, _) = trie.delete("insieme")?;
    assert_eq!(removed, Some(4));
    assert_eq!(trie.len(), 5);
    assert_eq!(smaller.len(), 4);

    let mut keys: Vec<String> = smaller.keys().collect();
    keys.sort();
    println!("{:?}", keys);

    // The same operations are available through the `Tree` contract
    let words = Tree::keys(&smaller);
    assert_eq!(words.len(), 4);

    // The empty key is rejected
    assert!(trie.get("").is_err());

    Ok(())
}
