use std::collections::BTreeMap;

/// Character trie mapping keys to every value inserted under them
#[derive(Debug, Clone)]
pub(crate) struct Trie<V> {
    root: TrieNode<V>,
}

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: BTreeMap<char, TrieNode<V>>,
    values: Vec<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            values: Vec::new(),
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self {
            root: TrieNode::default(),
        }
    }
}

impl<V> Trie<V> {
    pub(crate) fn insert(&mut self, key: &str, value: V) {
        let node = key
            .chars()
            .fold(&mut self.root, |node, c| node.children.entry(c).or_default());
        node.values.push(value);
    }

    /// Values stored under `prefix` or any key extending it
    pub(crate) fn with_prefix(&self, prefix: &str) -> Vec<&V> {
        let mut node = &self.root;
        for c in prefix.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut found = Vec::new();
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            found.extend(node.values.iter());
            pending.extend(node.children.values());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_collects_whole_subtree() {
        let mut trie = Trie::default();
        trie.insert("queen", 1);
        trie.insert("queens", 2);
        trie.insert("quay", 3);
        trie.insert("karangahape", 4);

        let mut found: Vec<i32> = trie.with_prefix("qu").into_iter().copied().collect();
        found.sort_unstable();
        assert_eq!(found, vec![1, 2, 3]);

        let found: Vec<i32> = trie.with_prefix("queens").into_iter().copied().collect();
        assert_eq!(found, vec![2]);
        assert!(trie.with_prefix("quinn").is_empty());
    }

    #[test]
    fn repeated_keys_keep_every_value() {
        let mut trie = Trie::default();
        trie.insert("dominion", 7);
        trie.insert("dominion", 8);

        assert_eq!(trie.with_prefix("dominion").len(), 2);
    }
}
