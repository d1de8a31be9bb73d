//! Token-keyed prefix tree (component B) and the dictionary operations
//! built on top of it (component C).
//!
//! The child-lookup algorithm is the usual one for a prefix tree: create
//! missing nodes on insert, descend read-only on lookup, prune childless
//! replacement-less ancestors on delete. Node ownership, however, is kept
//! in a flat arena (`Vec<TrieNode<V>>` addressed by index) rather than
//! recursively nested: the streaming matcher (component D) needs to hold
//! many live node references ("spans") simultaneously across iterator
//! steps, which an owned-recursive representation cannot do without
//! becoming self-referential. See DESIGN.md for the full rationale.

use crate::error::ReplaceError;
use crate::logger::Log;
use crate::tokenizer::Tokenizer;
use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub(crate) const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub(crate) struct TrieNode<V> {
    pub(crate) children: BTreeMap<String, usize>,
    pub(crate) replacement: Option<V>,
}

impl<V> TrieNode<V> {
    fn empty() -> Self {
        Self {
            children: BTreeMap::new(),
            replacement: None,
        }
    }
}

/// A token-keyed trie mapping pattern strings to a replacement value `V`.
///
/// Keys are always materialized through the trie's [`Tokenizer`] before
/// descent, so two trie instances built with different tokenizers can
/// disagree on whether two textually-identical strings are "the same key".
pub struct Trie<V> {
    pub(crate) nodes: Vec<TrieNode<V>>,
    tokenizer: Rc<dyn Tokenizer>,
    len: usize,
    log: OnceCell<Log<&'static str>>,
}

impl<V> Trie<V> {
    pub fn new(tokenizer: Rc<dyn Tokenizer>) -> Self {
        Self {
            nodes: vec![TrieNode::empty()],
            tokenizer,
            len: 0,
            log: OnceCell::new(),
        }
    }

    /// Attach a debug trace label. Can only be set once; a second call
    /// returns the rejected label back as `Err`.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), Log<&'static str>> {
        self.log.set(log)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn tokenizer(&self) -> &Rc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub(crate) fn tokenize_key(&self, key: &str) -> Vec<String> {
        self.tokenizer.tokenize(Box::new(key.chars())).collect()
    }

    /// `descend(node, token) -> Option<node>`: the read-only primitive used
    /// by lookups and by `pop`'s breadcrumb walk.
    pub(crate) fn descend(&self, node: usize, token: &str) -> Option<usize> {
        self.nodes[node].children.get(token).copied()
    }

    /// `ensure_child(node, token) -> node`: create the child if absent,
    /// used only by mutating insert-style operations.
    fn ensure_child(&mut self, node: usize, token: &str) -> usize {
        if let Some(&id) = self.nodes[node].children.get(token) {
            id
        } else {
            let id = self.nodes.len();
            self.nodes.push(TrieNode::empty());
            self.nodes[node].children.insert(token.to_string(), id);
            id
        }
    }

    pub(crate) fn has_replacement(&self, node: usize) -> bool {
        self.nodes[node].replacement.is_some()
    }

    pub(crate) fn replacement_at(&self, node: usize) -> Option<&V> {
        self.nodes[node].replacement.as_ref()
    }

    /// `set_replacement(node, v) -> Option<v>`: overwrite the replacement at
    /// `node`, returning whatever was there before.
    fn set_replacement(&mut self, node: usize, value: V) -> Option<V> {
        self.nodes[node].replacement.replace(value)
    }

    /// `clear_replacement(node) -> Option<v>`: remove and return the
    /// replacement at `node`, if any.
    fn clear_replacement(&mut self, node: usize) -> Option<V> {
        self.nodes[node].replacement.take()
    }

    pub(crate) fn children_keys(&self, node: usize) -> impl Iterator<Item = &str> {
        self.nodes[node].children.keys().map(String::as_str)
    }

    pub(crate) fn log(&self) -> Option<Log<&'static str>> {
        self.log.get().copied()
    }

    fn prune(&mut self, breadcrumbs: &[usize], tokens: &[String]) {
        for i in (0..tokens.len()).rev() {
            let child = breadcrumbs[i + 1];
            let parent = breadcrumbs[i];
            let child_is_dead =
                !self.has_replacement(child) && self.nodes[child].children.is_empty();
            if child_is_dead {
                self.nodes[parent].children.remove(&tokens[i]);
            } else {
                break;
            }
        }
    }

    fn trace(&self, what: &str, key: &str) {
        if let Some(log) = self.log.get() {
            log.trace_mutation(what, key);
        }
    }
}

// ---- Dictionary API (component C) ----

impl<V> Trie<V> {
    /// True iff `tokenize(key)` terminates at a node with a replacement.
    pub fn contains(&self, key: &str) -> bool {
        let tokens = self.tokenize_key(key);
        let mut node = ROOT;
        for token in &tokens {
            match self.descend(node, token) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.has_replacement(node)
    }

    pub fn get(&self, key: &str) -> Result<&V, ReplaceError> {
        let tokens = self.tokenize_key(key);
        let mut node = ROOT;
        for token in &tokens {
            node = self.descend(node, token).ok_or(ReplaceError::NotFound)?;
        }
        self.nodes[node]
            .replacement
            .as_ref()
            .ok_or(ReplaceError::NotFound)
    }

    /// Create the path as needed and overwrite any prior replacement,
    /// returning it.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, ReplaceError> {
        let tokens = self.tokenize_key(key);
        if tokens.is_empty() {
            return Err(ReplaceError::InvalidInput(key.to_string()));
        }
        let mut node = ROOT;
        for token in &tokens {
            node = self.ensure_child(node, token);
        }
        let previous = self.set_replacement(node, value);
        if previous.is_none() {
            self.len += 1;
        }
        self.trace("insert", key);
        Ok(previous)
    }

    /// Insert only if no replacement is present yet; return the final
    /// (possibly pre-existing) replacement.
    pub fn set_default(&mut self, key: &str, value: V) -> Result<&V, ReplaceError> {
        let tokens = self.tokenize_key(key);
        if tokens.is_empty() {
            return Err(ReplaceError::InvalidInput(key.to_string()));
        }
        let mut node = ROOT;
        for token in &tokens {
            node = self.ensure_child(node, token);
        }
        if !self.has_replacement(node) {
            self.set_replacement(node, value);
            self.len += 1;
        }
        Ok(self.replacement_at(node).unwrap())
    }

    /// Remove the replacement at `key`, pruning now-dead ancestors.
    ///
    /// Descent is read-only: an absent key returns `NotFound` without
    /// creating any nodes (see DESIGN.md, Open Question 1 — the reference
    /// implementation's `setdefault`-based descent, which mutates the trie
    /// even on a failed `pop`, is a latent bug that is not replicated here).
    pub fn pop(&mut self, key: &str) -> Result<V, ReplaceError> {
        let tokens = self.tokenize_key(key);
        let mut breadcrumbs = Vec::with_capacity(tokens.len() + 1);
        breadcrumbs.push(ROOT);
        let mut node = ROOT;
        for token in &tokens {
            node = self.descend(node, token).ok_or(ReplaceError::NotFound)?;
            breadcrumbs.push(node);
        }
        let value = self.clear_replacement(node).ok_or(ReplaceError::NotFound)?;
        self.len -= 1;
        self.prune(&breadcrumbs, &tokens);
        self.trace("pop", key);
        Ok(value)
    }

    /// Remove the lexicographically first key.
    pub fn pop_first(&mut self) -> Result<(String, V), ReplaceError> {
        let first_key = self
            .iter()
            .next()
            .map(|(key, _)| key)
            .ok_or(ReplaceError::NotFound)?;
        let value = self.pop(&first_key)?;
        Ok((first_key, value))
    }

    /// Yield `(key, value)` pairs in ascending lexicographic order of the
    /// reconstructed key, via an explicit-stack depth-first walk (no
    /// recursion), the same style as `AhoCorasickReplace`'s own
    /// explicit-stack `items()`/`to_regex()` traversal.
    pub fn iter(&self) -> DictIter<'_, V> {
        let mut root_keys: Vec<String> = self.children_keys(ROOT).map(String::from).collect();
        root_keys.reverse();
        DictIter {
            trie: self,
            stack: vec![(ROOT, root_keys)],
            path: Vec::new(),
        }
    }

    /// Remove every key `k` with `lo <= k < hi` (reconstructed-string
    /// comparison). Returns the number of keys removed.
    pub fn range_delete(&mut self, lo: &str, hi: &str) -> usize {
        let keys: Vec<String> = self
            .iter()
            .map(|(key, _)| key)
            .filter(|key| key.as_str() >= lo && key.as_str() < hi)
            .collect();
        let removed = keys.len();
        for key in keys {
            self.pop(&key)
                .expect("key came from iter() and cannot have disappeared");
        }
        removed
    }

    /// Repeated `insert`. Reports progress every 50,000 items via
    /// `observer`.
    pub fn bulk_update<I>(
        &mut self,
        pairs: I,
        mut observer: impl FnMut(usize),
    ) -> Result<(), ReplaceError>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let mut count = 0usize;
        for (key, value) in pairs {
            self.insert(&key, value)?;
            count += 1;
            if count % 50_000 == 0 {
                observer(count);
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`Trie::iter`].
pub struct DictIter<'a, V> {
    trie: &'a Trie<V>,
    stack: Vec<(usize, Vec<String>)>,
    path: Vec<String>,
}

impl<'a, V> Iterator for DictIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, keys) = self.stack.last_mut()?;
            let node = *node;
            match keys.pop() {
                Some(token) => {
                    let child = self
                        .trie
                        .descend(node, &token)
                        .expect("token came from children_keys(node)");
                    self.path.push(token);
                    let mut child_keys: Vec<String> =
                        self.trie.children_keys(child).map(String::from).collect();
                    child_keys.reverse();
                    self.stack.push((child, child_keys));
                    if self.trie.has_replacement(child) {
                        let key = self.path.concat();
                        let value = self.trie.nodes[child].replacement.as_ref().unwrap();
                        return Some((key, value));
                    }
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::IdentityTokenizer;

    fn fresh() -> Trie<String> {
        Trie::new(Rc::new(IdentityTokenizer))
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut trie = fresh();
        trie.insert("asd", "111".into()).unwrap();
        assert_eq!(trie.get("asd").unwrap(), "111");
        assert!(trie.contains("asd"));
        assert!(!trie.contains("as"));
    }

    #[test]
    fn empty_key_is_invalid_input() {
        let mut trie = fresh();
        assert_eq!(
            trie.insert("", "x".into()),
            Err(ReplaceError::InvalidInput("".into()))
        );
    }

    #[test]
    fn get_missing_key_is_not_found() {
        let trie = fresh();
        assert_eq!(trie.get("nope"), Err(ReplaceError::NotFound));
    }

    #[test]
    fn iter_yields_ascending_lexicographic_order() {
        let mut trie = fresh();
        for key in ["hjk", "asd", "dfgh", "ghjkl;", "jkl"] {
            trie.insert(key, key.to_uppercase()).unwrap();
        }
        let keys: Vec<String> = trie.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["asd", "dfgh", "ghjkl;", "hjk", "jkl"]);
    }

    #[test]
    fn pop_prunes_dead_ancestors() {
        let mut trie = fresh();
        trie.insert("car", "1".into()).unwrap();
        trie.insert("care", "2".into()).unwrap();
        trie.pop("care").unwrap();
        // "car" must survive; the dangling "e" branch must be pruned.
        assert!(trie.contains("car"));
        assert!(!trie.contains("care"));
        assert_eq!(trie.nodes[trie.descend(ROOT, "c").unwrap()].children.len(), 1);
    }

    #[test]
    fn pop_does_not_mutate_on_missing_key() {
        let mut trie = fresh();
        trie.insert("car", "1".into()).unwrap();
        let node_count_before = trie.nodes.len();
        assert_eq!(trie.pop("cart"), Err(ReplaceError::NotFound));
        assert_eq!(trie.nodes.len(), node_count_before);
    }

    #[test]
    fn pop_first_removes_lexicographically_smallest() {
        let mut trie = fresh();
        trie.insert("zeta", "2".into()).unwrap();
        trie.insert("alpha", "1".into()).unwrap();
        let (key, value) = trie.pop_first().unwrap();
        assert_eq!(key, "alpha");
        assert_eq!(value, "1");
    }

    #[test]
    fn range_delete_removes_half_open_interval() {
        let mut trie = fresh();
        for key in ["a", "b", "c", "d"] {
            trie.insert(key, key.into()).unwrap();
        }
        let removed = trie.range_delete("b", "d");
        assert_eq!(removed, 2);
        let keys: Vec<String> = trie.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "d"]);
    }

    #[test]
    fn bulk_update_reports_progress() {
        let mut trie = fresh();
        let mut observed = Vec::new();
        trie.bulk_update(
            (0..3).map(|i| (format!("k{i}"), format!("v{i}"))),
            |n| observed.push(n),
        )
        .unwrap();
        assert_eq!(trie.len(), 3);
        assert!(observed.is_empty()); // below the 50,000 threshold
    }

    #[test]
    fn bulk_update_from_json_fixture() {
        let fixture = r#"{"asd": "111", "hjk": "222", "dfgh": "3333"}"#;
        let entries: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(fixture).unwrap();

        let mut trie = fresh();
        trie.bulk_update(
            entries
                .into_iter()
                .map(|(key, value)| (key, value.as_str().unwrap().to_string())),
            |_| {},
        )
        .unwrap();

        assert_eq!(trie.len(), 3);
        assert_eq!(trie.get("asd").unwrap(), "111");
        assert_eq!(trie.get("hjk").unwrap(), "222");
        assert_eq!(trie.get("dfgh").unwrap(), "3333");
    }
}
