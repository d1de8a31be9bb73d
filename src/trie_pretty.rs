//! `ptree`-based pretty-printer for visualizing a dictionary trie: a thin
//! `TreeItem` impl plus a `print()` convenience wrapping `ptree::print_tree`.

use crate::trie::{Trie, ROOT};
use ptree::{Style, TreeItem};
use std::borrow::Cow;
use std::fmt::Debug;

/// A borrowed view of one trie node, suitable for feeding to `ptree`.
///
/// `ptree::TreeItem::Child` must be `Self` and `Clone`; a borrowed `&Trie`
/// plus an owned edge label and node id satisfies that without needing to
/// clone the trie itself.
#[derive(Clone)]
pub struct TrieView<'a, V> {
    trie: &'a Trie<V>,
    label: String,
    node: usize,
}

impl<'a, V: Debug + Clone> TreeItem for TrieView<'a, V> {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _style: &Style) -> std::io::Result<()> {
        match self.trie.replacement_at(self.node) {
            Some(value) => write!(f, "{} -> {:?}", self.label, value),
            None => write!(f, "{}", self.label),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        let children: Vec<Self> = self
            .trie
            .children_keys(self.node)
            .map(|token| TrieView {
                trie: self.trie,
                label: token.to_string(),
                node: self.trie.descend(self.node, token).unwrap(),
            })
            .collect();
        Cow::from(children)
    }
}

impl<V: Debug + Clone> Trie<V> {
    /// Render the trie to stdout as an indented tree, one line per node,
    /// annotating nodes that carry a replacement with `-> <value>`.
    pub fn print(&self) -> std::io::Result<()> {
        let root = TrieView {
            trie: self,
            label: "<root>".to_string(),
            node: ROOT,
        };
        ptree::print_tree(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::IdentityTokenizer;
    use std::rc::Rc;

    #[test]
    fn print_does_not_panic_on_empty_or_populated_trie() {
        let empty: Trie<String> = Trie::new(Rc::new(IdentityTokenizer));
        empty.print().unwrap();

        let mut trie = Trie::new(Rc::new(IdentityTokenizer));
        trie.insert("car", "1".into()).unwrap();
        trie.insert("care", "2".into()).unwrap();
        trie.print().unwrap();
    }
}
