//! Match enumeration without rewriting (component E).
//!
//! Shares the `buffer`/`spans`/`matches` bookkeeping shape of
//! [`crate::matcher::Translate`], but yields the matched key text itself
//! rather than a replacement, and optionally disables the non-overlap
//! killing so every viable match at every start position surfaces.

use crate::trie::{Trie, ROOT};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

impl Trie<String> {
    /// Enumerate matched pattern keys in `input`.
    ///
    /// `allow_overlapping = false` gives the same longest-leftmost,
    /// non-overlapping selection as [`Trie::translate`]. `true` instead
    /// yields every match at every start position the moment it completes,
    /// without killing shorter or overlapping candidates.
    pub fn find_all<'a>(
        &'a self,
        input: impl Iterator<Item = char> + 'a,
        allow_overlapping: bool,
    ) -> FindAll<'a> {
        let tokens = self.tokenizer().tokenize(Box::new(input));
        FindAll {
            trie: self,
            tokens,
            position: 0,
            buffer: VecDeque::new(),
            spans: BTreeMap::new(),
            matches: BTreeMap::new(),
            pending: VecDeque::new(),
            allow_overlapping,
            flushed: false,
        }
    }
}

/// Iterator returned by [`Trie::find_all`].
pub struct FindAll<'a> {
    trie: &'a Trie<String>,
    tokens: Box<dyn Iterator<Item = String> + 'a>,
    position: usize,
    buffer: VecDeque<(usize, String)>,
    spans: BTreeMap<usize, usize>,
    matches: BTreeMap<usize, (usize, String)>,
    pending: VecDeque<String>,
    allow_overlapping: bool,
    flushed: bool,
}

impl<'a> FindAll<'a> {
    fn first_span(&self, default: usize) -> usize {
        self.spans.keys().next().copied().unwrap_or(default)
    }

    fn first_match(&self, default: usize) -> usize {
        self.matches.keys().next().copied().unwrap_or(default)
    }

    fn reconstruct_key(&self, start: usize, end_inclusive: usize) -> String {
        self.buffer
            .iter()
            .filter(|(p, _)| *p >= start && *p <= end_inclusive)
            .map(|(_, t)| t.as_str())
            .collect()
    }

    fn step(&mut self, token: String) {
        let i = self.position;
        self.buffer.push_back((i, token.clone()));
        self.spans.insert(i, ROOT);

        let live: Vec<usize> = self.spans.keys().copied().collect();
        let mut dead = Vec::new();
        let mut forbidden: BTreeSet<usize> = BTreeSet::new();
        let mut newly_matched = Vec::new();

        for s in live {
            let node = self.spans[&s];
            match self.trie.descend(node, &token) {
                Some(child) => {
                    self.spans.insert(s, child);
                    if self.trie.has_replacement(child) {
                        let key = self.reconstruct_key(s, i);
                        self.matches.insert(s, (i + 1, key));
                        newly_matched.push(s);
                        if !self.allow_overlapping {
                            for p in (s + 1)..=i {
                                forbidden.insert(p);
                            }
                        }
                    }
                }
                None => dead.push(s),
            }
        }
        for s in dead {
            self.spans.remove(&s);
        }
        if !self.allow_overlapping {
            for p in forbidden {
                self.spans.remove(&p);
                self.matches.remove(&p);
            }
        }

        if self.allow_overlapping {
            for s in newly_matched {
                if let Some((_, key)) = self.matches.remove(&s) {
                    self.pending.push_back(key);
                }
            }
        } else {
            let mut first_span = self.first_span(i);
            let mut first_match = self.first_match(i);
            while first_match < first_span {
                let (_, key) = self.matches.remove(&first_match).unwrap();
                self.pending.push_back(key);
                first_match = self.first_match(i);
                first_span = self.first_span(i);
            }
        }

        // Buffer entries are only needed to reconstruct keys for matches
        // starting at or after the earliest live span; everything before
        // that can never be referenced again.
        let horizon = self.first_span(i + 1);
        while let Some(&(pos, _)) = self.buffer.front() {
            if pos < horizon {
                self.buffer.pop_front();
            } else {
                break;
            }
        }
        self.position += 1;
    }

    fn flush(&mut self) {
        self.spans.clear();
        let starts: Vec<usize> = self.matches.keys().copied().collect();
        for start in starts {
            let (_, key) = self.matches.remove(&start).unwrap();
            self.pending.push_back(key);
        }
        self.buffer.clear();
    }
}

impl<'a> Iterator for FindAll<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Some(key);
            }
            if self.flushed {
                return None;
            }
            match self.tokens.next() {
                Some(token) => self.step(token),
                None => {
                    self.flush();
                    self.flushed = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::IdentityTokenizer;
    use std::rc::Rc;

    fn build(keys: &[&str]) -> Trie<String> {
        let mut trie = Trie::new(Rc::new(IdentityTokenizer));
        for key in keys {
            trie.insert(key, String::new()).unwrap();
        }
        trie
    }

    #[test]
    fn seed_scenario_six_longest_leftmost() {
        let trie = build(&[
            "mad",
            "gas",
            "scar",
            "madagascar",
            "scare",
            "care",
            "car",
            "career",
            "error",
            "err",
            "are",
        ]);
        let found: Vec<String> = trie
            .find_all("madagascareerror".chars(), false)
            .collect();
        assert_eq!(found, vec!["madagascar".to_string(), "error".to_string()]);
    }

    #[test]
    fn seed_scenario_six_overlapping() {
        let trie = build(&[
            "mad",
            "gas",
            "scar",
            "madagascar",
            "scare",
            "care",
            "car",
            "career",
            "error",
            "err",
            "are",
        ]);
        let found: Vec<String> = trie
            .find_all("madagascareerror".chars(), true)
            .collect();
        assert_eq!(
            found,
            vec![
                "mad", "gas", "madagascar", "scar", "car", "scare", "care", "are", "career",
                "err", "error",
            ]
        );
    }

    #[test]
    fn empty_trie_finds_nothing() {
        let trie: Trie<String> = Trie::new(Rc::new(IdentityTokenizer));
        assert!(trie.find_all("anything".chars(), false).next().is_none());
    }
}
