//! Single-pass, longest-leftmost, non-overlapping streaming replacement
//! (component D).
//!
//! This is a direct line-by-line port of the reference tool's
//! `AhoCorasickReplace.translate()` generator into a pull-based Rust
//! `Iterator`. The three bookkeeping collections (`buffer`, `spans`,
//! `matches`) and the commit loop are named and shaped exactly as in the
//! original; only the control flow changes, from "yield as we go" to
//! "buffer outputs in `pending` and drain one per `next()` call".

use crate::trie::{Trie, ROOT};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

impl Trie<String> {
    /// Rewrite `input` with every maximal, leftmost, non-overlapping match
    /// of a stored pattern replaced by its replacement value.
    pub fn translate<'a>(&'a self, input: impl Iterator<Item = char> + 'a) -> Translate<'a> {
        let tokens = self.tokenizer().tokenize(Box::new(input));
        Translate {
            trie: self,
            tokens,
            position: 0,
            buffer: VecDeque::new(),
            spans: BTreeMap::new(),
            matches: BTreeMap::new(),
            pending: VecDeque::new(),
            flushed: false,
        }
    }
}

/// Iterator returned by [`Trie::translate`].
pub struct Translate<'a> {
    trie: &'a Trie<String>,
    tokens: Box<dyn Iterator<Item = String> + 'a>,
    position: usize,
    buffer: VecDeque<(usize, String)>,
    spans: BTreeMap<usize, usize>,
    matches: BTreeMap<usize, (usize, String)>,
    pending: VecDeque<String>,
    flushed: bool,
}

impl<'a> Translate<'a> {
    fn first_span(&self, default: usize) -> usize {
        self.spans.keys().next().copied().unwrap_or(default)
    }

    fn first_match(&self, default: usize) -> usize {
        self.matches.keys().next().copied().unwrap_or(default)
    }

    fn emit_buffer_before(&mut self, bound: usize) {
        while let Some(&(pos, _)) = self.buffer.front() {
            if pos < bound {
                let (_, token) = self.buffer.pop_front().unwrap();
                self.pending.push_back(token);
            } else {
                break;
            }
        }
    }

    fn drop_buffer_before(&mut self, bound: usize) {
        while let Some(&(pos, _)) = self.buffer.front() {
            if pos < bound {
                self.buffer.pop_front();
            } else {
                break;
            }
        }
    }

    /// Consume one token from the inner tokenizer and advance the
    /// span/match bookkeeping by exactly one position, queuing any tokens
    /// that become safe to emit into `pending`.
    fn step(&mut self, token: String) {
        let i = self.position;
        self.buffer.push_back((i, token.clone()));
        self.spans.insert(i, ROOT);

        let live: Vec<usize> = self.spans.keys().copied().collect();
        let mut dead = Vec::new();
        let mut forbidden: BTreeSet<usize> = BTreeSet::new();

        for s in live {
            let node = self.spans[&s];
            match self.trie.descend(node, &token) {
                Some(child) => {
                    self.spans.insert(s, child);
                    if self.trie.has_replacement(child) {
                        let replacement = self.trie.replacement_at(child).unwrap().clone();
                        self.matches.insert(s, (i + 1, replacement));
                        for p in (s + 1)..=i {
                            forbidden.insert(p);
                        }
                    }
                }
                None => dead.push(s),
            }
        }
        for s in dead {
            self.spans.remove(&s);
        }
        for p in forbidden {
            self.spans.remove(&p);
            self.matches.remove(&p);
        }

        let mut first_span = self.first_span(i);
        let mut first_match = self.first_match(i);
        while first_match < first_span {
            let (end, replacement) = self.matches.remove(&first_match).unwrap();
            self.emit_buffer_before(first_match);
            self.drop_buffer_before(end);
            if let Some(log) = self.trie.log() {
                log.trace_commit(first_match, end);
            }
            // Mid-stream commit: the replacement is split one Unicode
            // scalar at a time, NOT retokenized. See module docs and
            // DESIGN.md, Open Question 2 — the end-of-input flush below
            // retokenizes instead, and that asymmetry is intentional.
            for c in replacement.chars() {
                self.pending.push_back(c.to_string());
            }
            first_match = self.first_match(i);
            first_span = self.first_span(i);
        }
        self.emit_buffer_before(first_span);
        self.position += 1;
    }

    fn flush(&mut self) {
        self.spans.clear();
        let starts: Vec<usize> = self.matches.keys().copied().collect();
        for start in starts {
            let (end, replacement) = self.matches.remove(&start).unwrap();
            self.emit_buffer_before(start);
            self.drop_buffer_before(end);
            if let Some(log) = self.trie.log() {
                log.trace_commit(start, end);
            }
            // End-of-input flush: the replacement IS retokenized here,
            // unlike the mid-stream path in `step`. Preserved intentionally;
            // see DESIGN.md, Open Question 2.
            let retokenized = self.trie.tokenizer().tokenize(Box::new(replacement.chars()));
            for token in retokenized {
                self.pending.push_back(token);
            }
        }
        while let Some((_, token)) = self.buffer.pop_front() {
            self.pending.push_back(token);
        }
    }
}

impl<'a> Iterator for Translate<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
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
