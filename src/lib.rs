//! `token-replace` is a streaming, multi-pattern find-and-replace engine.
//!
//! # Overview
//!
//! A [`Trie`] stores a dictionary of pattern → replacement pairs, keyed by
//! whatever unit a [`Tokenizer`] produces (individual characters via
//! [`IdentityTokenizer`], or whitespace-delimited words via
//! [`SpaceTokenizer`]). Once built, the trie drives three independent
//! consumers over a live token stream:
//!
//! - [`Trie::translate`] rewrites the stream in a single pass, replacing
//!   every maximal, leftmost, non-overlapping match of a stored pattern.
//! - [`Trie::find_all`] enumerates matches without rewriting anything.
//! - [`Trie::compile_regex`] serializes the whole pattern set into one
//!   regular expression that accepts exactly the stored keys.
//!
//! # Design
//!
//! The dictionary is a token-keyed prefix tree backed by a flat node arena
//! (`Vec<TrieNode<V>>`, addressed by index) rather than an owned recursive
//! structure, because the streaming matcher needs to hold many live
//! "span" positions — each a reference into the trie — across iterator
//! steps simultaneously; an arena makes those references plain, `Copy`
//! integers instead of a self-referential borrow problem. See `DESIGN.md`
//! for the full rationale and its grounding in this crate's own prior art
//! for recursive tree structures.
//!
//! Everything pull-based: tokenizers, `translate`, and `find_all` are all
//! implemented as `Iterator` adapters, so a caller can drive megabytes of
//! input through the engine without ever materializing it as one `String`.
//!
//! # Example
//!
//! ```
//! use token_replace::{IdentityTokenizer, Trie};
//! use std::rc::Rc;
//!
//! let mut trie = Trie::new(Rc::new(IdentityTokenizer));
//! trie.insert("asd", "111".to_string()).unwrap();
//! trie.insert("hjk", "222".to_string()).unwrap();
//!
//! let output: String = trie.translate("erasdfghjkll".chars()).collect();
//! assert_eq!(output, "er111fg222ll");
//! ```

mod char_class;
mod error;
mod find_all;
mod logger;
mod matcher;
mod path_wrapper;
mod regex_compile;
mod tokenizer;
mod trie;
mod trie_pretty;

pub use char_class::{
    is_alphabet, is_ascii_punctuation, is_digit, is_punctuation, is_unprintable, is_whitespace,
};
pub use error::{PathWrapperError, RegexCompileError, ReplaceError};
pub use find_all::FindAll;
pub use logger::Log;
pub use matcher::Translate;
pub use path_wrapper::{process_path, process_path_with_trie, Encoding};
pub use regex_compile::RegexOptions;
pub use tokenizer::{IdentityTokenizer, SpaceTokenizer, Tokenizer};
pub use trie::{DictIter, Trie};
pub use trie_pretty::TrieView;
