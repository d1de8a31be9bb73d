//! Serialize a trie into a single regular expression that matches exactly
//! its keys (component F).
//!
//! The tree walk is an explicit-stack, two-pass (enter/exit) depth-first
//! traversal rather than recursion, in the same style as the dictionary's
//! `iter()` and the reference tool's own stack-based `items()`/`to_regex()`.
//! A node's regex is only known once every child's regex has been computed,
//! so each node is pushed twice: once to discover its children, once to
//! combine their already-computed results.

use crate::char_class::is_whitespace;
use crate::error::RegexCompileError;
use crate::trie::{Trie, ROOT};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Toggles for the post-escape rewrites applied while compiling a regex.
#[derive(Debug, Clone, Copy)]
pub struct RegexOptions {
    /// Replace the Unicode replacement character `�` with `.`.
    pub fix_fffd: bool,
    /// Replace U+2019 (right single quotation mark) with `[’']`.
    pub fix_quotes: bool,
    /// Replace whitespace tokens with `\s`.
    pub fix_spaces: bool,
    /// Parse the compiled string with `regex::Regex::new` before returning
    /// it, surfacing a malformed pattern early.
    pub validate: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            fix_fffd: true,
            fix_quotes: true,
            fix_spaces: true,
            validate: false,
        }
    }
}

impl Trie<String> {
    /// Compile the set of stored keys into one regex string, anchored
    /// nowhere. Callers wrap it in word boundaries or anchors as needed.
    pub fn compile_regex(&self, options: RegexOptions) -> Result<String, RegexCompileError> {
        let raw = self.compile_node(ROOT, &options);
        let collapsed = collapse_single_char_alternation(&raw);
        let simplified = collapse_single_char_group(&collapsed);
        if options.validate {
            Regex::new(&simplified).map_err(RegexCompileError)?;
        }
        Ok(simplified)
    }

    fn compile_node(&self, root: usize, options: &RegexOptions) -> String {
        enum Frame {
            Enter(usize),
            Exit(usize),
        }

        let mut stack = vec![Frame::Enter(root)];
        let mut results: HashMap<usize, String> = HashMap::new();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    stack.push(Frame::Exit(node));
                    let children: Vec<usize> = self
                        .children_keys(node)
                        .map(|token| self.descend(node, token).unwrap())
                        .collect();
                    for child in children.into_iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(node) => {
                    let mut branches = Vec::new();
                    for token in self.children_keys(node) {
                        let child = self.descend(node, token).unwrap();
                        let child_regex = results.remove(&child).unwrap_or_default();
                        branches.push(format!("{}{}", escape_token(token, options), child_regex));
                    }
                    let combined = if self.has_replacement(node) {
                        if branches.is_empty() {
                            String::new()
                        } else {
                            format!("(?:{})?", branches.join("|"))
                        }
                    } else if branches.len() > 1 {
                        format!("(?:{})", branches.join("|"))
                    } else {
                        branches.into_iter().next().unwrap_or_default()
                    };
                    results.insert(node, combined);
                }
            }
        }

        results.remove(&root).unwrap_or_default()
    }
}

fn escape_token(token: &str, options: &RegexOptions) -> String {
    let mut out = String::new();
    for c in token.chars() {
        if options.fix_spaces && is_whitespace(c) {
            out.push_str("\\s");
        } else if options.fix_fffd && c == '\u{FFFD}' {
            out.push('.');
        } else if options.fix_quotes && c == '\u{2019}' {
            out.push_str("[\u{2019}']");
        } else {
            out.push_str(&regex::escape(&c.to_string()));
        }
    }
    out
}

static SINGLE_CHAR_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\?:(\\?.)\)").unwrap());

/// `(?:X)` where `X` is one (possibly backslash-escaped) character collapses
/// to bare `X`.
fn collapse_single_char_group(input: &str) -> String {
    SINGLE_CHAR_GROUP.replace_all(input, "$1").into_owned()
}

static GROUP_OF_SINGLE_CHAR_ALTERNATIVES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\?:((?:\\?.\|){1,11}\\?.)\)").unwrap());

/// A non-capturing group whose alternatives are all single (possibly
/// escaped) characters, up to twelve alternatives, collapses to a character
/// class `[...]`.
fn collapse_single_char_alternation(input: &str) -> String {
    GROUP_OF_SINGLE_CHAR_ALTERNATIVES
        .replace_all(input, |caps: &regex::Captures| {
            let mut class = String::from("[");
            for alt in caps[1].split('|') {
                class.push_str(&escape_for_char_class(alt));
            }
            class.push(']');
            class
        })
        .into_owned()
}

fn escape_for_char_class(alt: &str) -> String {
    let c = alt.strip_prefix('\\').unwrap_or(alt);
    let c = c.chars().next().expect("alternative is non-empty");
    match c {
        ']' | '^' | '-' | '\\' => format!("\\{}", c),
        _ => c.to_string(),
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
    fn single_key_compiles_to_literal() {
        let trie = build(&["cat"]);
        let regex = trie.compile_regex(RegexOptions::default()).unwrap();
        assert_eq!(regex, "cat");
    }

    #[test]
    fn shared_prefix_factors_into_alternation() {
        let trie = build(&["car", "care"]);
        let regex = trie.compile_regex(RegexOptions::default()).unwrap();
        let re = Regex::new(&format!("^(?:{})$", regex)).unwrap();
        assert!(re.is_match("car"));
        assert!(re.is_match("care"));
        assert!(!re.is_match("ca"));
        assert!(!re.is_match("cars"));
    }

    #[test]
    fn compiled_regex_matches_every_key_and_only_those() {
        let trie = build(&["mad", "gas", "scar", "madagascar", "car", "care"]);
        let regex = trie.compile_regex(RegexOptions { validate: true, ..Default::default() }).unwrap();
        let re = Regex::new(&format!("^(?:{})$", regex)).unwrap();
        for key in ["mad", "gas", "scar", "madagascar", "car", "care"] {
            assert!(re.is_match(key), "expected {} to match {}", key, regex);
        }
        assert!(!re.is_match("ma"));
        assert!(!re.is_match("madagascarx"));
    }

    #[test]
    fn whitespace_token_becomes_escape_s() {
        let trie = build(&["a b"]);
        let regex = trie.compile_regex(RegexOptions::default()).unwrap();
        assert_eq!(regex, "a\\sb");
    }
}
