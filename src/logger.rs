use std::fmt::{Display, Formatter};

/// A level-gated debug trace label for tracing trie mutation and matcher
/// commit activity.
///
/// Attach one to a [`crate::trie::Trie`] via
/// [`crate::trie::Trie::set_log`] to print `insert`/`pop`/commit activity
/// to stdout under `#[cfg(debug_assertions)]` builds. Release builds never
/// pay for the tracing (the calls compile away entirely).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl<T> Log<T> {
    fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<TL: Display> Log<TL> {
    /// Trace a dictionary mutation (`insert`, `pop`, ...) at `Success` level
    /// or above.
    pub fn trace_mutation(&self, what: &str, key: &str) {
        #[cfg(debug_assertions)]
        if self.order() >= 2 {
            println!("[{}; TrieMutation]: {} '{}'", self, what, key);
        }
    }

    /// Trace a matcher commit (a span turning into emitted output) at
    /// `Verbose` level.
    pub fn trace_commit(&self, start: usize, end: usize) {
        #[cfg(debug_assertions)]
        if self.order() >= 4 {
            println!("[{}; MatcherCommit]: span [{}, {})", self, start, end);
        }
    }
}
