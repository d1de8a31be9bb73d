use std::fmt::{Display, Formatter};

/// Error surface for the dictionary and trie APIs.
///
/// Matcher and find-all never raise on data; only the dictionary mutation
/// and lookup operations can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    /// `get`, `pop`, or `delete` was called for a key that is not present.
    NotFound,
    /// Insertion of an empty pattern was attempted (the root never carries
    /// a replacement).
    InvalidInput(String),
}

impl Display for ReplaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplaceError::NotFound => write!(f, "ReplaceError: key not found"),
            ReplaceError::InvalidInput(key) => {
                write!(f, "ReplaceError: invalid (empty) pattern for key '{}'", key)
            }
        }
    }
}

impl std::error::Error for ReplaceError {}

/// Error surface for [`crate::path_wrapper::process_path`].
#[derive(Debug)]
pub enum PathWrapperError {
    Io(std::io::Error),
    Replace(ReplaceError),
}

impl Display for PathWrapperError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathWrapperError::Io(err) => write!(f, "PathWrapperError: {}", err),
            PathWrapperError::Replace(err) => write!(f, "PathWrapperError: {}", err),
        }
    }
}

impl std::error::Error for PathWrapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathWrapperError::Io(err) => Some(err),
            PathWrapperError::Replace(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PathWrapperError {
    fn from(err: std::io::Error) -> Self {
        PathWrapperError::Io(err)
    }
}

impl From<ReplaceError> for PathWrapperError {
    fn from(err: ReplaceError) -> Self {
        PathWrapperError::Replace(err)
    }
}

/// Error surface for [`crate::RegexOptions::validate`]-triggered parse
/// checks, raised only when the compiled pattern fails to parse.
#[derive(Debug)]
pub struct RegexCompileError(pub regex::Error);

impl Display for RegexCompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RegexCompileError: compiled pattern failed to parse: {}", self.0)
    }
}

impl std::error::Error for RegexCompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
