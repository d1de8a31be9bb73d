//! Fixed character-class constants used by [`crate::tokenizer::SpaceTokenizer`].
//!
//! Ranges are taken directly from the reference word-list cleaning tool
//! this crate's tokenizers are derived from.

/// `A-Z`, `a-z`.
pub fn is_alphabet(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// `0-9`.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// The 32 ASCII punctuation characters `!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~`.
pub fn is_ascii_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"'
            | '#'
            | '$'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | '-'
            | '.'
            | '/'
            | ':'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '_'
            | '`'
            | '{'
            | '|'
            | '}'
            | '~'
    )
}

/// C0 control characters (excluding the whitespace ones), DEL, and U+FFFD.
pub fn is_unprintable(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{0008}' | '\u{000E}'..='\u{001B}' | '\u{007F}' | '\u{FFFD}')
}

/// Punctuation for tokenization purposes: ASCII punctuation plus the
/// unprintable class, matching the reference tool's combined `punctuation`
/// set.
pub fn is_punctuation(c: char) -> bool {
    is_ascii_punctuation(c) || is_unprintable(c)
}

/// Unicode whitespace, including the C0/C1 whitespace control characters
/// and a handful of zero-width/format separators that the reference tool
/// treats as space-like.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{001C}'..='\u{0020}'
            | '\u{0085}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200D}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{2060}'
            | '\u{2800}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_and_digits_do_not_overlap_punctuation() {
        for c in "abcXYZ0129".chars() {
            assert!(!is_punctuation(c));
            assert!(!is_whitespace(c));
        }
    }

    #[test]
    fn classifies_ascii_punctuation() {
        for c in "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~".chars() {
            assert!(is_punctuation(c), "{:?} should be punctuation", c);
        }
    }

    #[test]
    fn classifies_common_whitespace() {
        for c in [' ', '\t', '\n', '\r', '\u{00A0}', '\u{3000}'] {
            assert!(is_whitespace(c), "{:?} should be whitespace", c);
        }
    }

    #[test]
    fn unprintable_is_not_whitespace() {
        assert!(is_unprintable('\u{0001}'));
        assert!(!is_whitespace('\u{0001}'));
        assert!(is_punctuation('\u{0001}'));
    }
}
