//! Stream a file through a tokenizer and the matcher, writing atomically
//! (component G, ambient — in scope for this crate even though filesystem
//! traversal beyond a single file is not).

use crate::error::PathWrapperError;
use crate::trie::Trie;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// The only text encoding this crate understands end to end.
///
/// Kept as an explicit enum (rather than hard-coding UTF-8 silently) so a
/// caller requesting anything else gets a configuration error up front
/// instead of mojibake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
}

/// Rewrite the file at `input_path` through `trie` and write the result to
/// `output_path`.
///
/// If `output_path` already exists and `overwrite` is `false`, the call is
/// a no-op that returns `Ok(())`. Otherwise the rewritten contents are
/// written to a sibling `<output_path>.partial` file first and renamed into
/// place on success (`std::fs::rename` is atomic on the same filesystem);
/// on any failure the partial file is removed before the error propagates,
/// so a crash mid-write never leaves a corrupt `output_path` behind.
pub fn process_path(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    overwrite: bool,
    encoding: Encoding,
) -> Result<(), PathWrapperError> {
    let Encoding::Utf8 = encoding;
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    if output_path.exists() && !overwrite {
        return Ok(());
    }
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut input = String::new();
    fs::File::open(input_path)?.read_to_string(&mut input)?;

    let trie = Trie::<String>::new(std::rc::Rc::new(crate::tokenizer::IdentityTokenizer));
    process_with_trie(&trie, &input, output_path)
}

/// Same contract as [`process_path`], but driven by a caller-supplied trie
/// (and therefore whatever tokenizer it was built with) instead of the
/// default identity one.
pub fn process_path_with_trie(
    trie: &Trie<String>,
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    overwrite: bool,
    encoding: Encoding,
) -> Result<(), PathWrapperError> {
    let Encoding::Utf8 = encoding;
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    if output_path.exists() && !overwrite {
        return Ok(());
    }
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut input = String::new();
    fs::File::open(input_path)?.read_to_string(&mut input)?;

    process_with_trie(trie, &input, output_path)
}

fn process_with_trie(
    trie: &Trie<String>,
    input: &str,
    output_path: &Path,
) -> Result<(), PathWrapperError> {
    let partial_path = partial_path_for(output_path);

    let write_result = (|| -> Result<(), PathWrapperError> {
        let mut partial = fs::File::create(&partial_path)?;
        for token in trie.translate(input.chars()) {
            partial.write_all(token.as_bytes())?;
        }
        partial.flush()?;
        Ok(())
    })();

    match write_result {
        Ok(()) => {
            fs::rename(&partial_path, output_path)?;
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&partial_path);
            Err(err)
        }
    }
}

fn partial_path_for(output_path: &Path) -> std::path::PathBuf {
    let mut file_name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    file_name.push(".partial");
    output_path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn skips_existing_output_without_overwrite() {
        let dir = std::env::temp_dir().join(format!(
            "token-replace-test-skip-{:?}",
            std::thread::current().id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let input_path = dir.join("in.txt");
        let output_path = dir.join("out.txt");
        fs::write(&input_path, "hello").unwrap();
        fs::write(&output_path, "preexisting").unwrap();

        process_path(&input_path, &output_path, false, Encoding::Utf8).unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "preexisting");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rewrites_file_through_matcher_and_renames_atomically() {
        let dir = std::env::temp_dir().join(format!(
            "token-replace-test-rewrite-{:?}",
            std::thread::current().id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let input_path = dir.join("in.txt");
        let output_path = dir.join("out.txt");
        fs::write(&input_path, "erasdfghjkll").unwrap();

        let mut trie = Trie::new(Rc::new(crate::tokenizer::IdentityTokenizer));
        trie.insert("asd", "111".into()).unwrap();
        trie.insert("hjk", "222".into()).unwrap();
        trie.insert("dfgh", "3333".into()).unwrap();
        trie.insert("ghjkl;", "44444".into()).unwrap();
        trie.insert("jkl", "!".into()).unwrap();

        process_path_with_trie(&trie, &input_path, &output_path, true, Encoding::Utf8).unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "er111fg222ll");
        assert!(!partial_path_for(&output_path).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
