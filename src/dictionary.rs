use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SubOcrError};

/// Personal word list backing the spell checker.
///
/// The file is a flat list of words, one per line. Lookups are
/// case-insensitive; the in-memory set always holds lowercase words.
pub struct Dictionary {
    path: PathBuf,
    words: HashSet<String>,
    /// Last line of the file lacks its newline
    unterminated: bool,
}

impl Dictionary {
    /// Load the word list at `path`. A missing file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (words, unterminated) = read_words(&path)?;
        info!("Loaded {} dictionary words from {}", words.len(), path.display());
        Ok(Self {
            path,
            words,
            unterminated,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Re-read the word list from disk.
    pub fn reload(&mut self) -> Result<&HashSet<String>> {
        (self.words, self.unterminated) = read_words(&self.path)?;
        debug!("Reloaded dictionary: {} words", self.words.len());
        Ok(&self.words)
    }

    /// Append words to the end of the file and reload.
    ///
    /// Words are trimmed and lowercased. Blank entries, words already in the
    /// dictionary and repeats within `words` are not written. Returns the
    /// number of lines appended.
    pub fn append<I, S>(&mut self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || self.words.contains(&word) || pending.contains(&word) {
                continue;
            }
            pending.push(word);
        }

        if pending.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                SubOcrError::Dictionary(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        // keep the first new word off the last line of an unterminated file
        if self.unterminated {
            writeln!(file)?;
        }

        for word in &pending {
            writeln!(file, "{}", word)?;
        }

        info!("Added {} words to dictionary: {:?}", pending.len(), pending);
        self.reload()?;
        Ok(pending.len())
    }
}

/// Words in the file, and whether its last line is missing a newline
fn read_words(path: &Path) -> Result<(HashSet<String>, bool)> {
    if !path.exists() {
        return Err(SubOcrError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let unterminated = !content.is_empty() && !content.ends_with('\n');
    let words = content
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect();
    Ok((words, unterminated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_load_and_contains() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("hello\nWorld  again\n\n").unwrap();

        let dictionary = Dictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.contains("hello"));
        assert!(dictionary.contains("HELLO"));
        assert!(dictionary.contains("world"));
        assert!(!dictionary.contains("missing"));
    }

    #[test]
    fn test_missing_file_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = Dictionary::load(temp.child("nope.txt").path());
        assert!(matches!(result, Err(SubOcrError::FileNotFound(_))));
    }

    #[test]
    fn test_append_persists_and_reloads() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("hello\n").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        let added = dictionary.append(["Gandalf", " mordor ", "", "hello", "gandalf"]).unwrap();

        assert_eq!(added, 2);
        assert!(dictionary.contains("gandalf"));
        assert!(dictionary.contains("Mordor"));
        file.assert("hello\ngandalf\nmordor\n");

        // a fresh load sees the same words
        let reloaded = Dictionary::load(file.path()).unwrap();
        assert!(reloaded.contains("GANDALF"));
    }

    #[test]
    fn test_append_nothing_leaves_file_alone() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("hello\n").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.append(Vec::<String>::new()).unwrap(), 0);
        assert_eq!(dictionary.append(["  ", "Hello"]).unwrap(), 0);
        file.assert("hello\n");
    }

    #[test]
    fn test_append_after_unterminated_last_line() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("hello").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        dictionary.append(["frodo"]).unwrap();
        file.assert("hello\nfrodo\n");
        assert!(dictionary.contains("hello"));
    }

    #[test]
    fn test_repeated_appends_after_unterminated_last_line() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("hello").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        dictionary.append(["frodo"]).unwrap();
        dictionary.append(["sam"]).unwrap();
        file.assert("hello\nfrodo\nsam\n");
    }

    #[test]
    fn test_append_to_empty_file_adds_no_blank_line() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.touch().unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        dictionary.append(["pippin"]).unwrap();
        file.assert("pippin\n");
    }

    #[test]
    fn test_append_after_external_unterminated_edit() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("one\n").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        file.write_str("one\ntwo").unwrap();
        dictionary.reload().unwrap();
        dictionary.append(["three"]).unwrap();
        file.assert("one\ntwo\nthree\n");
    }

    #[test]
    fn test_reload_picks_up_external_edits() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("one\n").unwrap();

        let mut dictionary = Dictionary::load(file.path()).unwrap();
        file.write_str("one\ntwo\n").unwrap();
        let words = dictionary.reload().unwrap();
        assert!(words.contains("two"));
    }
}
