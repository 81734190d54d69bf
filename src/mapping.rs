use crate::confirm::{CONFIRM_TOKEN, Confirmation, ConfirmationProvider};
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// An ordered, one-to-one mapping from original strings to their replacements.
///
/// Keys are unique. When the same original appears more than once, the key
/// keeps the position of its first occurrence and takes the replacement of the
/// last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMapping {
    pairs: Vec<(String, String)>,
}

impl ReplacementMapping {
    /// Builds a mapping from position-wise pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut ordered: Vec<(String, String)> = Vec::new();

        for (original, replacement) in pairs {
            let original = original.into();
            let replacement = replacement.into();
            match index.get(&original) {
                Some(&slot) => ordered[slot].1 = replacement,
                None => {
                    index.insert(original.clone(), ordered.len());
                    ordered.push((original, replacement));
                }
            }
        }

        Self { pairs: ordered }
    }

    /// Zips the two lists, silently dropping the tail of the longer one.
    pub fn zip(originals: Vec<String>, replacements: Vec<String>) -> Self {
        Self::from_pairs(originals.into_iter().zip(replacements))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(original, replacement)` in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, r)| (o.as_str(), r.as_str()))
    }
}

/// What the loader decided after reading both lists.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A non-empty mapping is ready to apply.
    Ready(ReplacementMapping),
    /// Both lists were readable but produced no pairs.
    Empty,
    /// The lists had different lengths and the user declined to continue.
    Declined,
}

/// Reads all lines from a file, trimming whitespace and dropping empty lines.
pub fn load_links_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::ListNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::ListRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Loads both link lists and pairs them into a [`ReplacementMapping`].
///
/// A length mismatch is shown as a warning and gated behind `confirm`. Only
/// the first `min(originals, replacements)` pairs survive an accepted gate.
pub fn load_mapping(
    originals_path: &Path,
    replacements_path: &Path,
    confirm: &mut dyn ConfirmationProvider,
) -> Result<LoadOutcome> {
    let originals = load_links_from_file(originals_path)?;
    let replacements = load_links_from_file(replacements_path)?;

    println!(
        "Loaded {} links from '{}'",
        originals.len(),
        originals_path.display()
    );
    println!(
        "Loaded {} links from '{}'",
        replacements.len(),
        replacements_path.display()
    );

    if originals.len() != replacements.len() {
        let usable = originals.len().min(replacements.len());
        print_mismatch_warning(
            originals_path,
            originals.len(),
            replacements_path,
            replacements.len(),
        );
        tracing::warn!(
            originals = originals.len(),
            replacements = replacements.len(),
            "link list length mismatch"
        );

        let prompt = format!("Type '{CONFIRM_TOKEN}' to proceed with the first {usable} pairs: ");
        match confirm.confirm(&prompt) {
            Confirmation::Accepted => {
                tracing::info!(pairs = usable, "mismatch confirmed, truncating mapping");
            }
            Confirmation::Declined => {
                println!("Aborted by user.");
                return Ok(LoadOutcome::Declined);
            }
            Confirmation::Unavailable => {
                println!("Aborting due to file mismatch in non-interactive mode.");
                return Err(Error::MismatchUnconfirmed {
                    originals: originals.len(),
                    replacements: replacements.len(),
                });
            }
        }
    }

    let mapping = ReplacementMapping::zip(originals, replacements);
    if mapping.is_empty() {
        return Ok(LoadOutcome::Empty);
    }
    Ok(LoadOutcome::Ready(mapping))
}

fn print_mismatch_warning(
    originals_path: &Path,
    originals: usize,
    replacements_path: &Path,
    replacements: usize,
) {
    let rule = "!".repeat(60);
    println!("\n{rule}");
    println!("  WARNING: FILE MISMATCH!");
    println!("  '{}' has {originals} lines.", originals_path.display());
    println!("  '{}' has {replacements} lines.", replacements_path.display());
    println!("  This means your links are NOT 1-to-1.");
    println!("  Continuing will cause INCORRECT REPLACEMENTS.");
    println!("{rule}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::FixedConfirmation;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lists(dir: &TempDir, originals: &str, replacements: &str) -> (PathBuf, PathBuf) {
        let o = dir.path().join("links.txt");
        let r = dir.path().join("redirects.txt");
        fs::write(&o, originals).unwrap();
        fs::write(&r, replacements).unwrap();
        (o, r)
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.txt");
        fs::write(&path, "  http://a.com  \n\n\t\nhttp://b.com\r\n   \n").unwrap();

        let links = load_links_from_file(&path).unwrap();
        assert_eq!(links, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_missing_list_names_the_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");

        match load_links_from_file(&missing) {
            Err(Error::ListNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected ListNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_list_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.txt");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        assert!(matches!(
            load_links_from_file(&path),
            Err(Error::ListRead { .. })
        ));
    }

    #[test]
    fn test_duplicate_original_last_value_wins_first_position() {
        let mapping = ReplacementMapping::from_pairs([("a", "1"), ("b", "2"), ("a", "3")]);
        let pairs: Vec<_> = mapping.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_equal_lists_never_prompt() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "x\ny\n", "1\n2\n");
        // An unavailable provider would abort if it were consulted.
        let mut confirm = FixedConfirmation(Confirmation::Unavailable);

        match load_mapping(&o, &r, &mut confirm).unwrap() {
            LoadOutcome::Ready(mapping) => {
                assert_eq!(mapping.iter().collect::<Vec<_>>(), vec![("x", "1"), ("y", "2")]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatch_without_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "foo\nbar\n", "baz\n");
        let mut confirm = FixedConfirmation(Confirmation::Unavailable);

        match load_mapping(&o, &r, &mut confirm) {
            Err(Error::MismatchUnconfirmed {
                originals,
                replacements,
            }) => {
                assert_eq!(originals, 2);
                assert_eq!(replacements, 1);
            }
            other => panic!("expected MismatchUnconfirmed, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatch_declined() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "foo\nbar\n", "baz\n");
        let mut confirm = FixedConfirmation(Confirmation::Declined);

        assert!(matches!(
            load_mapping(&o, &r, &mut confirm).unwrap(),
            LoadOutcome::Declined
        ));
    }

    #[test]
    fn test_mismatch_accepted_truncates_to_shorter_list() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "foo\nbar\n", "baz\n");
        let mut confirm = FixedConfirmation(Confirmation::Accepted);

        match load_mapping(&o, &r, &mut confirm).unwrap() {
            LoadOutcome::Ready(mapping) => {
                let pairs: Vec<_> = mapping.iter().collect();
                assert_eq!(pairs, vec![("foo", "baz")]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_lists_produce_empty_outcome() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "\n  \n", "");
        let mut confirm = FixedConfirmation(Confirmation::Unavailable);

        assert!(matches!(
            load_mapping(&o, &r, &mut confirm).unwrap(),
            LoadOutcome::Empty
        ));
    }

    #[test]
    fn test_accepted_mismatch_with_one_empty_list_is_empty() {
        let dir = TempDir::new().unwrap();
        let (o, r) = lists(&dir, "foo\n", "");
        let mut confirm = FixedConfirmation(Confirmation::Accepted);

        assert!(matches!(
            load_mapping(&o, &r, &mut confirm).unwrap(),
            LoadOutcome::Empty
        ));
    }
}
