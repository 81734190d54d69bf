use crate::config::Settings;
use crate::confirm::ConfirmationProvider;
use crate::errors::{Error, Result};
use crate::mapping::{self, LoadOutcome, ReplacementMapping};
use crate::output_formatter::{OutputFormatter, ReportContext};
use crate::summary::RunSummary;
use crate::walker::{ExclusionSet, TreeWalker, WalkEvent, resolve_path};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// How the pairs of a mapping are applied to a file's content.
#[derive(clap::ValueEnum, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceStrategy {
    /// Apply each pair in turn against the running buffer. A later pair can
    /// match text that an earlier pair produced.
    #[default]
    Sequential,
    /// Locate every match against the untouched content (leftmost-longest,
    /// non-overlapping) and rewrite once. Replacement text is never rescanned.
    SinglePass,
}

impl ReplaceStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplaceStrategy::Sequential => "sequential",
            ReplaceStrategy::SinglePass => "single-pass",
        }
    }
}

/// Options for processing a file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessOptions {
    /// If `true`, changes will be calculated but not written to disk.
    pub dry_run: bool,
}

/// What happened to a single candidate file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Nothing changed, so nothing was written. `substitutions` is non-zero
    /// only when a pair maps a string onto itself.
    Unchanged { substitutions: usize },
    /// The file was rewritten.
    Replaced { substitutions: usize },
    /// The file would have been rewritten, but this is a dry run.
    WouldReplace { substitutions: usize },
    /// The content is not valid UTF-8.
    Binary,
    /// The file could not be read.
    ReadFailed(io::Error),
    /// The content changed but writing it back failed.
    WriteFailed { substitutions: usize, error: Error },
}

/// Literal find-and-replace engine for a single [`ReplacementMapping`].
pub struct Replacer {
    mapping: ReplacementMapping,
    automaton: Option<(AhoCorasick, Vec<String>)>,
}

impl Replacer {
    /// Creates a new `Replacer`, building the multi-pattern matcher up front
    /// when the single-pass strategy is selected.
    pub fn new(mapping: ReplacementMapping, strategy: ReplaceStrategy) -> Result<Self> {
        let automaton = match strategy {
            ReplaceStrategy::Sequential => None,
            ReplaceStrategy::SinglePass => {
                let (originals, replacements): (Vec<String>, Vec<String>) = mapping
                    .iter()
                    .map(|(o, r)| (o.to_string(), r.to_string()))
                    .unzip();
                let ac = AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&originals)
                    .map_err(|e| Error::Config(format!("could not build matcher: {e}")))?;
                Some((ac, replacements))
            }
        };

        Ok(Self { mapping, automaton })
    }

    /// Applies the mapping to `content`, returning the new content and the
    /// number of occurrences that were replaced.
    pub fn apply<'a>(&self, content: &'a str) -> (Cow<'a, str>, usize) {
        if let Some((ac, replacements)) = &self.automaton {
            let matches = ac.find_iter(content).count();
            if matches == 0 {
                return (Cow::Borrowed(content), 0);
            }
            return (Cow::Owned(ac.replace_all(content, replacements.as_slice())), matches);
        }

        let mut new_content = Cow::Borrowed(content);
        let mut total_changes = 0;

        for (original, replacement) in self.mapping.iter() {
            let matches = new_content.matches(original).count();
            if matches > 0 {
                total_changes += matches;
                new_content = Cow::Owned(new_content.replace(original, replacement));
            }
        }

        (new_content, total_changes)
    }

    /// Processes a single file, applying every pair of the mapping.
    ///
    /// The file is written only when its content actually changed. Nothing
    /// here is fatal: every failure is folded into the returned outcome.
    pub fn process_file(&self, path: &Path, options: ProcessOptions) -> FileOutcome {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return FileOutcome::ReadFailed(e),
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => return FileOutcome::Binary,
        };

        let (new_content, substitutions) = self.apply(&content);
        if new_content == content {
            return FileOutcome::Unchanged { substitutions };
        }

        if options.dry_run {
            return FileOutcome::WouldReplace { substitutions };
        }

        match write_in_place(path, new_content.as_bytes()) {
            Ok(()) => FileOutcome::Replaced { substitutions },
            Err(error) => FileOutcome::WriteFailed {
                substitutions,
                error,
            },
        }
    }
}

/// Overwrites `path` in place with `content`.
///
/// Opening for write follows symlinks and leaves mode and ownership alone, so
/// a read-only file fails here with `PermissionDenied` and is never replaced.
fn write_in_place(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.flush()?;
    Ok(())
}

/// The way a run ended without a fatal error.
#[derive(Debug)]
pub enum RunStatus {
    /// The tree was walked; the counters are attached.
    Completed(RunSummary),
    /// The mapping was empty, so the filesystem was never touched.
    NothingToDo,
    /// The user declined the mismatch confirmation.
    Declined,
}

/// The main entry point for a replacement run.
///
/// 1. Loads the mapping, consulting `confirm` if the lists disagree in length.
/// 2. Walks the root, skipping excluded directories and files.
/// 3. Rewrites each candidate and reports it as it happens.
/// 4. Prints the summary and hands it back.
pub fn run_replace(
    settings: &Settings,
    confirm: &mut dyn ConfirmationProvider,
) -> Result<RunStatus> {
    println!("--- Starting Recursive Link Replacement ---");

    let mapping = match mapping::load_mapping(&settings.originals, &settings.replacements, confirm)? {
        LoadOutcome::Ready(mapping) => mapping,
        LoadOutcome::Empty => {
            println!("Link files are empty. Nothing to replace. Exiting.");
            return Ok(RunStatus::NothingToDo);
        }
        LoadOutcome::Declined => return Ok(RunStatus::Declined),
    };

    let root = resolve_path(&settings.root);
    println!("\nCreated replacement map with {} pairs.", mapping.len());
    println!("Scanning folder: {}\n", root.display());
    tracing::debug!(
        strategy = settings.strategy.as_str(),
        dry_run = settings.dry_run,
        "starting walk"
    );

    let replacer = Replacer::new(mapping, settings.strategy)?;
    let options = ProcessOptions {
        dry_run: settings.dry_run,
    };
    let summary = replace_in_tree(&replacer, &settings.root, settings.exclusions.clone(), options);

    let context = ReportContext {
        root: &root,
        strategy: settings.strategy,
        dry_run: settings.dry_run,
    };
    OutputFormatter::new(settings.format).write_summary(&mut io::stdout(), &summary, &context)?;

    Ok(RunStatus::Completed(summary))
}

/// Walks `root` and feeds every candidate through `replacer`.
pub fn replace_in_tree(
    replacer: &Replacer,
    root: &Path,
    exclusions: ExclusionSet,
    options: ProcessOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for event in TreeWalker::new(root, exclusions) {
        match event {
            WalkEvent::SkippedSource(path) => {
                println!("ℹ️ Skipping (source file): {}", path.display());
            }
            WalkEvent::Error(e) => {
                println!("❌ Error walking directory: {e}");
            }
            WalkEvent::Candidate(path) => {
                let outcome = replacer.process_file(&path, options);
                report_outcome(&path, &outcome);
                summary.record(&outcome);
            }
        }
    }

    summary
}

/// Prints the progress line for one processed file.
fn report_outcome(path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Unchanged { .. } => {}
        FileOutcome::Replaced { substitutions } => {
            tracing::debug!(path = %path.display(), substitutions, "rewrote file");
            println!("✅ Replaced links in: {}", path.display());
        }
        FileOutcome::WouldReplace { substitutions } => {
            println!(
                "DRY Would replace links in: {} ({substitutions} changes)",
                path.display()
            );
        }
        FileOutcome::Binary => {
            println!("ℹ️ Skipping (binary file?): {}", path.display());
        }
        FileOutcome::ReadFailed(e) => {
            println!("❌ Error reading {}: {e}", path.display());
        }
        FileOutcome::WriteFailed { error, .. } => {
            println!("❌ Error writing changes to {}: {error}", path.display());
        }
    }
}
