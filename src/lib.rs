//! `linkswap` is a library for bulk, literal find-and-replace across a directory tree.
//!
//! It provides the core logic for the `linkswap` command-line tool but can also be
//! used as a standalone library. A run composes three stages:
//!
//! - `mapping`: loads two line-aligned lists into an ordered [`ReplacementMapping`],
//!   gating length mismatches behind a [`confirm::ConfirmationProvider`].
//! - `walker`: lazily walks the root, pruning excluded directories and skipping
//!   excluded files.
//! - `replacer`: rewrites each candidate file in place when its content changes,
//!   and drives the whole run through [`replacer::run_replace`].
//!
//! Counters are accumulated into a [`RunSummary`] and rendered by the
//! `output_formatter`. Everything is single-threaded and processes one file at a time.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod errors;
pub mod mapping;
pub mod output_formatter;
pub mod replacer;
pub mod summary;
pub mod walker;

// Re-export main types for easier access by library users.
pub use errors::{Error, Result};
pub use mapping::ReplacementMapping;
pub use output_formatter::{OutputFormat, OutputFormatter};
pub use replacer::{Replacer, RunStatus};
pub use summary::RunSummary;
