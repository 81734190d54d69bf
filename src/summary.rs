use crate::replacer::FileOutcome;
use serde::Serialize;

/// Counters accumulated over one run.
///
/// Built up one [`FileOutcome`] at a time by the rewrite loop and returned to
/// the caller, rather than living in shared state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Candidates whose read was attempted, binary skips and read errors included.
    pub files_scanned: usize,
    /// Files rewritten (or, in a dry run, files that would have been).
    pub files_modified: usize,
    /// Occurrences replaced across all files.
    pub replacements_made: usize,
}

impl RunSummary {
    /// Folds one file's outcome into the counters.
    ///
    /// A failed write still contributes its substitutions, but never counts as
    /// a modified file.
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_scanned += 1;
        match outcome {
            FileOutcome::Replaced { substitutions } | FileOutcome::WouldReplace { substitutions } => {
                self.files_modified += 1;
                self.replacements_made += substitutions;
            }
            FileOutcome::Unchanged { substitutions }
            | FileOutcome::WriteFailed { substitutions, .. } => {
                self.replacements_made += substitutions;
            }
            FileOutcome::Binary | FileOutcome::ReadFailed(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::Replaced { substitutions: 2 });
        summary.record(&FileOutcome::Unchanged { substitutions: 0 });
        summary.record(&FileOutcome::Binary);
        summary.record(&FileOutcome::ReadFailed(io::Error::from(io::ErrorKind::PermissionDenied)));

        assert_eq!(
            summary,
            RunSummary {
                files_scanned: 4,
                files_modified: 1,
                replacements_made: 2,
            }
        );
    }

    #[test]
    fn test_failed_write_is_not_a_modification() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::WriteFailed {
            substitutions: 3,
            error: io::Error::from(io::ErrorKind::PermissionDenied).into(),
        });

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files_modified, 0);
        assert_eq!(summary.replacements_made, 3);
    }

    #[test]
    fn test_dry_run_outcome_counts_as_modified() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::WouldReplace { substitutions: 1 });
        assert_eq!(summary.files_modified, 1);
    }
}
