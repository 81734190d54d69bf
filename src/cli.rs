use crate::output_formatter::OutputFormat;
use crate::replacer::ReplaceStrategy;
use clap::Parser;
use std::path::PathBuf;

/// Bulk literal find-and-replace driven by two line-aligned lists.
///
/// Every flag is optional. With none, `linkswap` reads `links.txt` and
/// `redirects.txt` from the working directory and rewrites every text file
/// beneath it.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Replace every listed link with its redirect across a directory tree",
    long_about = "linkswap - Bulk find-and-replace driven by two parallel lists.

Line N of the originals list is replaced by line N of the replacements list in
every text file under the root. Binary files, the list files themselves and
the running executable are skipped, as are .git, .svn, node_modules and
__pycache__ directories.

QUICK EXAMPLES:
  linkswap                                  # links.txt -> redirects.txt under .
  linkswap --dry-run                        # Preview without writing
  linkswap -o old.txt -r new.txt -d public  # Custom lists and root
  linkswap --strategy single-pass           # Never rescan replaced text

If the lists differ in length you will be asked to type CONTINUE. Without an
interactive stdin the run aborts instead."
)]
pub struct Args {
    /// Path to a YAML configuration file. Defaults to `linkswap.yaml` when present.
    #[arg(short, long, env = "LINKSWAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The directory to process. Defaults to the working directory.
    #[arg(short = 'd', long, env = "LINKSWAP_ROOT")]
    pub root: Option<PathBuf>,

    /// File listing the original values, one per line. Defaults to `links.txt`.
    #[arg(short, long, env = "LINKSWAP_ORIGINALS")]
    pub originals: Option<PathBuf>,

    /// File listing the replacement values, one per line. Defaults to `redirects.txt`.
    #[arg(short, long, env = "LINKSWAP_REPLACEMENTS")]
    pub replacements: Option<PathBuf>,

    /// A comma-separated list of extra directory names to skip.
    #[arg(short = 'e', long = "exclude-dir", value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// How pairs are applied to each file.
    #[arg(long, value_enum)]
    pub strategy: Option<ReplaceStrategy>,

    /// Preview the changes without actually modifying any files.
    #[arg(long)]
    pub dry_run: bool,

    /// The format of the final summary.
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Log diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let args = Args::try_parse_from(["linkswap"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.exclude_dirs.is_empty());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "linkswap",
            "-o",
            "old.txt",
            "-r",
            "new.txt",
            "--exclude-dir",
            "dist,vendor",
            "--strategy",
            "single-pass",
            "--format",
            "json",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.originals, Some(PathBuf::from("old.txt")));
        assert_eq!(args.replacements, Some(PathBuf::from("new.txt")));
        assert_eq!(args.exclude_dirs, vec!["dist", "vendor"]);
        assert_eq!(args.strategy, Some(ReplaceStrategy::SinglePass));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.dry_run);
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
