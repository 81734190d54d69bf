use crate::cli::Args;
use crate::errors::Result;
use crate::output_formatter::OutputFormat;
use crate::replacer::ReplaceStrategy;
use crate::walker::ExclusionSet;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The config file picked up from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "linkswap.yaml";
/// The list of original values, one per line.
pub const DEFAULT_ORIGINALS_FILE: &str = "links.txt";
/// The list of replacement values, line-for-line with the originals.
pub const DEFAULT_REPLACEMENTS_FILE: &str = "redirects.txt";

/// Run configuration as read from a YAML file. Every field is optional.
///
/// ```yaml
/// root: public
/// originals: lists/old.txt
/// replacements: lists/new.txt
/// exclude_dirs: [dist, vendor]
/// exclude_files: [README.md]
/// strategy: single-pass
/// dry_run: true
/// format: json
/// ```
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub root: Option<PathBuf>,
    pub originals: Option<PathBuf>,
    pub replacements: Option<PathBuf>,
    /// Directory names excluded in addition to the built-in ones.
    pub exclude_dirs: Vec<String>,
    /// Files excluded in addition to the executable and the two lists.
    pub exclude_files: Vec<PathBuf>,
    pub strategy: Option<ReplaceStrategy>,
    pub dry_run: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub originals: PathBuf,
    pub replacements: PathBuf,
    pub exclusions: ExclusionSet,
    pub strategy: ReplaceStrategy,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// A utility for locating and loading run configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file to use, if any.
    ///
    /// A path named explicitly must exist; it is tried as given and then
    /// relative to `working_dir`. Without an explicit path,
    /// [`DEFAULT_CONFIG_FILE`] in `working_dir` is used when present.
    pub fn find_config(config_path: Option<&Path>, working_dir: &Path) -> Result<Option<PathBuf>> {
        let Some(config_path) = config_path else {
            let implicit = working_dir.join(DEFAULT_CONFIG_FILE);
            return Ok(implicit.is_file().then_some(implicit));
        };

        if config_path.exists() {
            return Ok(Some(config_path.to_path_buf()));
        }

        let in_working_dir = working_dir.join(config_path);
        if in_working_dir.exists() {
            return Ok(Some(in_working_dir));
        }

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}\n  - {}",
            config_path.display(),
            config_path.display(),
            in_working_dir.display()
        )
        .into())
    }

    /// Loads a `RunConfig` from a YAML file.
    pub fn load_run_config(path: &Path) -> Result<RunConfig> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

impl Settings {
    /// Resolves settings from the command line, an optional config file and
    /// the built-in defaults, in that order of precedence.
    pub fn resolve(args: &Args, working_dir: &Path) -> Result<Self> {
        let config_path = ConfigLoader::find_config(args.config.as_deref(), working_dir)?;
        let config = match &config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                ConfigLoader::load_run_config(path)?
            }
            None => RunConfig::default(),
        };

        let root = args
            .root
            .clone()
            .or(config.root)
            .unwrap_or_else(|| PathBuf::from("."));
        let originals = args
            .originals
            .clone()
            .or(config.originals)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ORIGINALS_FILE));
        let replacements = args
            .replacements
            .clone()
            .or(config.replacements)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPLACEMENTS_FILE));

        let mut exclusions = ExclusionSet::with_default_dirs();
        for name in config.exclude_dirs.iter().chain(&args.exclude_dirs) {
            let name = name.trim();
            if !name.is_empty() {
                exclusions.exclude_dir_name(name);
            }
        }

        // Never rewrite ourselves or our own inputs.
        if let Ok(exe) = env::current_exe() {
            exclusions.exclude_file(exe);
        }
        exclusions.exclude_file(&originals);
        exclusions.exclude_file(&replacements);
        if let Some(path) = &config_path {
            exclusions.exclude_file(path);
        }
        for path in &config.exclude_files {
            exclusions.exclude_file(path);
        }

        Ok(Self {
            root,
            originals,
            replacements,
            exclusions,
            strategy: args.strategy.or(config.strategy).unwrap_or_default(),
            dry_run: args.dry_run || config.dry_run.unwrap_or(false),
            format: args.format.or(config.format).unwrap_or_default(),
        })
    }
}
