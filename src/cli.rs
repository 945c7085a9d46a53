use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to sanitize
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Configuration file (default: sanitizer.toml at the repository root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Repository root used for history queries and include guard names
    /// (default: detected with git)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// SPDX license identifier, overrides the configuration file
    #[arg(long)]
    pub license: Option<String>,

    /// Maintaining entity, overrides the configuration file
    #[arg(long)]
    pub maintainer: Option<String>,

    /// Include guard prefix, overrides the configuration file
    #[arg(long)]
    pub project_name: Option<String>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if any file is not canonical
    #[arg(long)]
    pub check: bool,

    /// Write a JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum recursion depth (0 means no recursion)
    #[arg(short, long, default_value = "50")]
    pub max_depth: usize,

    /// Exclude patterns (glob patterns like "*.tmp" or "third_party")
    #[arg(short, long, value_delimiter = ',', default_value = ".git")]
    pub exclude: Vec<String>,

    /// Log every file
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors, no progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.check
    }
}
