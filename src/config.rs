/*!
 * Configuration handling for repo2wc
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::writer::{Output, DOWNLOAD_FILE_NAME};

/// How the input paths are collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectMode {
    /// Walk each path like a dropped file or folder; skipped directory names prune whole subtrees
    Entries,
    /// Treat each path like a directory-scoped file picker; only path patterns apply
    Picker,
}

impl Default for CollectMode {
    fn default() -> Self {
        Self::Entries
    }
}

/// Command-line arguments for repo2wc
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repo2wc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert a repository directory into a WebContainer mount snippet",
    long_about = "Collects the text files of a repository, skipping dependency, build, editor and secret files, and emits a JavaScript snippet that mounts them into a WebContainer."
)]
pub struct Args {
    /// Files or directories to convert
    #[clap(default_value = ".")]
    pub paths: Vec<String>,

    /// Collection mode
    #[clap(long, value_enum, default_value_t = CollectMode::default())]
    pub mode: CollectMode,

    /// File to write the snippet to
    #[clap(short, long, default_value = DOWNLOAD_FILE_NAME)]
    pub output: String,

    /// Print the snippet to stdout instead of writing a file
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Copy the snippet to the system clipboard
    #[clap(long)]
    pub clip: bool,

    /// Number of threads used to read files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Paths to convert
    pub inputs: Vec<PathBuf>,

    /// Collection mode
    pub mode: CollectMode,

    /// Snippet destination
    pub output: Output,

    /// Copy the snippet to the clipboard
    pub clip: bool,

    /// Number of threads used to read files
    pub num_threads: usize,

    /// Debug logging
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(".")],
            mode: CollectMode::default(),
            output: Output::default(),
            clip: false,
            num_threads: 4,
            verbose: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let output = if args.stdout {
            Output::Stdout
        } else {
            Output::File(PathBuf::from(args.output))
        };

        Self {
            inputs: args.paths.into_iter().map(PathBuf::from).collect(),
            mode: args.mode,
            output,
            clip: args.clip,
            num_threads: args.threads,
            verbose: args.verbose,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(!self.inputs.is_empty(), Config, "no input paths given");
        crate::ensure!(
            self.num_threads > 0,
            Config,
            "thread count must be at least 1"
        );

        for input in &self.inputs {
            crate::ensure!(input.exists(), PathNotFound, "{}", input.display());
        }

        if let Output::File(path) = &self.output {
            if let Some(parent) = path.parent() {
                crate::ensure!(
                    parent.as_os_str().is_empty() || parent.is_dir(),
                    Config,
                    "output directory not found: {}",
                    parent.display()
                );
            }
            crate::ensure!(
                !path.is_dir(),
                Config,
                "output path is a directory: {}",
                path.display()
            );
        }

        Ok(())
    }
}
