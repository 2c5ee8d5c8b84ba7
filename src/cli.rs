//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for pixshelf using the `clap` crate.
//!
//! # Commands
//!
//! - **ls**, **bookmarks**, **up**, **open**: browse directories
//! - **rename**, **rm**, **mkdir**, **touch**: mutate entries
//! - **cut**, **copy**, **paste**, **clipboard**: clipboard session kept
//!   between invocations
//! - **tagger**: run the auto-tagger and edit its sidecar stores
//! - **config**, **completions**: housekeeping
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use pixshelf::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["pixshelf", "-q", "ls", "/tmp"]);
//! assert!(cli.quiet);
//! assert!(matches!(cli.command, Commands::Ls { .. }));
//! ```

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pixshelf")]
#[command(about = "A picture-aware file browser with an auto-tagging pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Log more (-v debug, -vv trace); `PIXSHELF_LOG` overrides
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List a directory (default: current directory)
    #[command(visible_alias = "l")]
    Ls {
        /// Directory to list
        path: Option<PathBuf>,

        /// Only show entries whose name contains this text
        #[arg(short = 'f', long = "filter", value_name = "TEXT")]
        filter: Option<String>,

        /// Classify images before printing
        #[arg(short = 'i', long = "images")]
        images: bool,

        /// Print entries as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show bookmarks, or list the directory of one
    #[command(visible_alias = "b")]
    Bookmarks {
        /// Bookmark name (case-insensitive)
        name: Option<String>,
    },

    /// Print the parent directory
    Up {
        /// Directory to leave (default: current directory)
        path: Option<PathBuf>,

        /// Bookmark the directory was reached through
        #[arg(short = 'b', long = "bookmark", value_name = "NAME")]
        bookmark: Option<String>,
    },

    /// Open a file with its default application, or list a directory
    #[command(visible_alias = "o")]
    Open {
        path: PathBuf,
    },

    /// Rename an entry within its directory
    Rename {
        path: PathBuf,

        /// New name (no path separators)
        new_name: String,
    },

    /// Delete entries
    Rm {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Create a folder
    Mkdir {
        name: String,

        /// Directory to create it in (default: current directory)
        #[arg(short = 'C', long = "in", value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Create an empty file
    Touch {
        name: String,

        /// Directory to create it in (default: current directory)
        #[arg(short = 'C', long = "in", value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Mark entries to be moved by the next paste
    Cut {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Mark entries to be copied by the next paste
    Copy {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Paste the pending cut or copy into a directory
    #[command(visible_alias = "p")]
    Paste {
        /// Destination directory (default: current directory)
        dest: Option<PathBuf>,
    },

    /// Show or clear the pending clipboard
    Clipboard {
        /// Drop both pending sets
        #[arg(long = "clear")]
        clear: bool,
    },

    /// Run the auto-tagger and manage its stores
    #[command(visible_alias = "t")]
    Tagger {
        #[command(subcommand)]
        command: TaggerCommands,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

/// Tagger subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaggerCommands {
    /// Run the tagger script over an image directory
    Run {
        /// Images to classify (default: the project's image directory)
        #[arg(long = "images", value_name = "DIR")]
        images: Option<PathBuf>,

        /// Where sorted output goes (default: the project's output directory)
        #[arg(long = "output", value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Tell the tagger to skip images
    Exclude {
        /// Image paths or file names
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Replace the manual tags of an image
    Manual {
        /// Image path or file name
        image: PathBuf,

        /// Tags to record
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 1.., required = true)]
        tags: Vec<String>,
    },

    /// Show store contents, or the state of one image
    Show {
        image: Option<PathBuf>,
    },

    /// List known tags
    Vocab {
        /// Only tags containing this text
        query: Option<String>,

        /// List every tag instead of the first suggestions
        #[arg(long = "all")]
        all: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., interpreter=python3)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., interpreter)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Show every configuration value and the config file location
    List,
}
