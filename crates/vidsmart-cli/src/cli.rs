//! CLI argument definitions.
//!
//! Uses `clap` with derive macros. Priority resolution for the data
//! directory: CLI flag > `VIDSMART_DATA_DIR` env var > platform default.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// VidSmart — an AI-assisted catalog for local and remote videos.
#[derive(Parser, Debug)]
#[command(name = "vidsmart", version, about)]
pub struct CliArgs {
    /// Data directory for the persisted catalog.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a local video file and add it to the catalog
    AddFile {
        /// Path to the video file
        path: PathBuf,

        /// Group to file the entry under
        #[arg(long = "group")]
        group: Option<String>,
    },

    /// Analyze a remote video URL and add it to the catalog
    AddUrl {
        /// Video URL (YouTube or generic)
        url: String,

        /// Group to file the entry under
        #[arg(long = "group")]
        group: Option<String>,
    },

    /// List catalog entries
    List {
        /// Only entries in this group
        #[arg(long = "group")]
        group: Option<String>,

        /// Case-insensitive search over title and summary
        #[arg(long = "search")]
        search: Option<String>,
    },

    /// Show one entry in full, including the detailed analysis
    Show {
        /// Entry id
        id: String,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id
        id: String,
    },

    /// List groups
    Groups,

    /// Create a new group
    CreateGroup {
        /// Display name
        name: String,
    },

    /// Verify that the configured API key is accepted
    CheckKey,
}
