//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cabinet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Operator console for Cabinet content")]
pub(crate) struct Cli {
    /// Config file; `cabinet.toml` in the working directory is used when present
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Store URL overriding `database.url` (`mem://` or `file://<dir>`)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) store: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Upgrade legacy plain-string fields to {fr, en} records
    Migrate {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Fallback language tag, recorded in the logs
        #[arg(long, value_name = "TAG")]
        lang_fallback: Option<String>,

        /// Restrict the run to a collection (repeatable; aliases accepted)
        #[arg(long = "collection", value_name = "NAME")]
        collections: Vec<String>,

        /// Localization schema (TOML) replacing the built-in one
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a JSON seed file into the store
    Seed {
        /// `{ "<collection>": [ { ... } ] }`
        file: PathBuf,
    },
    /// Print a collection in one language
    Show {
        /// Collection name (or alias)
        collection: String,

        /// Language tag, normalized (`en-US` reads as `en`)
        #[arg(long, value_name = "TAG")]
        lang: Option<String>,

        /// Print the localized entries as JSON
        #[arg(long)]
        json: bool,
    },
}
