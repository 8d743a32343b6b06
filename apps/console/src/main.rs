#![allow(clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Command};
use crate::handlers::migrate::MigrateArgs;
use anyhow::{Context, Result};
use cabinet::domain::Language;
use cabinet::domain::config::AppConfig;
use cabinet::kernel::config::{DEFAULT_CONFIG, load_config};
use cabinet::logger::{Logger, parse_level};
use clap::Parser;
use std::io::IsTerminal;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(url) = cli.store {
        config.database.url = url;
    }

    let _logger = init_logger(&config)?;
    let source = cli.config.as_ref().map_or_else(
        || format!("{DEFAULT_CONFIG} (optional)"),
        |path| path.display().to_string(),
    );
    info!(%source, store = %config.database.url, "Configuration loaded");
    let store = cabinet::open_store(&config).await.context("Opening the document store")?;

    match cli.command {
        Command::Migrate { dry_run, lang_fallback, collections, schema, json } => {
            let args = MigrateArgs { dry_run, lang_fallback, collections, schema, json };
            handlers::migrate::run(&config, &store, args).await
        },
        Command::Seed { file } => handlers::seed::run(&store, &file).await,
        Command::Show { collection, lang, json } => {
            let lang = lang
                .as_deref()
                .map_or_else(|| config.localization.language(), Language::normalize);
            handlers::show::run(&store, &collection, lang, json).await
        },
    }
}

fn init_logger(config: &AppConfig) -> Result<Logger> {
    let level = parse_level(&config.logging.level)?;
    let builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .level(level)
        .console(true)
        .ansi(std::io::stderr().is_terminal());

    let logger = match &config.logging.path {
        Some(path) => builder.path(path).json(config.logging.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
