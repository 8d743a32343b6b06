use anyhow::{Context, Result, bail};
use cabinet::database::Database;
use cabinet::domain::Language;
use cabinet::domain::config::AppConfig;
use cabinet::features::localization::{LocalizationSchema, MigrateOptions, Migrator};
use std::path::PathBuf;
use tracing::info;

pub(crate) struct MigrateArgs {
    pub(crate) dry_run: bool,
    pub(crate) lang_fallback: Option<String>,
    pub(crate) collections: Vec<String>,
    pub(crate) schema: Option<PathBuf>,
    pub(crate) json: bool,
}

pub(crate) async fn run(config: &AppConfig, store: &Database, args: MigrateArgs) -> Result<()> {
    let schema = match args.schema.as_ref().or(config.localization.schema.as_ref()) {
        Some(path) => LocalizationSchema::from_file(path)
            .with_context(|| format!("Loading schema {}", path.display()))?,
        None => LocalizationSchema::builtin(),
    };

    let lang_fallback = args
        .lang_fallback
        .as_deref()
        .map_or_else(|| config.localization.language(), Language::normalize);

    let options = MigrateOptions {
        dry_run: args.dry_run,
        lang_fallback,
        collections: args.collections,
    };
    info!(url = store.url(), dry_run = options.dry_run, "Running migration");

    let summary = Migrator::new(schema).run(store, &options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }

    if summary.has_failures() {
        bail!("{} migration failure(s), see the summary above", summary.failures.len());
    }
    Ok(())
}
