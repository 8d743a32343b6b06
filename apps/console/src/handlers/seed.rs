use anyhow::{Context, Result};
use cabinet::database::Database;
use cabinet::features::content::Seed;
use std::path::Path;

pub(crate) async fn run(store: &Database, file: &Path) -> Result<()> {
    let seed = Seed::from_file(file).await.with_context(|| format!("Loading {}", file.display()))?;
    let report = seed.apply(store).await?;
    println!("{report}");
    Ok(())
}
