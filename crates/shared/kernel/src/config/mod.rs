use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Prefix of environment overrides: `CABINET__DATABASE__URL` maps to `database.url`.
pub const ENV_PREFIX: &str = "CABINET";

/// Base name of the config file looked up when no path is given (`cabinet.toml`).
pub const DEFAULT_CONFIG: &str = "cabinet";

#[cab_derive::cab_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration tree from an optional file overlaid with environment variables.
///
/// Layers, lowest priority first:
/// 1. **Base file**: `path` when given, which must exist. Without a path the default
///    [`DEFAULT_CONFIG`] file is read if present and skipped otherwise, so a bare
///    checkout runs on built-in defaults.
/// 2. **Environment**: variables prefixed with `CABINET__`, nested with `__`
///    (`CABINET__LOCALIZATION__DEFAULT_LANGUAGE=en`).
///
/// The format is inferred from the file extension; an extension-less path is tried as
/// `<path>.toml` and friends.
///
/// # Errors
/// Fails when an explicit file is missing or malformed, or when the merged tree does not
/// deserialize into `T`.
///
/// # Example
/// ```rust
/// use cab_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     retries: u16,
/// }
///
/// let cfg: Settings = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    trace!(path = %effective_path.display(), required, "Loading config");
    let config = build(&effective_path, required, environment())?;
    trace!("Config loaded");
    Ok(config)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__")
}

fn build<T>(path: &Path, required: bool, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
