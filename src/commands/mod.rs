pub mod explain;
pub mod init;
pub mod recommend;

use std::path::{Path, PathBuf};

use crate::config::{self, Config, ConfigBuilder};
use crate::error::{JobRankError, Result};
use crate::store::{JsonFileStore, RetryingStore};

/// Load config from disk (or defaults) and apply command-line overrides.
fn load_config(
    config_path: Option<&Path>,
    data: Option<PathBuf>,
    top: Option<usize>,
) -> Result<Config> {
    let mut builder = ConfigBuilder::from_config(config::load_or_default(config_path)?);
    if let Some(data) = data {
        builder = builder.with_data(data);
    }
    if let Some(top) = top {
        builder = builder.with_top_n(top);
    }
    builder.build()
}

/// Open the dataset-backed store named in config, wrapped in retries.
fn open_store(config: &Config) -> Result<RetryingStore<JsonFileStore>> {
    let path = config.store.data.as_ref().ok_or_else(|| {
        JobRankError::config("no dataset configured; pass --data or set store.data in jobrank.toml")
    })?;
    Ok(RetryingStore::from_config(
        JsonFileStore::new(path, config.open_status.clone()),
        &config.store,
    ))
}
