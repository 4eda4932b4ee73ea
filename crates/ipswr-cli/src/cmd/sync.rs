//! Sync command

use anyhow::{Context, Result};
use ipswr_core::AppleDb;

use crate::DatasetArgs;

/// Refresh the local AppleDB checkout without resolving anything.
pub async fn sync(dataset: DatasetArgs) -> Result<()> {
    let db = AppleDb::new(dataset.into_config(false));
    db.sync().await.context("failed to sync AppleDB")?;

    println!("AppleDB up to date at {}", db.path().display());
    Ok(())
}
