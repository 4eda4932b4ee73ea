//! Resolve command

use anyhow::{Context, Result};
use ipswr_core::{AppleDb, Query};
use ipswr_schema::Candidate;

use crate::DatasetArgs;

/// Sync the dataset (unless offline), ingest it, and print the best
/// matching firmware image.
pub async fn resolve(
    os: &str,
    version: &str,
    device: Option<String>,
    offline: bool,
    json: bool,
    dataset: DatasetArgs,
) -> Result<()> {
    // Validate the constraint before any network or filesystem work.
    let query = Query::new(os, version, device)?;

    let db = AppleDb::new(dataset.into_config(offline));
    db.sync().await.context("failed to sync AppleDB")?;

    let records: Vec<Vec<u8>> = db
        .records()?
        .collect::<Result<_, _>>()
        .context("failed to read AppleDB records")?;
    tracing::debug!(
        "ingested {} records from {}",
        records.len(),
        db.path().display()
    );

    let candidate = ipswr_core::resolve(records, &query)?;
    print_candidate(&candidate, json)
}

fn print_candidate(candidate: &Candidate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(candidate)?);
        return Ok(());
    }

    println!("os:       {}", candidate.os);
    println!("version:  {}", candidate.version);
    println!("build:    {}", candidate.build);
    println!("released: {}", candidate.released);
    println!("beta:     {}", candidate.beta);
    println!("url:      {}", candidate.url);
    Ok(())
}
