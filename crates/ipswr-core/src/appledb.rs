//! AppleDB dataset acquisition.
//!
//! AppleDB is a git repository; release records are JSON files under its
//! `osFiles/` tree. [`AppleDb`] keeps a local clone at a configured
//! location, refreshes it with the system `git` binary (clone on first
//! use, fast-forward pull after), and hands the raw file bytes to the
//! resolver.
//!
//! Like Cargo's `git-fetch-with-cli`, shelling out to the installed git
//! inherits the user's credentials, proxies, and transports instead of
//! reimplementing them.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use walkdir::WalkDir;

use crate::error::AppleDbError;

/// Default AppleDB git remote.
pub const DEFAULT_GIT_URL: &str = "https://github.com/littlebyteorg/appledb.git";

/// Where and how to acquire the dataset.
///
/// There is no global state: callers construct one of these (usually via
/// [`Default`]) and pass it to [`AppleDb::new`].
#[derive(Debug, Clone)]
pub struct AppleDbConfig {
    /// Git remote to clone/pull from. Defaults to [`DEFAULT_GIT_URL`].
    pub git_url: String,

    /// Local checkout location. Defaults to `appledb` under the user
    /// cache directory, or under the temp directory when the platform
    /// has no cache directory.
    pub local_path: PathBuf,

    /// Skip the network entirely and use whatever local copy exists.
    pub offline: bool,
}

impl Default for AppleDbConfig {
    fn default() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            git_url: DEFAULT_GIT_URL.to_string(),
            local_path: base.join("appledb"),
            offline: false,
        }
    }
}

/// Handle to the local AppleDB dataset.
#[derive(Debug)]
pub struct AppleDb {
    config: AppleDbConfig,
}

impl AppleDb {
    /// Create a handle for the given configuration.
    pub fn new(config: AppleDbConfig) -> Self {
        Self { config }
    }

    /// The local checkout location.
    pub fn path(&self) -> &Path {
        &self.config.local_path
    }

    /// Bring the local dataset up to date, honoring Ctrl-C.
    ///
    /// See [`sync_with_shutdown`](Self::sync_with_shutdown); the shutdown
    /// signal here is the process interrupt.
    pub async fn sync(&self) -> Result<(), AppleDbError> {
        self.sync_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No interrupt handler available; never trigger shutdown.
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Bring the local dataset up to date, racing against `shutdown`.
    ///
    /// Offline mode only checks that a local copy exists. Otherwise the
    /// first sync clones (shallow, single branch) and later syncs
    /// fast-forward pull. If `shutdown` completes first the git child is
    /// killed and a partially created fresh clone is removed, so a later
    /// sync starts from a clean slate.
    ///
    /// # Errors
    ///
    /// [`AppleDbError::Cancelled`] when `shutdown` won the race,
    /// [`AppleDbError::MissingDataset`] in offline mode with no local
    /// copy, [`AppleDbError::Git`] when the subprocess failed.
    pub async fn sync_with_shutdown(
        &self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), AppleDbError> {
        let path = &self.config.local_path;

        if self.config.offline {
            if path.is_dir() {
                return Ok(());
            }
            return Err(AppleDbError::MissingDataset(path.clone()));
        }

        let fresh = !path.is_dir();
        let (op, mut command) = if fresh {
            tracing::info!(
                "Fetching AppleDB from {} into {}",
                self.config.git_url,
                path.display()
            );
            let mut command = Command::new("git");
            command
                .args(["clone", "--quiet", "--depth", "1", "--single-branch"])
                .arg(&self.config.git_url)
                .arg(path);
            ("clone", command)
        } else {
            tracing::info!("Updating AppleDB in {}", path.display());
            let mut command = Command::new("git");
            command
                .arg("-C")
                .arg(path)
                .args(["pull", "--quiet", "--ff-only"]);
            ("pull", command)
        };

        command.stdin(Stdio::null());
        let mut child = command.spawn()?;

        tokio::pin!(shutdown);
        let status = tokio::select! {
            status = child.wait() => status?,
            () = &mut shutdown => {
                let _ = child.kill().await;
                if fresh {
                    // A killed clone leaves a half-written checkout.
                    let _ = tokio::fs::remove_dir_all(path).await;
                }
                return Err(AppleDbError::Cancelled);
            }
        };

        if !status.success() {
            return Err(AppleDbError::Git { op, status });
        }
        Ok(())
    }

    /// Iterate the raw bytes of every release record in the dataset.
    ///
    /// Walks `osFiles/` recursively; every regular file is yielded.
    /// Files that are not valid records are the resolver's problem (it
    /// skips them), not the walker's.
    ///
    /// # Errors
    ///
    /// Returns [`AppleDbError::MissingDataset`] when the dataset has
    /// never been synced to this location. Per-file read failures are
    /// yielded as `Err` items.
    pub fn records(
        &self,
    ) -> Result<Box<dyn Iterator<Item = Result<Vec<u8>, AppleDbError>>>, AppleDbError> {
        let root = self.config.local_path.join("osFiles");
        if !root.is_dir() {
            return Err(AppleDbError::MissingDataset(root));
        }

        let iter = WalkDir::new(root).into_iter().filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => {
                Some(std::fs::read(entry.path()).map_err(AppleDbError::from))
            }
            Ok(_) => None,
            Err(err) => Some(Err(AppleDbError::from(err))),
        });

        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use crate::resolve::resolve;
    use std::fs;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .is_ok()
    }

    fn write_dataset(root: &Path) {
        let os_files = root.join("osFiles").join("iOS").join("16.x");
        fs::create_dir_all(&os_files).unwrap();

        fs::write(
            os_files.join("20A362.json"),
            r#"{"osStr": "iOS", "version": "16.0", "build": "20A362",
                "released": "2022-09-12", "sources": [{
                    "type": "ipsw", "deviceMap": ["iPhone11,2"],
                    "links": [{"url": "https://a/16.0.ipsw", "preferred": true, "active": true}]
                }]}"#,
        )
        .unwrap();
        fs::write(
            os_files.join("20B110.json"),
            r#"{"osStr": "iOS", "version": "16.1.2", "build": "20B110",
                "released": "2022-11-30", "sources": [{
                    "type": "ipsw", "deviceMap": ["iPhone11,2"],
                    "links": [{"url": "https://a/16.1.2.ipsw", "preferred": true, "active": true}]
                }]}"#,
        )
        .unwrap();
        // A broken record sitting in the same tree must not break ingestion.
        fs::write(os_files.join("broken.json"), "{").unwrap();
    }

    fn config(path: PathBuf, offline: bool) -> AppleDbConfig {
        AppleDbConfig {
            git_url: DEFAULT_GIT_URL.to_string(),
            local_path: path,
            offline,
        }
    }

    #[tokio::test]
    async fn test_offline_sync_requires_local_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("never-synced");

        let db = AppleDb::new(config(missing, true));
        assert!(matches!(
            db.sync().await,
            Err(AppleDbError::MissingDataset(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_sync_accepts_existing_copy() {
        let tmp = tempfile::tempdir().unwrap();
        write_dataset(tmp.path());

        let db = AppleDb::new(config(tmp.path().to_path_buf(), true));
        db.sync().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_clone_is_distinct_and_leaves_no_partial_copy() {
        if !git_available() {
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("appledb");

        let db = AppleDb::new(config(dest.clone(), false));
        let result = db.sync_with_shutdown(std::future::ready(())).await;

        assert!(matches!(result, Err(AppleDbError::Cancelled)));
        assert!(!dest.exists());
    }

    #[test]
    fn test_records_requires_synced_dataset() {
        let tmp = tempfile::tempdir().unwrap();
        let db = AppleDb::new(config(tmp.path().to_path_buf(), true));

        assert!(matches!(
            db.records(),
            Err(AppleDbError::MissingDataset(_))
        ));
    }

    #[test]
    fn test_records_walks_the_tree() {
        let tmp = tempfile::tempdir().unwrap();
        write_dataset(tmp.path());

        let db = AppleDb::new(config(tmp.path().to_path_buf(), true));
        let records: Vec<Vec<u8>> = db.records().unwrap().map(Result::unwrap).collect();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_resolve_over_dataset_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        write_dataset(tmp.path());

        let db = AppleDb::new(config(tmp.path().to_path_buf(), true));
        let records: Vec<Vec<u8>> = db
            .records()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let query = Query::new("iOS", ">=16", Some("iPhone11,2")).unwrap();
        let best = resolve(records, &query).unwrap();
        assert_eq!(best.build, "20B110");
        assert_eq!(best.url, "https://a/16.1.2.ipsw");
    }
}
