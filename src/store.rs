//! Local shard storage.
//!
//! Shard data is laid out as `<data dir>/<database>/<retention policy>/<shard id>`.
//! The store takes an exclusive lock file on open so two maintenance runs (or
//! a maintenance run and a starting server) cannot operate on the same data
//! directory at once.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};

use crate::config::{DataConfig, DEFAULT_ENGINE, DEFAULT_INDEX};

const LOCK_FILE: &str = ".lock";

/// A handle on the node's on-disk shard data.
///
/// `delete_retention_policy` must be idempotent: deleting a policy whose
/// local data is already gone succeeds as a no-op. Callers rely on that to
/// make re-running a partially failed maintenance operation safe.
pub trait LocalStore {
    fn open(&mut self) -> Result<()>;

    fn close(&mut self);

    fn delete_retention_policy(&mut self, database: &str, rp: &str) -> Result<()>;
}

/// Production [`LocalStore`] rooted at the configured data directory.
pub struct ShardStore {
    dir: PathBuf,
    engine: String,
    index_version: String,
    opened: bool,
}

impl ShardStore {
    pub fn new(config: &DataConfig) -> ShardStore {
        ShardStore {
            dir: config.dir.clone(),
            engine: config.engine.clone(),
            index_version: config.index_version.clone(),
            opened: false,
        }
    }

    /// Number of shard directories currently on disk for `(database, rp)`.
    pub fn shard_count(&self, database: &str, rp: &str) -> Result<usize> {
        let path = self.dir.join(database).join(rp);
        if !path.exists() {
            return Ok(0);
        }
        let mut count = 0;
        for entry in fs::read_dir(&path)? {
            if entry?.file_type()?.is_dir() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn release_lock(&mut self) {
        if !self.opened {
            return;
        }
        self.opened = false;
        let lock = self.dir.join(LOCK_FILE);
        if let Err(err) = fs::remove_file(&lock) {
            warn!("could not remove lock file {}: {err}", lock.display());
        }
    }
}

impl LocalStore for ShardStore {
    fn open(&mut self) -> Result<()> {
        if self.engine != DEFAULT_ENGINE {
            bail!("unsupported storage engine '{}'", self.engine);
        }
        if self.index_version != DEFAULT_INDEX {
            bail!("unsupported index version '{}'", self.index_version);
        }
        if !self.dir.is_dir() {
            bail!("data directory {} does not exist", self.dir.display());
        }

        let lock = self.dir.join(LOCK_FILE);
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock)
            .with_context(|| format!("locking data directory {}", self.dir.display()))?;
        self.opened = true;
        debug!("opened shard store at {}", self.dir.display());
        Ok(())
    }

    fn close(&mut self) {
        self.release_lock();
    }

    fn delete_retention_policy(&mut self, database: &str, rp: &str) -> Result<()> {
        if !self.opened {
            bail!("shard store is not open");
        }
        let path = self.dir.join(database).join(rp);
        if !path.exists() {
            debug!("no local data for {database}.{rp}, nothing to delete");
            return Ok(());
        }
        fs::remove_dir_all(&path)
            .with_context(|| format!("deleting {}", path.display()))?;
        info!("deleted local data for {database}.{rp}");
        Ok(())
    }
}

impl Drop for ShardStore {
    fn drop(&mut self) {
        self.release_lock();
    }
}
