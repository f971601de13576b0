//! Node metadata: databases and their retention policies.
//!
//! The node keeps a JSON snapshot of the cluster metadata it participates in.
//! The offline tools read that snapshot directly and write it back after a
//! mutation; replicating the change to the rest of the cluster is the running
//! server's job, not ours.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

const META_FILE: &str = "meta.json";

/// Snapshot of the metadata the node holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaData {
    pub databases: Vec<DatabaseInfo>,
}

/// A database record: a name and its retention policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub name: String,
    pub retention_policies: Vec<RetentionPolicyInfo>,
}

/// A retention policy record. The policy's shard data lives under the data
/// directory; this record only names and scopes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionPolicyInfo {
    pub name: String,

    /// How long data is kept, in seconds. Zero means keep forever.
    pub duration_secs: u64,

    /// Replication factor across the cluster.
    pub replica_n: u32,
}

impl MetaData {
    pub fn database(&self, name: &str) -> Option<&DatabaseInfo> {
        self.databases.iter().find(|db| db.name == name)
    }
}

impl DatabaseInfo {
    pub fn retention_policy(&self, name: &str) -> Option<&RetentionPolicyInfo> {
        self.retention_policies.iter().find(|rp| rp.name == name)
    }
}

/// Access to the node's metadata record of databases and retention policies.
///
/// `database` is a pure read; `drop_retention_policy` mutates and persists.
pub trait MetaClient {
    fn database(&self, name: &str) -> Option<DatabaseInfo>;

    fn drop_retention_policy(&mut self, database: &str, rp: &str) -> Result<()>;
}

/// Production [`MetaClient`] backed by the `meta.json` snapshot in the
/// node's metadata directory.
pub struct FileMetaClient {
    path: PathBuf,
    data: MetaData,
}

impl FileMetaClient {
    /// Load the metadata snapshot from `dir`. A node that owns data always
    /// has one, so a missing snapshot is an error rather than an empty view.
    pub fn open(dir: &Path) -> Result<FileMetaClient> {
        let path = dir.join(META_FILE);
        if !path.exists() {
            bail!("no metadata snapshot at {}", path.display());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let data: MetaData = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(FileMetaClient { path, data })
    }

    /// Write an initial snapshot into `dir`, creating the directory if
    /// needed. Used when provisioning a node and by tests.
    pub fn create(dir: &Path, data: MetaData) -> Result<FileMetaClient> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let mut client = FileMetaClient {
            path: dir.join(META_FILE),
            data,
        };
        client.persist()?;
        Ok(client)
    }

    pub fn snapshot(&self) -> &MetaData {
        &self.data
    }

    // Write-temp-then-rename so a crash mid-write never leaves a truncated
    // snapshot behind.
    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl MetaClient for FileMetaClient {
    fn database(&self, name: &str) -> Option<DatabaseInfo> {
        self.data.database(name).cloned()
    }

    fn drop_retention_policy(&mut self, database: &str, rp: &str) -> Result<()> {
        let db = match self.data.databases.iter_mut().find(|db| db.name == database) {
            Some(db) => db,
            None => bail!("database '{database}' not in metadata"),
        };
        let before = db.retention_policies.len();
        db.retention_policies.retain(|p| p.name != rp);
        if db.retention_policies.len() == before {
            bail!("retention policy '{rp}' not in metadata for database '{database}'");
        }
        self.persist()?;
        info!("dropped retention policy {database}.{rp} from metadata");
        Ok(())
    }
}
