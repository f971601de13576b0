//! Drop a retention policy from a stopped node.
//!
//! The sequence is strict: validate against metadata, delete the policy's
//! local shard data, then remove the policy record from metadata. Local
//! deletion goes first because it is the destructive step. If the run dies
//! between the two, metadata still lists the policy, so re-running the exact
//! same command passes validation, repeats the (now no-op) local delete and
//! retries the metadata removal. The reverse order would leave orphaned
//! shard data that no future validation could see.
//!
//! There are no internal retries; recovery is always re-invocation.

use log::info;

use crate::error::{Error, Result};
use crate::meta::MetaClient;
use crate::store::LocalStore;

/// The policy to drop, as named on the command line.
#[derive(Debug, Clone)]
pub struct DropRequest {
    pub database: String,
    pub rp: String,
}

/// Run the drop end to end. The store is opened only after validation
/// succeeds and is closed on every exit path past that point.
pub fn run<M, S>(meta: &mut M, store: &mut S, request: &DropRequest) -> Result<()>
where
    M: MetaClient,
    S: LocalStore,
{
    let db = meta
        .database(&request.database)
        .ok_or_else(|| Error::DatabaseNotFound(request.database.clone()))?;
    if db.retention_policy(&request.rp).is_none() {
        return Err(Error::RetentionPolicyNotFound(request.rp.clone()));
    }

    store.open().map_err(Error::EngineOpen)?;
    info!(
        "dropping retention policy {}.{}",
        request.database, request.rp
    );

    let deleted = store.delete_retention_policy(&request.database, &request.rp);
    store.close();
    deleted.map_err(Error::LocalDelete)?;

    meta.drop_retention_policy(&request.database, &request.rp)
        .map_err(Error::MetadataPropagation)?;

    info!("retention policy {}.{} dropped", request.database, request.rp);
    Ok(())
}
