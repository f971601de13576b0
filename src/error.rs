use thiserror::Error;

/// Failures a maintenance run can surface, one variant per step so the
/// operator can tell from the message how far the run got.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0:#}")]
    Config(anyhow::Error),

    #[error("database '{0}' does not exist")]
    DatabaseNotFound(String),

    #[error("retention policy '{0}' does not exist")]
    RetentionPolicyNotFound(String),

    #[error("cannot open storage engine: {0:#}")]
    EngineOpen(anyhow::Error),

    #[error("cannot delete local data: {0:#}")]
    LocalDelete(anyhow::Error),

    #[error("local data removed, but dropping the policy from metadata failed: {0:#}")]
    MetadataPropagation(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
