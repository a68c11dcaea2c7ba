use shop_registry::RegistryError;

/// Fatal errors of a simulation run.
///
/// Protocol violations never show up here; they are complaints in the report.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Report encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
