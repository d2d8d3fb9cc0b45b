use shared::protocol::CatalogOperation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: CatalogOperation,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} request returned status {status}")]
    Status {
        operation: CatalogOperation,
        status: u16,
    },
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: CatalogOperation,
        #[source]
        source: reqwest::Error,
    },
}

impl CatalogError {
    pub fn operation(&self) -> Option<CatalogOperation> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
        }
    }

    /// Transport and status failures collapse into one generic message per operation.
    pub fn user_message(&self) -> String {
        match self.operation() {
            Some(operation) => operation.failure_message().to_string(),
            None => "Catalog API URL is not configured correctly.".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
