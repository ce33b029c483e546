use std::fmt;
use thiserror::Error;

/// Fallback message when a signing backend fails without describing why
pub const GENERIC_BACKEND_FAILURE: &str = "Transaction failed due to an unexpected error.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Please connect a wallet to proceed.")]
    NoWalletConnected,

    #[error("Transaction simulation failed. Check token balance and network.")]
    SimulationUnavailable,

    #[error("Embedded wallet client not available.")]
    ClientUnavailable,

    #[error("{0}")]
    BackendRejected(String),

    #[error("Wallet connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("History API error: {0}")]
    HistoryApi(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a wallet SDK.
///
/// SDKs tend to carry a terse `short_message` alongside the full `message`;
/// the short one is preferred for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendError {
    pub short_message: Option<String>,
    pub message: Option<String>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            short_message: None,
            message: Some(message.into()),
        }
    }

    pub fn with_short_message(mut self, short_message: impl Into<String>) -> Self {
        self.short_message = Some(short_message.into());
        self
    }

    /// Best available human-readable message
    pub fn display_message(&self) -> &str {
        self.short_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.message.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or(GENERIC_BACKEND_FAILURE)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_message())
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Error::BackendRejected(err.display_message().to_string())
    }
}
