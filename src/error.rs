use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Payment task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Payment was not processed")]
    Interrupted,
}

impl PaymentError {
    /// Transient failures a caller may retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::UpstreamUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
