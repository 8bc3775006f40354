use thiserror::Error;

pub type Result<T, E = PayoutError> = std::result::Result<T, E>;

/// Every way a payout, or the batch that carries it, can fail.
///
/// Validation variants (`InvalidAddress`, `InvalidAmount`, `BatchSize`) are
/// raised before any ledger call. `QueryUnavailable` is only ever produced by
/// the balance query and is swallowed by the balance guard rather than
/// surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoutError {
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("asset precision lookup failed: {0}")]
    PrecisionLookup(String),

    #[error("insufficient funds in payer account: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("account setup failed: {0}")]
    AccountSetup(String),

    #[error("settlement failed: {0}")]
    Settlement(String),

    #[error("balance query unavailable: {0}")]
    QueryUnavailable(String),

    #[error("batch size {given} outside allowed range 1..={max}")]
    BatchSize { given: usize, max: usize },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<csv::Error> for PayoutError {
    fn from(e: csv::Error) -> Self {
        PayoutError::Csv(e.to_string())
    }
}

impl From<std::io::Error> for PayoutError {
    fn from(e: std::io::Error) -> Self {
        PayoutError::Io(e.to_string())
    }
}
