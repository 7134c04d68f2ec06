//! Error taxonomy for the distribution workflow.
//! Everything here is caught at the submission boundary and surfaced to the
//! user; nothing propagates to a panic.

use thiserror::Error;

/// A validation failure pinned to a specific row (1-indexed for display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: &'static str,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

fn join_row_errors(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(RowError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("No distributions added")]
    NoDistributions,

    #[error("All distributions must have the same amount for equal distribution")]
    MixedAmountsForEqual,

    #[error("Invalid distributions: {}", join_row_errors(.0))]
    InvalidRows(Vec<RowError>),

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// Unreachable after validation, kept as a guard for the encoder.
    #[error("failed to encode distribution calldata: {0}")]
    Encoding(String),

    #[error("wallet rejected the request: {0}")]
    WalletRejected(String),

    #[error("chain request failed: {0}")]
    Chain(String),

    #[error("timed out waiting for receipt of {tx_hash} after {timeout_secs}s")]
    ReceiptTimeout { tx_hash: String, timeout_secs: u64 },
}
