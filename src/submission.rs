//! Distribution submission and receipt tracking.
//!
//! The wallet is an injected capability: the orchestrator never touches
//! keys or transports, it hands encoded calls to a `WalletSession` and
//! polls it for finality. Two call paths exist - the batched
//! approval + distribution multi-call, and a per-row transfer mode that
//! sends one plain token transfer per recipient and tolerates partial
//! failure.

use crate::config::Config;
use crate::distribute::{self, Call};
use crate::error::DistributionError;
use crate::form::{DistributionForm, SubmissionState};
use crate::operation_log;
use crate::types::{DistributionMode, DistributionRow};
use crate::validation;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Terminal status the chain reports for a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    Succeeded,
    Reverted(String),
}

/// Capability exposed by a connected wallet. `execute` submits a batch of
/// calls as one atomic multi-call and returns the transaction hash;
/// `get_receipt` returns `None` while the transaction is not yet settled.
#[allow(async_fn_in_trait)]
pub trait WalletSession {
    fn is_connected(&self) -> bool;
    async fn execute(&self, calls: &[Call]) -> Result<String>;
    async fn get_receipt(&self, tx_hash: &str) -> Result<Option<ReceiptStatus>>;
}

/// Timing knobs for submission.
#[derive(Clone, Debug)]
pub struct SubmissionConfig {
    /// How often to ask for a receipt while a transaction is pending.
    pub poll_interval_ms: u64,
    /// Give up waiting for a receipt after this long. The source this tool
    /// replaces polled forever; a bounded wait keeps a stuck transaction
    /// from wedging the caller, and raising the value restores parity.
    pub receipt_timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000, // 3 seconds between receipt checks
            receipt_timeout_secs: 300,
        }
    }
}

/// Result of a batched submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { tx_hash: String },
    Reverted { tx_hash: String, reason: String },
}

/// Outcome of one row in the per-row transfer mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success { tx_hash: String },
    Reverted { tx_hash: String, reason: String },
    Failed { error: String },
}

/// Tally of a per-row transfer run.
#[derive(Debug, Clone, Default)]
pub struct TransferRunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<TransferOutcome>,
}

impl TransferRunSummary {
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Success: {} | Failed: {}",
            self.total, self.succeeded, self.failed
        )
    }
}

/// Submit the whole batch as one approval + distribution multi-call and
/// wait for its receipt.
///
/// Fails fast when the wallet is disconnected. A second call while one is
/// in flight trips the form's busy flag and does nothing. On success the
/// row list is cleared and the run is recorded in the operation log; on
/// revert or failure the rows stay intact so the user can retry.
pub async fn submit_distribution<W: WalletSession>(
    wallet: &W,
    form: &DistributionForm,
    settings: &SubmissionConfig,
    config: &Config,
) -> Result<SubmissionOutcome, DistributionError> {
    if !wallet.is_connected() {
        return Err(DistributionError::WalletNotConnected);
    }
    if !form.begin_submission().await {
        return Err(DistributionError::SubmissionInProgress);
    }

    let result = run_batched(wallet, form, settings, config).await;
    form.end_submission().await;
    result
}

async fn run_batched<W: WalletSession>(
    wallet: &W,
    form: &DistributionForm,
    settings: &SubmissionConfig,
    config: &Config,
) -> Result<SubmissionOutcome, DistributionError> {
    let rows = form.rows().await;
    let mode = form.mode().await;

    validation::validate_batch(&rows, mode)?;
    let calls = distribute::build_distribution_calls(&rows, mode)?;

    form.set_state(SubmissionState::Submitting).await;
    info!(
        "Submitting {} distribution to {} recipients",
        mode.label(),
        rows.len()
    );

    let tx_hash = wallet
        .execute(&calls)
        .await
        .map_err(classify_execute_error)?;
    form.set_state(SubmissionState::Pending {
        tx_hash: tx_hash.clone(),
    })
    .await;
    info!("Distribution submitted: {}", tx_hash);

    match wait_for_receipt(wallet, &tx_hash, settings).await? {
        ReceiptStatus::Succeeded => {
            info!(
                "Successfully distributed tokens to {} addresses",
                rows.len()
            );
            record_run(config, mode, &rows, &tx_hash);
            form.clear_rows().await;
            Ok(SubmissionOutcome::Success { tx_hash })
        }
        ReceiptStatus::Reverted(reason) => {
            // Rows are left in place for a retry.
            warn!("Distribution {} reverted: {}", tx_hash, reason);
            Ok(SubmissionOutcome::Reverted { tx_hash, reason })
        }
    }
}

/// Send one plain transfer per row, strictly in sequence, continuing past
/// failures. The row list is cleared only when every row succeeded (and at
/// least one did).
pub async fn submit_individual_transfers<W: WalletSession>(
    wallet: &W,
    form: &DistributionForm,
    settings: &SubmissionConfig,
    config: &Config,
) -> Result<TransferRunSummary, DistributionError> {
    if !wallet.is_connected() {
        return Err(DistributionError::WalletNotConnected);
    }
    if !form.begin_submission().await {
        return Err(DistributionError::SubmissionInProgress);
    }

    let result = run_individual(wallet, form, settings, config).await;
    form.end_submission().await;
    result
}

async fn run_individual<W: WalletSession>(
    wallet: &W,
    form: &DistributionForm,
    settings: &SubmissionConfig,
    config: &Config,
) -> Result<TransferRunSummary, DistributionError> {
    let rows = form.rows().await;
    if rows.is_empty() {
        return Err(DistributionError::NoDistributions);
    }
    let row_errors = validation::validate_rows(&rows);
    if !row_errors.is_empty() {
        return Err(DistributionError::InvalidRows(row_errors));
    }

    form.set_state(SubmissionState::Submitting).await;
    let total = rows.len();
    let mut summary = TransferRunSummary {
        total,
        ..Default::default()
    };

    for (index, row) in rows.iter().enumerate() {
        let outcome = send_single_transfer(wallet, row, settings).await;
        match &outcome {
            TransferOutcome::Success { tx_hash } => {
                summary.succeeded += 1;
                info!("Transfer {}/{} succeeded: {}", index + 1, total, tx_hash);
            }
            TransferOutcome::Reverted { tx_hash, reason } => {
                summary.failed += 1;
                warn!(
                    "Transfer {}/{} reverted ({}): {}",
                    index + 1,
                    total,
                    tx_hash,
                    reason
                );
            }
            TransferOutcome::Failed { error } => {
                summary.failed += 1;
                warn!("Transfer {}/{} failed: {}", index + 1, total, error);
            }
        }
        summary.outcomes.push(outcome);
    }

    info!("Transfer run complete: {}", summary.summary());
    if summary.failed == 0 && summary.succeeded > 0 {
        record_transfer_run(config, &rows, &summary);
        form.clear_rows().await;
    }

    Ok(summary)
}

async fn send_single_transfer<W: WalletSession>(
    wallet: &W,
    row: &DistributionRow,
    settings: &SubmissionConfig,
) -> TransferOutcome {
    let call = match distribute::build_transfer_call(row) {
        Ok(call) => call,
        Err(e) => {
            return TransferOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let tx_hash = match wallet.execute(std::slice::from_ref(&call)).await {
        Ok(hash) => hash,
        Err(e) => {
            return TransferOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    match wait_for_receipt(wallet, &tx_hash, settings).await {
        Ok(ReceiptStatus::Succeeded) => TransferOutcome::Success { tx_hash },
        Ok(ReceiptStatus::Reverted(reason)) => TransferOutcome::Reverted { tx_hash, reason },
        Err(e) => TransferOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Poll for a receipt until one appears or the timeout elapses. Transient
/// receipt-query failures are ignored and polling continues.
async fn wait_for_receipt<W: WalletSession>(
    wallet: &W,
    tx_hash: &str,
    settings: &SubmissionConfig,
) -> Result<ReceiptStatus, DistributionError> {
    let interval_ms = settings.poll_interval_ms.max(1);
    let max_attempts = (settings.receipt_timeout_secs * 1000 / interval_ms).max(1);

    let mut attempts = 0;
    loop {
        if let Ok(Some(status)) = wallet.get_receipt(tx_hash).await {
            return Ok(status);
        }

        attempts += 1;
        if attempts >= max_attempts {
            return Err(DistributionError::ReceiptTimeout {
                tx_hash: tx_hash.to_string(),
                timeout_secs: settings.receipt_timeout_secs,
            });
        }
        sleep(Duration::from_millis(interval_ms)).await;
    }
}

/// Map a wallet `execute` failure into the error taxonomy: messages that
/// look like a user rejection become wallet errors, everything else is a
/// chain error. The underlying message is preserved verbatim.
fn classify_execute_error(e: anyhow::Error) -> DistributionError {
    let message = e.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("reject") || lowered.contains("denied") {
        DistributionError::WalletRejected(message)
    } else {
        DistributionError::Chain(message)
    }
}

fn record_run(config: &Config, mode: DistributionMode, rows: &[DistributionRow], tx_hash: &str) {
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{}. {} -> {} tokens", i + 1, row.address, row.amount))
        .collect::<Vec<_>>()
        .join("\n");
    let explorer = config
        .tx_explorer_url(tx_hash)
        .map(|url| format!("\nExplorer: {}", url))
        .unwrap_or_default();

    if let Err(e) = operation_log::append_log(
        "Token Distribution",
        config.network_label(),
        format!(
            "Distribution executed ({})\nRecipients: {}\n{}\nTx hash: {}{}",
            mode.label(),
            rows.len(),
            lines,
            tx_hash,
            explorer
        ),
    ) {
        warn!("Failed to write operation log: {}", e);
    }
}

fn record_transfer_run(config: &Config, rows: &[DistributionRow], summary: &TransferRunSummary) {
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{}. {} -> {} tokens", i + 1, row.address, row.amount))
        .collect::<Vec<_>>()
        .join("\n");

    if let Err(e) = operation_log::append_log(
        "Individual Transfers",
        config.network_label(),
        format!("{}\n{}", summary.summary(), lines),
    ) {
        warn!("Failed to write operation log: {}", e);
    }
}
