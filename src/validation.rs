//! Row and batch validation.
//!
//! Per-row checks mirror what the distributor contract will enforce:
//! a well-formed Starknet address and a non-negative decimal amount that
//! scales to the token's 18-decimal representation. Batch rules run first
//! where they make per-row validation moot (empty batch, equal-mode
//! homogeneity). Per-row validation never short-circuits: every failing
//! row is collected so the user can fix the whole file in one pass.

use crate::address::StarknetAddress;
use crate::error::{DistributionError, RowError};
use crate::types::{DistributionMode, DistributionRow};
use crate::utils;

pub const INVALID_ADDRESS_ERROR: &str = "Invalid Starknet address";
pub const INVALID_AMOUNT_ERROR: &str = "Invalid amount";

/// Outcome of validating a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<&'static str>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn invalid(message: &'static str) -> Self {
        Self {
            is_valid: false,
            error: Some(message),
        }
    }
}

pub fn is_valid_address(address: &str) -> bool {
    address.parse::<StarknetAddress>().is_ok()
}

pub fn is_valid_amount(amount: &str) -> bool {
    utils::parse_token_amount(amount).is_ok()
}

/// Validate one row. The address is checked before the amount; a row is
/// valid only when both checks pass.
pub fn validate_row(row: &DistributionRow) -> ValidationResult {
    if !is_valid_address(&row.address) {
        return ValidationResult::invalid(INVALID_ADDRESS_ERROR);
    }
    if !is_valid_amount(&row.amount) {
        return ValidationResult::invalid(INVALID_AMOUNT_ERROR);
    }
    ValidationResult::valid()
}

/// Run per-row validation over every row, collecting all failures with
/// 1-indexed row numbers.
pub fn validate_rows(rows: &[DistributionRow]) -> Vec<RowError> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            validate_row(row).error.map(|message| RowError {
                row: index + 1,
                message,
            })
        })
        .collect()
}

/// Validate a whole batch for submission in the given mode.
///
/// Equal mode requires every row to carry the identical amount string; that
/// rule is checked before per-row validation is even meaningful, and a
/// violation rejects the batch with a single error. Any per-row failure
/// aborts the whole submission: the valid subset is never submitted alone.
pub fn validate_batch(
    rows: &[DistributionRow],
    mode: DistributionMode,
) -> Result<(), DistributionError> {
    if rows.is_empty() {
        return Err(DistributionError::NoDistributions);
    }

    if mode == DistributionMode::Equal {
        let first_amount = &rows[0].amount;
        if rows.iter().any(|row| &row.amount != first_amount) {
            return Err(DistributionError::MixedAmountsForEqual);
        }
    }

    let errors = validate_rows(rows);
    if !errors.is_empty() {
        return Err(DistributionError::InvalidRows(errors));
    }

    Ok(())
}
