//! Common types shared across modules.

use serde::{Deserialize, Serialize};

/// A single distribution entry as entered by the user or imported from CSV.
///
/// Both fields are kept as raw strings until validation: `address` is an
/// opaque Starknet address string, `amount` a decimal quantity in human
/// units (not yet scaled to the token's 18 decimals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub address: String,
    pub amount: String,
}

impl DistributionRow {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
        }
    }

    /// Blank row for manual entry in a form.
    pub fn empty() -> Self {
        Self {
            address: String::new(),
            amount: String::new(),
        }
    }
}

/// How the batch total is spread across recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionMode {
    /// Every row carries the same amount; the contract fans it out.
    Equal,
    /// Each row carries its own amount.
    Weighted,
}

impl DistributionMode {
    pub fn label(&self) -> &'static str {
        match self {
            DistributionMode::Equal => "Equal",
            DistributionMode::Weighted => "Weighted",
        }
    }
}

impl Default for DistributionMode {
    fn default() -> Self {
        DistributionMode::Equal
    }
}

/// Which field of a row a manual edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Address,
    Amount,
}
