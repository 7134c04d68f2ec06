//! Distribution call construction for the Fundable distributor contract.
//!
//! A submission is always a two-call batch: an `approve` on the token
//! granting the distributor a spending allowance, followed by the
//! distribution entrypoint itself. Both calls go to the wallet together as
//! one atomic multi-call, approval first, since the distribution pulls
//! against the allowance.

use crate::address::StarknetAddress;
use crate::error::DistributionError;
use crate::types::{DistributionMode, DistributionRow};
use crate::utils;
use ethers::types::U256;
use serde::Serialize;
use std::sync::OnceLock;

/// The Fundable distributor contract (Starknet Sepolia deployment).
pub const DISTRIBUTOR_CONTRACT_ADDRESS: &str =
    "0x288a25635f7c57607b4e017a3439f9018441945246fb5ca3424d8148dd580cc";

/// The token handed out by the distributor.
pub const TOKEN_ADDRESS: &str =
    "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d";

pub const APPROVE_ENTRYPOINT: &str = "approve";
pub const DISTRIBUTE_ENTRYPOINT: &str = "distribute";
pub const DISTRIBUTE_WEIGHTED_ENTRYPOINT: &str = "distribute_weighted";
pub const TRANSFER_ENTRYPOINT: &str = "transfer";

static DISTRIBUTOR_ADDRESS_PARSED: OnceLock<StarknetAddress> = OnceLock::new();
static TOKEN_ADDRESS_PARSED: OnceLock<StarknetAddress> = OnceLock::new();

/// Get the parsed distributor address, parsing it once and caching
fn distributor_address() -> &'static StarknetAddress {
    DISTRIBUTOR_ADDRESS_PARSED.get_or_init(|| {
        DISTRIBUTOR_CONTRACT_ADDRESS
            .parse()
            .expect("DISTRIBUTOR_CONTRACT_ADDRESS constant is invalid - this is a programming error")
    })
}

/// Get the parsed token address, parsing it once and caching
fn token_address() -> &'static StarknetAddress {
    TOKEN_ADDRESS_PARSED.get_or_init(|| {
        TOKEN_ADDRESS
            .parse()
            .expect("TOKEN_ADDRESS constant is invalid - this is a programming error")
    })
}

/// One contract invocation as handed to the wallet: target contract,
/// entrypoint name, and calldata as stringified felts (numeric elements
/// decimal, addresses padded hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub contract_address: String,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

fn scale_amount(raw: &str) -> Result<U256, DistributionError> {
    utils::parse_token_amount(raw)
        .map_err(|e| DistributionError::Encoding(format!("amount '{}': {}", raw, e)))
}

fn parse_recipient(raw: &str) -> Result<StarknetAddress, DistributionError> {
    raw.parse()
        .map_err(|e| DistributionError::Encoding(format!("address '{}': {}", raw, e)))
}

/// Approval granting the distributor an allowance of `total` on the token.
fn approval_call(total: U256) -> Call {
    let (low, high) = utils::split_u256(total);
    Call {
        contract_address: token_address().to_hex(),
        entrypoint: APPROVE_ENTRYPOINT.to_string(),
        calldata: vec![
            distributor_address().to_hex(),
            low.to_string(),
            high.to_string(),
        ],
    }
}

/// Build the approval + distribution call pair for a validated batch.
///
/// Equal mode transfers the single shared amount in total (the contract
/// fans it out to every recipient); weighted mode transfers the sum of the
/// per-row amounts, computed in the full 256-bit domain. Inputs are
/// expected to be validated already; failures here are defensive.
pub fn build_distribution_calls(
    rows: &[DistributionRow],
    mode: DistributionMode,
) -> Result<Vec<Call>, DistributionError> {
    if rows.is_empty() {
        return Err(DistributionError::NoDistributions);
    }

    let recipients = rows
        .iter()
        .map(|row| parse_recipient(&row.address).map(|a| a.to_hex()))
        .collect::<Result<Vec<_>, _>>()?;

    match mode {
        DistributionMode::Equal => {
            let amount = scale_amount(&rows[0].amount)?;
            let (low, high) = utils::split_u256(amount);

            let mut calldata = vec![
                low.to_string(),
                high.to_string(),
                recipients.len().to_string(),
            ];
            calldata.extend(recipients);
            calldata.push(token_address().to_hex());

            Ok(vec![
                approval_call(amount),
                Call {
                    contract_address: distributor_address().to_hex(),
                    entrypoint: DISTRIBUTE_ENTRYPOINT.to_string(),
                    calldata,
                },
            ])
        }
        DistributionMode::Weighted => {
            let amounts = rows
                .iter()
                .map(|row| scale_amount(&row.amount))
                .collect::<Result<Vec<_>, _>>()?;

            let mut total = U256::zero();
            for amount in &amounts {
                total = total.checked_add(*amount).ok_or_else(|| {
                    DistributionError::Encoding("total amount overflows 256 bits".to_string())
                })?;
            }
            let (low, high) = utils::split_u256(total);

            let mut calldata = vec![
                low.to_string(),
                high.to_string(),
                amounts.len().to_string(),
            ];
            calldata.extend(amounts.iter().map(|a| a.to_string()));
            calldata.push(recipients.len().to_string());
            calldata.extend(recipients);
            calldata.push(token_address().to_hex());

            Ok(vec![
                approval_call(total),
                Call {
                    contract_address: distributor_address().to_hex(),
                    entrypoint: DISTRIBUTE_WEIGHTED_ENTRYPOINT.to_string(),
                    calldata,
                },
            ])
        }
    }
}

/// Build a plain ERC-20 `transfer` for one row. Used by the per-row
/// submission path, which bypasses the distributor contract entirely.
pub fn build_transfer_call(row: &DistributionRow) -> Result<Call, DistributionError> {
    let recipient = parse_recipient(&row.address)?;
    let amount = scale_amount(&row.amount)?;
    let (low, high) = utils::split_u256(amount);

    Ok(Call {
        contract_address: token_address().to_hex(),
        entrypoint: TRANSFER_ENTRYPOINT.to_string(),
        calldata: vec![recipient.to_hex(), low.to_string(), high.to_string()],
    })
}
