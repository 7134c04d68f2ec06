use anyhow::{anyhow, Result};
use ethers::types::U256;
use ethers::utils::{format_units, parse_units, ParseUnits};

/// Decimals of the distributed token's fixed-point representation.
pub const TOKEN_DECIMALS: u32 = 18;

/// Parse a human-unit decimal string into the token's 18-decimal integer
/// representation.
///
/// String parsing is used throughout instead of f64 to avoid float
/// precision loss on user input.
///
/// # Errors
/// Returns an error if the string is empty, not a valid decimal number,
/// negative, or carries more fractional digits than the token supports.
pub fn parse_token_amount(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("token amount cannot be empty"));
    }

    match parse_units(trimmed, TOKEN_DECIMALS) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(anyhow!("token amount cannot be negative: {}", trimmed)),
        Err(e) => Err(anyhow!("Invalid token amount '{}': {}", trimmed, e)),
    }
}

/// Format an 18-decimal integer quantity back into human units.
pub fn format_token_amount(value: U256) -> String {
    format_units(value, TOKEN_DECIMALS).unwrap_or_else(|_| "0.0".to_string())
}

/// Split a 256-bit quantity into (low, high) 128-bit limbs.
///
/// Starknet's native word is a felt, so u256 values cross the call boundary
/// as two limbs with `value == high * 2^128 + low`.
pub fn split_u256(value: U256) -> (u128, u128) {
    let low = value.low_u128();
    let high = (value >> 128).low_u128();
    (low, high)
}

/// Reassemble a 256-bit quantity from its (low, high) limbs.
pub fn combine_u256(low: u128, high: u128) -> U256 {
    (U256::from(high) << 128) | U256::from(low)
}
