//! Starknet address parsing and normalization.
//!
//! Addresses are felts bounded by `2^251 - 256`; user input arrives as hex
//! (with or without the `0x` prefix's case normalized) or decimal strings
//! and is rendered in the canonical zero-padded 64-hex-digit form used in
//! calldata.

use anyhow::{anyhow, bail, Result};
use ethers::types::U256;
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) for a Starknet contract address.
fn address_bound() -> U256 {
    (U256::one() << 251) - U256::from(256u64)
}

/// A parsed, range-checked Starknet address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarknetAddress(U256);

impl StarknetAddress {
    /// Raw felt value of the address.
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Canonical zero-padded hex form, e.g. `0x00…0a`.
    pub fn to_hex(&self) -> String {
        format!("0x{:0>64}", format!("{:x}", self.0))
    }
}

impl FromStr for StarknetAddress {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            bail!("address cannot be empty");
        }

        let value = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            if hex.is_empty() || hex.len() > 64 {
                bail!("invalid hex address: {}", trimmed);
            }
            U256::from_str_radix(hex, 16)
                .map_err(|_| anyhow!("invalid hex address: {}", trimmed))?
        } else {
            U256::from_dec_str(trimmed)
                .map_err(|_| anyhow!("invalid decimal address: {}", trimmed))?
        };

        if value >= address_bound() {
            bail!("address out of range: {}", trimmed);
        }

        Ok(StarknetAddress(value))
    }
}

impl fmt::Display for StarknetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parsing tests ====================

    #[test]
    fn test_parse_short_hex_pads_to_64_digits() {
        let addr: StarknetAddress = "0xA".parse().unwrap();
        assert_eq!(
            addr.to_hex(),
            "0x000000000000000000000000000000000000000000000000000000000000000a"
        );
    }

    #[test]
    fn test_parse_full_length_address_round_trips() {
        let input = "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d";
        let addr: StarknetAddress = input.parse().unwrap();
        assert_eq!(addr.to_hex(), input);
    }

    #[test]
    fn test_parse_uppercase_prefix_and_whitespace() {
        let addr: StarknetAddress = "  0X1b  ".parse().unwrap();
        assert_eq!(addr.value(), U256::from(0x1bu64));
    }

    #[test]
    fn test_parse_decimal_input() {
        let addr: StarknetAddress = "10".parse().unwrap();
        assert_eq!(addr.value(), U256::from(10u64));
    }

    #[test]
    fn test_parse_zero_is_accepted() {
        assert!("0x0".parse::<StarknetAddress>().is_ok());
        assert!("0".parse::<StarknetAddress>().is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<StarknetAddress>().is_err());
        assert!("0x".parse::<StarknetAddress>().is_err());
        assert!("0xgg".parse::<StarknetAddress>().is_err());
        assert!("not-an-address".parse::<StarknetAddress>().is_err());
    }

    #[test]
    fn test_parse_rejects_overlong_hex() {
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(too_long.parse::<StarknetAddress>().is_err());
    }

    // ==================== range tests ====================

    #[test]
    fn test_parse_enforces_address_bound() {
        let bound = address_bound();
        let max_valid = bound - U256::from(1u64);

        let at_bound = format!("0x{:x}", bound);
        assert!(at_bound.parse::<StarknetAddress>().is_err());

        let below_bound = format!("0x{:x}", max_valid);
        let addr: StarknetAddress = below_bound.parse().unwrap();
        assert_eq!(addr.value(), max_valid);
    }

    #[test]
    fn test_display_matches_to_hex() {
        let addr: StarknetAddress = "0xff".parse().unwrap();
        assert_eq!(addr.to_string(), addr.to_hex());
    }
}
