//! Token whitelist and canonical address table for restricted mode.
//!
//! The deployed automation contract only understands four assets, each
//! pinned to one address. Anything outside this table is an unsupported
//! request, and an address the model invents for an in-table asset is
//! replaced by the canonical value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The native-asset placeholder address (`address(0)`).
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// An asset the restricted automation contract accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllowedAsset {
    Eth,
    Dai,
    Link,
    Usdc,
}

impl AllowedAsset {
    pub const ALL: [AllowedAsset; 4] = [
        AllowedAsset::Eth,
        AllowedAsset::Dai,
        AllowedAsset::Link,
        AllowedAsset::Usdc,
    ];

    /// Parse a token symbol, case-insensitively. Returns `None` for
    /// anything outside the whitelist.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim().to_uppercase().as_str() {
            "ETH" => Some(Self::Eth),
            "DAI" => Some(Self::Dai),
            "LINK" => Some(Self::Link),
            "USDC" => Some(Self::Usdc),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Dai => "DAI",
            Self::Link => "LINK",
            Self::Usdc => "USDC",
        }
    }

    /// The canonical on-chain address for this asset. ETH maps to the
    /// zero address; the ERC-20s map to their deployed token contracts.
    pub const fn address(&self) -> &'static str {
        match self {
            Self::Eth => ZERO_ADDRESS,
            Self::Dai => "0x3e622317f8C93f7328350cF0B56d9eD4C620C5d6",
            Self::Link => "0x779877A7B0D9E8603169DdbD7836e478b4624789",
            Self::Usdc => "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238",
        }
    }

    /// The whitelist as a display string for user-facing messages.
    pub fn whitelist() -> String {
        Self::ALL
            .iter()
            .map(|a| a.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AllowedAsset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(AllowedAsset::parse("eth"), Some(AllowedAsset::Eth));
        assert_eq!(AllowedAsset::parse(" Usdc "), Some(AllowedAsset::Usdc));
    }

    #[test]
    fn parse_rejects_outside_whitelist() {
        assert_eq!(AllowedAsset::parse("DOGE"), None);
        assert_eq!(AllowedAsset::parse(""), None);
    }

    #[test]
    fn eth_maps_to_zero_address() {
        assert_eq!(AllowedAsset::Eth.address(), ZERO_ADDRESS);
    }

    #[test]
    fn every_asset_has_a_distinct_address() {
        let mut addresses: Vec<&str> = AllowedAsset::ALL.iter().map(|a| a.address()).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), AllowedAsset::ALL.len());
    }

    #[test]
    fn serde_uses_uppercase_symbols() {
        let json = serde_json::to_string(&AllowedAsset::Link).unwrap();
        assert_eq!(json, "\"LINK\"");
        let back: AllowedAsset = serde_json::from_str("\"DAI\"").unwrap();
        assert_eq!(back, AllowedAsset::Dai);
    }
}
