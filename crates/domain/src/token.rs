use serde::{Deserialize, Serialize};

/// Address of WETH on Base.
pub const WETH_ADDRESS: &str = "0x4200000000000000000000000000000000000006";
/// Address of CLAWD on Base.
pub const CLAWD_ADDRESS: &str = "0x9f86dB9fc6f7c9408e8Fda3Ff8ce4e78ac7a6b07";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}

impl Token {
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        name: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
            name: name.into(),
        }
    }

    /// Token0 of the pool.
    pub fn weth() -> Self {
        Self::new(WETH_ADDRESS, "WETH", 18, "Wrapped Ether")
    }

    /// Token1 of the pool.
    pub fn clawd() -> Self {
        Self::new(CLAWD_ADDRESS, "CLAWD", 18, "Clawd")
    }
}
