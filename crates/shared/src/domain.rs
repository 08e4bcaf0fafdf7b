use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{amount::BASE_UNIT_DECIMALS, protocol::AssetEntry};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_newtype!(TokenAddress);

impl TokenAddress {
    /// Shortened form used when the address cannot be resolved to a known token.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return self.0.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Landing,
    Swap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: TokenAddress,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub icon_url: Option<String>,
}

impl Token {
    fn known(address: &str, symbol: &str, name: &str) -> Self {
        Self {
            address: TokenAddress::from(address),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: BASE_UNIT_DECIMALS,
            icon_url: None,
        }
    }

    /// Converts a remote asset-list entry, dropping entries without a contract or code.
    pub fn from_asset(entry: &AssetEntry) -> Option<Self> {
        let address = entry.contract.as_deref().map(str::trim).unwrap_or_default();
        let symbol = entry.code.as_deref().map(str::trim).unwrap_or_default();
        if address.is_empty() || symbol.is_empty() {
            return None;
        }

        let name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(symbol);

        Some(Self {
            address: TokenAddress::from(address),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: entry.decimals.unwrap_or(BASE_UNIT_DECIMALS),
            icon_url: entry.icon.clone().filter(|icon| !icon.trim().is_empty()),
        })
    }
}

/// Token set used whenever the remote asset list is unavailable or empty.
pub fn fallback_tokens() -> Vec<Token> {
    vec![
        Token::known(
            "CCW67TSZV3SSS2HXMBQ5JFGCKJNXKZM7UQUWUZPUTHXSTZLEO7SJMI75",
            "USDC",
            "USD Coin",
        ),
        Token::known(
            "CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA",
            "XLM",
            "Stellar Lumens",
        ),
        Token::known(
            "CDTKPWPLOURQA2SGTKTUQOWRCBZEORB4BWBOMJ3D3ZTQQSGE5F6JBQLV",
            "EURC",
            "Euro Coin",
        ),
    ]
}
