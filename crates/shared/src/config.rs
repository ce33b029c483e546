use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::tokens;

/// Sepolia, the network every configured token lives on
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub history: HistoryApiConfig,
    pub chain: ChainConfig,
    pub transfer: TransferConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Page size used by the history view (default: 10)
    pub page_limit: u32,
}

impl HistoryApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Network used when a wallet does not report one
    pub default_chain_id: u64,
    pub rpc_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferConfig {
    pub token_symbol: String,
    pub token_address: String,
    pub token_decimals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(crate::Error::Config(format!("Unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let token_symbol = var_or("TRANSFER_TOKEN_SYMBOL", tokens::TRANSFER_TOKEN_SYMBOL);
        let token_address = tokens::address_for_symbol(&token_symbol)
            .ok_or_else(|| {
                crate::Error::Config(format!("Unknown transfer token symbol: {}", token_symbol))
            })?
            .to_string();

        let rpc_url = lookup("EVM_RPC_URL").or_else(|| {
            lookup("ALCHEMY_API_KEY")
                .map(|key| format!("https://eth-sepolia.g.alchemy.com/v2/{}", key))
        });

        Ok(Config {
            history: HistoryApiConfig {
                base_url: var_or("HISTORY_API_BASE_URL", "http://localhost:3000/api")
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs: var_or("HISTORY_API_TIMEOUT_SECS", "30").parse()?,
                page_limit: var_or("HISTORY_PAGE_LIMIT", "10").parse()?,
            },
            chain: ChainConfig {
                default_chain_id: var_or("DEFAULT_CHAIN_ID", &SEPOLIA_CHAIN_ID.to_string())
                    .parse()?,
                rpc_url,
            },
            transfer: TransferConfig {
                token_symbol,
                token_address,
                token_decimals: tokens::TRANSFER_TOKEN_DECIMALS,
            },
            logging: LoggingConfig {
                level: var_or("LOG_LEVEL", "info"),
                format: var_or("LOG_FORMAT", "json").parse()?,
            },
        })
    }
}
