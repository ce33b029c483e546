pub mod erc20;
pub mod evm;
pub mod types;
pub mod units;

pub use ethers_core::types::{Address, Bytes, U256};
pub use evm::{is_address, normalize_address, parse_address, validate_address, EvmChain};
pub use types::*;
pub use units::{format_units, parse_transfer_amount, parse_units};
