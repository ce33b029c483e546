use ethers_core::types::Address;
use ethers_core::utils::to_checksum;
use shared::{Error, Result};

/// EVM networks the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvmChain {
    Ethereum,
    Sepolia,
}

impl EvmChain {
    pub fn name(&self) -> &'static str {
        match self {
            EvmChain::Ethereum => "Ethereum",
            EvmChain::Sepolia => "Sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            EvmChain::Ethereum => 1,
            EvmChain::Sepolia => 11_155_111,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(EvmChain::Ethereum),
            11_155_111 => Some(EvmChain::Sepolia),
            _ => None,
        }
    }

    /// Human-readable name for any chain id, known or not
    pub fn describe(chain_id: u64) -> String {
        match Self::from_chain_id(chain_id) {
            Some(chain) => chain.name().to_string(),
            None => format!("chain {}", chain_id),
        }
    }
}

/// Validate an EVM account address (0x + 40 hex chars).
///
/// All-lowercase and all-uppercase bodies carry no checksum and are accepted
/// as-is; mixed case must match EIP-55.
pub fn validate_address(address: &str) -> Result<Address> {
    let body = address
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidRecipient("Address must start with 0x".to_string()))?;

    if body.len() != 40 {
        return Err(Error::InvalidRecipient(
            "Address must be 42 characters (0x + 40 hex)".to_string(),
        ));
    }

    if !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidRecipient(
            "Address must contain only hexadecimal characters".to_string(),
        ));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(body, &mut bytes)
        .map_err(|e| Error::InvalidRecipient(format!("Address is not valid hex: {}", e)))?;
    let parsed = Address::from(bytes);

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&parsed, None) != address {
        return Err(Error::InvalidRecipient(
            "Address checksum does not match".to_string(),
        ));
    }

    Ok(parsed)
}

/// Whether `address` would pass [`validate_address`]
pub fn is_address(address: &str) -> bool {
    validate_address(address).is_ok()
}

/// Parse an address from configuration, where a bad value is a setup mistake
pub fn parse_address(address: &str) -> Result<Address> {
    validate_address(address)
        .map_err(|e| Error::Config(format!("Invalid address {}: {}", address, e)))
}

/// Lowercase `0x`-prefixed form used when comparing addresses
pub fn normalize_address(address: &Address) -> String {
    format!("{:?}", address)
}
