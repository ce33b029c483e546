//! Static token table for the Sepolia deployment.

/// Decimals of the transfer target token
pub const TRANSFER_TOKEN_DECIMALS: u32 = 18;

/// Symbol of the token the transfer form sends
pub const TRANSFER_TOKEN_SYMBOL: &str = "CW-ERC20";

/// Known tokens, in display order
pub const TOKEN_ADDRESSES: &[(&str, &str)] = &[
    ("USDC", "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
    ("EURC", "0x08210F9170F89Ab7658F0B5E3fF39b0E03C594D4"),
    ("CW-ERC20", "0xc2c9a6d4c2699349f69de33df8ed8a90db908944"),
];

/// Contract address for a symbol (exact match)
pub fn address_for_symbol(symbol: &str) -> Option<&'static str> {
    TOKEN_ADDRESSES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, address)| *address)
}

/// Symbol for a contract address, ignoring case
pub fn symbol_for_address(address: &str) -> Option<&'static str> {
    TOKEN_ADDRESSES
        .iter()
        .find(|(_, a)| a.eq_ignore_ascii_case(address))
        .map(|(symbol, _)| *symbol)
}

pub fn available_symbols() -> impl Iterator<Item = &'static str> {
    TOKEN_ADDRESSES.iter().map(|(symbol, _)| *symbol)
}

/// Symbol the history view starts on
pub fn default_history_symbol() -> &'static str {
    available_symbols().next().unwrap_or("USDC")
}
