use ethers_core::abi::{encode, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::keccak256;

/// Canonical signature of the ERC20 `transfer` function
pub const TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";

/// First four bytes of the keccak hash of a function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// ABI-encode `transfer(to, value)`
pub fn encode_transfer(to: Address, value: U256) -> Bytes {
    let args = encode(&[Token::Address(to), Token::Uint(value)]);

    let mut data = Vec::with_capacity(4 + args.len());
    data.extend_from_slice(&selector(TRANSFER_SIGNATURE));
    data.extend_from_slice(&args);
    Bytes::from(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_selector() {
        assert_eq!(hex::encode(selector(TRANSFER_SIGNATURE)), "a9059cbb");
    }

    #[test]
    fn test_encode_transfer_layout() {
        let to: Address = "0xbbbb000000000000000000000000000000002222".parse().unwrap();
        let data = encode_transfer(to, U256::from(1000u64));

        assert_eq!(data.len(), 68);
        assert_eq!(
            hex::encode(&data),
            concat!(
                "a9059cbb",
                "000000000000000000000000bbbb000000000000000000000000000000002222",
                "00000000000000000000000000000000000000000000000000000000000003e8",
            )
        );
    }
}
