use ethers_core::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::erc20;

/// An ERC20 `transfer` call against a token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCall {
    pub token: Address,
    pub recipient: Address,
    /// Amount in the token's smallest unit
    pub amount: U256,
}

impl TransferCall {
    pub fn new(token: Address, recipient: Address, amount: U256) -> Self {
        Self {
            token,
            recipient,
            amount,
        }
    }

    pub fn calldata(&self) -> Bytes {
        erc20::encode_transfer(self.recipient, self.amount)
    }
}

/// A transfer that passed read-only simulation and is ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTransfer {
    pub account: Address,
    pub call: TransferCall,
    pub chain_id: u64,
    pub gas: Option<U256>,
}

/// Raw transaction handed to an embedded wallet's signing client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedTransaction {
    pub to: Address,
    pub data: Bytes,
    pub chain_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub status: ReceiptStatus,
    pub block_number: Option<u64>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}
