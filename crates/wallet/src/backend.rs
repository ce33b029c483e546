//! Seams to the two wallet SDKs.
//!
//! Both SDKs own their transport and signing; the core only sees the
//! operations below.

use async_trait::async_trait;
use blockchain::{Address, EmbeddedTransaction, PreparedTransfer, TransactionReceipt, TransferCall};
use shared::BackendError;
use std::sync::Arc;

use crate::connection::WalletConnection;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// A connector the extension SDK offers (injected provider, MetaMask, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorInfo {
    pub id: String,
    pub name: String,
}

impl ConnectorInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Browser-extension style wallet connection
#[async_trait]
pub trait ExtensionConnector: Send + Sync {
    async fn connect(&self, connector_id: &str) -> BackendResult<WalletConnection>;

    async fn disconnect(&self) -> BackendResult<()>;

    /// Read-only dry run of a transfer; yields a request ready to send
    async fn simulate_transfer(
        &self,
        account: Address,
        call: &TransferCall,
    ) -> BackendResult<PreparedTransfer>;

    /// Send a simulated transfer, returning the transaction hash
    async fn write_contract(&self, prepared: &PreparedTransfer) -> BackendResult<String>;

    async fn wait_for_receipt(&self, transaction_hash: &str) -> BackendResult<TransactionReceipt>;
}

/// Signing client exposed by an embedded wallet
#[async_trait]
pub trait SigningClient: Send + Sync {
    async fn send_transaction(&self, transaction: EmbeddedTransaction) -> BackendResult<String>;
}

pub trait EmbeddedWalletHandle: Send + Sync {
    fn address(&self) -> &str;

    /// Network the wallet is currently on, if it reports one
    fn chain_id(&self) -> Option<u64>;

    fn signing_client(&self) -> Option<Arc<dyn SigningClient>>;
}

/// Embedded/custodial wallet subsystem behind an authentication flow
#[async_trait]
pub trait EmbeddedWalletProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Wallet handles in the order the SDK lists them
    fn wallets(&self) -> Vec<Arc<dyn EmbeddedWalletHandle>>;

    async fn logout(&self) -> BackendResult<()>;

    /// Snapshot of the wallets in the shape the resolver reads
    fn connections(&self) -> Vec<WalletConnection> {
        self.wallets()
            .iter()
            .map(|w| WalletConnection::embedded(w.address(), w.chain_id()))
            .collect()
    }
}
