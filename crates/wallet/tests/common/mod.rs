#![allow(dead_code)]

use async_trait::async_trait;
use blockchain::{
    Address, EmbeddedTransaction, PreparedTransfer, ReceiptStatus, TransactionReceipt,
    TransferCall, U256,
};
use shared::logging::init_test_logging;
use shared::{BackendError, Config};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use wallet::{
    BackendKind, BackendResult, EmbeddedWalletHandle, EmbeddedWalletProvider, ExtensionConnector,
    ResolvedIdentity, SigningClient, TransferSubmitter, TransferTarget, WalletConnection,
};

pub const EXT_ADDR: &str = "0xaaaa000000000000000000000000000000001111";
pub const EMB_ADDR: &str = "0xbbbb000000000000000000000000000000002222";
pub const RECIPIENT: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0beb0";
pub const EXT_TX_HASH: &str = "0xfeedface";

pub fn target() -> TransferTarget {
    let config = Config::from_lookup(|_| None).expect("default config");
    TransferTarget::from_config(&config).expect("default target")
}

pub fn extension_identity() -> ResolvedIdentity {
    ResolvedIdentity {
        address: Some(EXT_ADDR.to_string()),
        backend_kind: BackendKind::ExtensionConnector,
    }
}

pub fn embedded_identity() -> ResolvedIdentity {
    ResolvedIdentity {
        address: Some(EMB_ADDR.to_string()),
        backend_kind: BackendKind::EmbeddedWallet,
    }
}

/// Extension connector double that records every call
pub struct MockConnector {
    pub fail_simulation: AtomicBool,
    pub write_error: Mutex<Option<BackendError>>,
    pub receipt: Mutex<BackendResult<ReceiptStatus>>,
    pub simulations: AtomicUsize,
    pub writes: AtomicUsize,
    pub receipt_waits: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub connected_with: Mutex<Option<String>>,
    pub simulation_gates: Mutex<VecDeque<Arc<Notify>>>,
    pub simulation_entered: Notify,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            fail_simulation: AtomicBool::new(false),
            write_error: Mutex::new(None),
            receipt: Mutex::new(Ok(ReceiptStatus::Success)),
            simulations: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            receipt_waits: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            connected_with: Mutex::new(None),
            simulation_gates: Mutex::new(VecDeque::new()),
            simulation_entered: Notify::new(),
        }
    }
}

impl MockConnector {
    /// Park the next simulation until `gate` is notified
    pub fn hold_next_simulation(&self, gate: Arc<Notify>) {
        self.simulation_gates.lock().unwrap().push_back(gate);
    }

    pub fn backend_calls(&self) -> usize {
        self.simulations.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtensionConnector for MockConnector {
    async fn connect(&self, connector_id: &str) -> BackendResult<WalletConnection> {
        *self.connected_with.lock().unwrap() = Some(connector_id.to_string());
        Ok(WalletConnection::extension(
            vec![EXT_ADDR.to_string()],
            true,
            Some(11_155_111),
        ))
    }

    async fn disconnect(&self) -> BackendResult<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn simulate_transfer(
        &self,
        account: Address,
        call: &TransferCall,
    ) -> BackendResult<PreparedTransfer> {
        self.simulations.fetch_add(1, Ordering::SeqCst);
        let gate = self.simulation_gates.lock().unwrap().pop_front();
        self.simulation_entered.notify_one();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_simulation.load(Ordering::SeqCst) {
            return Err(BackendError::new(
                "execution reverted: ERC20: transfer amount exceeds balance",
            ));
        }
        Ok(PreparedTransfer {
            account,
            call: call.clone(),
            chain_id: 11_155_111,
            gas: Some(U256::from(52_000u64)),
        })
    }

    async fn write_contract(&self, _prepared: &PreparedTransfer) -> BackendResult<String> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.write_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(EXT_TX_HASH.to_string()),
        }
    }

    async fn wait_for_receipt(&self, transaction_hash: &str) -> BackendResult<TransactionReceipt> {
        self.receipt_waits.fetch_add(1, Ordering::SeqCst);
        let status = self.receipt.lock().unwrap().clone()?;
        Ok(TransactionReceipt {
            transaction_hash: transaction_hash.to_string(),
            status,
            block_number: Some(5_000_000),
        })
    }
}

/// One scripted response of the signing client
pub struct Step {
    pub gate: Option<Arc<Notify>>,
    pub result: BackendResult<String>,
}

impl Step {
    pub fn ready(result: BackendResult<String>) -> Self {
        Self { gate: None, result }
    }

    pub fn gated(result: BackendResult<String>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            result,
        }
    }
}

/// Signing client that replays scripted steps in order
#[derive(Default)]
pub struct MockSigningClient {
    pub sent: Mutex<Vec<EmbeddedTransaction>>,
    pub steps: Mutex<VecDeque<Step>>,
    pub entered: Notify,
}

impl MockSigningClient {
    pub fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }

    pub fn sent(&self) -> Vec<EmbeddedTransaction> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SigningClient for MockSigningClient {
    async fn send_transaction(&self, transaction: EmbeddedTransaction) -> BackendResult<String> {
        self.sent.lock().unwrap().push(transaction);
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::ready(Ok("0xdeadbeef".to_string())));

        self.entered.notify_one();
        if let Some(gate) = step.gate {
            gate.notified().await;
        }
        step.result
    }
}

pub struct MockEmbeddedWallet {
    pub address: String,
    pub chain_id: Option<u64>,
    pub client: Option<Arc<MockSigningClient>>,
}

impl EmbeddedWalletHandle for MockEmbeddedWallet {
    fn address(&self) -> &str {
        &self.address
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn signing_client(&self) -> Option<Arc<dyn SigningClient>> {
        self.client
            .clone()
            .map(|client| client as Arc<dyn SigningClient>)
    }
}

pub struct MockEmbeddedProvider {
    pub authenticated: AtomicBool,
    pub wallets: Vec<Arc<MockEmbeddedWallet>>,
    pub logouts: AtomicUsize,
}

impl MockEmbeddedProvider {
    pub fn with_wallets(wallets: Vec<Arc<MockEmbeddedWallet>>) -> Self {
        Self {
            authenticated: AtomicBool::new(!wallets.is_empty()),
            wallets,
            logouts: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_wallets(vec![])
    }
}

#[async_trait]
impl EmbeddedWalletProvider for MockEmbeddedProvider {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn wallets(&self) -> Vec<Arc<dyn EmbeddedWalletHandle>> {
        self.wallets
            .iter()
            .map(|w| w.clone() as Arc<dyn EmbeddedWalletHandle>)
            .collect()
    }

    async fn logout(&self) -> BackendResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.authenticated.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Submitter wired to a fresh connector and one embedded wallet
pub struct Harness {
    pub connector: Arc<MockConnector>,
    pub client: Arc<MockSigningClient>,
    pub provider: Arc<MockEmbeddedProvider>,
    pub submitter: Arc<TransferSubmitter>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_embedded_chain(None)
    }

    pub fn with_embedded_chain(chain_id: Option<u64>) -> Self {
        let client = Arc::new(MockSigningClient::default());
        let wallet = Arc::new(MockEmbeddedWallet {
            address: EMB_ADDR.to_string(),
            chain_id,
            client: Some(client.clone()),
        });
        Self::build(client, vec![wallet])
    }

    pub fn without_signing_client() -> Self {
        let wallet = Arc::new(MockEmbeddedWallet {
            address: EMB_ADDR.to_string(),
            chain_id: None,
            client: None,
        });
        Self::build(Arc::new(MockSigningClient::default()), vec![wallet])
    }

    fn build(client: Arc<MockSigningClient>, wallets: Vec<Arc<MockEmbeddedWallet>>) -> Self {
        init_test_logging();
        let connector = Arc::new(MockConnector::default());
        let provider = Arc::new(MockEmbeddedProvider::with_wallets(wallets));
        let submitter = Arc::new(TransferSubmitter::new(
            connector.clone(),
            provider.clone(),
            target(),
        ));

        Self {
            connector,
            client,
            provider,
            submitter,
        }
    }
}
