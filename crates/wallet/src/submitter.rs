use blockchain::{
    format_units, parse_address, parse_transfer_amount, validate_address, Address,
    EmbeddedTransaction, EvmChain, PreparedTransfer, TransferCall,
};
use shared::{Config, Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::backend::{EmbeddedWalletHandle, EmbeddedWalletProvider, ExtensionConnector};
use crate::connection::{BackendKind, ResolvedIdentity};
use crate::submission::{TransferRequest, TransferStatus, TransferSubmission};

/// The token the submitter moves and where it lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTarget {
    pub token: Address,
    pub token_symbol: String,
    pub decimals: u32,
    /// Used when an embedded wallet does not report its network
    pub fallback_chain_id: u64,
}

impl TransferTarget {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            token: parse_address(&config.transfer.token_address)?,
            token_symbol: config.transfer.token_symbol.clone(),
            decimals: config.transfer.token_decimals,
            fallback_chain_id: config.chain.default_chain_id,
        })
    }
}

/// Latest simulation and the refresh generation that produced it
#[derive(Debug, Default)]
struct SimulationCache {
    generation: u64,
    prepared: Option<PreparedTransfer>,
}

/// Validates transfer requests and sends them through the active backend.
///
/// Every submit action gets a new generation. Results from backend calls are
/// applied only while their generation is still the latest, so a slow
/// earlier attempt can never overwrite a newer one.
pub struct TransferSubmitter {
    connector: Arc<dyn ExtensionConnector>,
    embedded: Arc<dyn EmbeddedWalletProvider>,
    target: TransferTarget,
    state: RwLock<TransferSubmission>,
    simulation: RwLock<SimulationCache>,
}

impl TransferSubmitter {
    pub fn new(
        connector: Arc<dyn ExtensionConnector>,
        embedded: Arc<dyn EmbeddedWalletProvider>,
        target: TransferTarget,
    ) -> Self {
        info!(
            "Initializing transfer submitter for {} at {:?}",
            target.token_symbol, target.token
        );

        Self {
            connector,
            embedded,
            target,
            state: RwLock::new(TransferSubmission::idle(0, BackendKind::None)),
            simulation: RwLock::new(SimulationCache::default()),
        }
    }

    pub fn target(&self) -> &TransferTarget {
        &self.target
    }

    /// State of the latest submission
    pub async fn current(&self) -> TransferSubmission {
        self.state.read().await.clone()
    }

    /// Check the recipient, then the amount
    pub fn validate(&self, request: &TransferRequest) -> Result<TransferCall> {
        let recipient = validate_address(&request.recipient)?;
        let amount = parse_transfer_amount(&request.amount_text, self.target.decimals)?;
        Ok(TransferCall::new(self.target.token, recipient, amount))
    }

    /// Re-run the read-only simulation for the current form inputs.
    ///
    /// Only the extension backend simulates. Any other identity, invalid
    /// input or failed simulation clears the cached request. A refresh that
    /// finishes after a newer one has started leaves the cache alone and
    /// only returns its own result.
    pub async fn refresh_simulation(
        &self,
        identity: &ResolvedIdentity,
        request: &TransferRequest,
    ) -> Option<PreparedTransfer> {
        let generation = {
            let mut cache = self.simulation.write().await;
            cache.generation += 1;
            cache.generation
        };

        let prepared = match self.simulation_inputs(identity, request) {
            Some((account, call)) => match self.connector.simulate_transfer(account, &call).await {
                Ok(prepared) => {
                    debug!(
                        "Simulated transfer of {} to {:?}",
                        format_units(call.amount, self.target.decimals),
                        call.recipient
                    );
                    Some(prepared)
                }
                Err(e) => {
                    warn!("Transfer simulation failed: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut cache = self.simulation.write().await;
        if cache.generation == generation {
            cache.prepared = prepared.clone();
        } else {
            debug!(
                "Discarding stale simulation {} (current is {})",
                generation, cache.generation
            );
        }
        prepared
    }

    /// Whether a submit action would currently be accepted and dispatched
    pub async fn can_submit(&self, identity: &ResolvedIdentity, request: &TransferRequest) -> bool {
        if !identity.is_connected() || self.state.read().await.is_pending() {
            return false;
        }

        let Ok(call) = self.validate(request) else {
            return false;
        };

        match identity.backend_kind {
            BackendKind::ExtensionConnector => match identity_account(identity) {
                Ok(account) => self.matching_simulation(account, &call).await.is_some(),
                Err(_) => false,
            },
            _ => true,
        }
    }

    /// Start a new transfer attempt and drive it to its outcome.
    ///
    /// Returns this attempt's own record. Transfer failures are recorded on
    /// the submission rather than returned as errors.
    pub async fn submit(
        &self,
        identity: &ResolvedIdentity,
        request: &TransferRequest,
    ) -> TransferSubmission {
        let submission = self.begin(identity.backend_kind).await;
        debug!("Transfer submission {} started", submission.id);

        let call = match self.validate(request) {
            Ok(call) => call,
            Err(e) => {
                warn!("Transfer submission {} rejected: {}", submission.id, e);
                return self.settle(submission.rejected(e)).await;
            }
        };

        if !identity.is_connected() {
            warn!("Transfer submission {} rejected: no wallet connected", submission.id);
            return self.settle(submission.rejected(Error::NoWalletConnected)).await;
        }

        let pending = submission.pending();
        self.commit(pending.clone()).await;
        info!(
            "Submitting transfer {} of {} {} to {:?} via {:?}",
            pending.id,
            format_units(call.amount, self.target.decimals),
            self.target.token_symbol,
            call.recipient,
            identity.backend_kind
        );

        let outcome = match self.dispatch(identity, &call).await {
            Ok(transaction_reference) => {
                info!(
                    "Transfer {} accepted by backend: {}",
                    pending.id, transaction_reference
                );
                pending.succeeded(transaction_reference)
            }
            Err(e) => {
                error!("Transfer {} failed: {}", pending.id, e);
                pending.failed(e)
            }
        };

        self.settle(outcome).await
    }

    /// Wait for the receipt of an extension-path transfer.
    ///
    /// Returns the applied state, or `None` when there is nothing to confirm
    /// or a newer submission has started in the meantime.
    pub async fn await_confirmation(
        &self,
        submission: &TransferSubmission,
    ) -> Option<TransferSubmission> {
        if submission.backend_kind != BackendKind::ExtensionConnector
            || submission.status != TransferStatus::Success
        {
            return None;
        }
        let hash = submission.transaction_reference.clone()?;

        debug!("Waiting for receipt of {}", hash);
        let outcome = match self.connector.wait_for_receipt(&hash).await {
            Ok(receipt) if receipt.is_success() => {
                info!("Transaction {} confirmed", hash);
                submission.succeeded(hash)
            }
            Ok(receipt) => {
                error!("Transaction {} reverted", hash);
                submission.failed(Error::BackendRejected(format!(
                    "Transaction {} reverted",
                    receipt.transaction_hash
                )))
            }
            Err(e) => {
                error!("Waiting for receipt of {} failed: {}", hash, e);
                submission.failed(e.into())
            }
        };

        if self.commit(outcome.clone()).await {
            Some(outcome)
        } else {
            None
        }
    }

    async fn dispatch(&self, identity: &ResolvedIdentity, call: &TransferCall) -> Result<String> {
        match identity.backend_kind {
            BackendKind::ExtensionConnector => {
                let account = identity_account(identity)?;
                let prepared = self
                    .matching_simulation(account, call)
                    .await
                    .ok_or(Error::SimulationUnavailable)?;

                Ok(self.connector.write_contract(&prepared).await?)
            }
            BackendKind::EmbeddedWallet => {
                let wallet = self.embedded_wallet(identity).ok_or(Error::ClientUnavailable)?;
                let client = wallet.signing_client().ok_or(Error::ClientUnavailable)?;

                let chain_id = wallet.chain_id().unwrap_or(self.target.fallback_chain_id);
                debug!("Sending embedded transaction on {}", EvmChain::describe(chain_id));

                let transaction = EmbeddedTransaction {
                    to: call.token,
                    data: call.calldata(),
                    chain_id,
                };
                Ok(client.send_transaction(transaction).await?)
            }
            BackendKind::None => Err(Error::NoWalletConnected),
        }
    }

    fn simulation_inputs(
        &self,
        identity: &ResolvedIdentity,
        request: &TransferRequest,
    ) -> Option<(Address, TransferCall)> {
        if identity.backend_kind != BackendKind::ExtensionConnector {
            return None;
        }
        let account = identity_account(identity).ok()?;
        let call = self.validate(request).ok()?;
        Some((account, call))
    }

    /// Cached simulation, if it was made for exactly this account and call
    async fn matching_simulation(
        &self,
        account: Address,
        call: &TransferCall,
    ) -> Option<PreparedTransfer> {
        self.simulation
            .read()
            .await
            .prepared
            .as_ref()
            .filter(|p| p.account == account && p.call == *call)
            .cloned()
    }

    fn embedded_wallet(&self, identity: &ResolvedIdentity) -> Option<Arc<dyn EmbeddedWalletHandle>> {
        let address = identity.address.as_deref()?;
        self.embedded
            .wallets()
            .into_iter()
            .find(|w| w.address().eq_ignore_ascii_case(address))
    }

    /// Open a new generation, resetting to Idle
    async fn begin(&self, backend_kind: BackendKind) -> TransferSubmission {
        let mut state = self.state.write().await;
        let next = TransferSubmission::idle(state.id + 1, backend_kind);
        *state = next.clone();
        next
    }

    /// Apply `record` if its generation is still current
    async fn commit(&self, record: TransferSubmission) -> bool {
        let mut state = self.state.write().await;
        if state.id != record.id {
            debug!(
                "Discarding stale result of submission {} (current is {})",
                record.id, state.id
            );
            return false;
        }
        *state = record;
        true
    }

    async fn settle(&self, record: TransferSubmission) -> TransferSubmission {
        self.commit(record.clone()).await;
        record
    }
}

fn identity_account(identity: &ResolvedIdentity) -> Result<Address> {
    let address = identity.address.as_deref().ok_or(Error::NoWalletConnected)?;
    validate_address(address).map_err(|e| {
        warn!("Connected account {} is not usable: {}", address, e);
        Error::NoWalletConnected
    })
}
