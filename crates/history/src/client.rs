use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::config::HistoryApiConfig;
use shared::models::{HistoryFilters, HistoryResponse, MetadataResponse};
use shared::{tokens, Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

const HISTORY_FAILURE: &str = "Failed to fetch transaction history. Check API URL.";

/// Client for the transfer history service
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &HistoryApiConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Page of indexed transfers matching `filters`
    pub async fn fetch_transaction_history(
        &self,
        filters: &HistoryFilters,
    ) -> Result<HistoryResponse> {
        let url = format!("{}/history/transactions", self.base_url);
        debug!("Fetching transaction history: {:?}", filters);

        let response = self
            .client
            .get(&url)
            .query(filters)
            .send()
            .await
            .map_err(|e| {
                warn!("History request failed: {}", e);
                Error::HistoryApi(HISTORY_FAILURE.to_string())
            })?;

        read_json(response, HISTORY_FAILURE).await
    }

    /// Live metadata for a token contract
    pub async fn fetch_token_metadata(&self, contract_address: &str) -> Result<MetadataResponse> {
        let url = format!("{}/history/metadata", self.base_url);
        let fallback = match tokens::symbol_for_address(contract_address) {
            Some(symbol) => format!("Failed to fetch live metadata for {}.", symbol),
            None => format!("Failed to fetch live metadata for {}.", contract_address),
        };
        debug!("Fetching token metadata for {}", contract_address);

        let response = self
            .client
            .get(&url)
            .query(&[("contractAddress", contract_address)])
            .send()
            .await
            .map_err(|e| {
                warn!("Metadata request failed: {}", e);
                Error::HistoryApi(fallback.clone())
            })?;

        read_json(response, &fallback).await
    }

    /// Metadata by token symbol; `None` for symbols outside the token table
    pub async fn fetch_token_metadata_for_symbol(
        &self,
        symbol: &str,
    ) -> Result<Option<MetadataResponse>> {
        match tokens::address_for_symbol(symbol) {
            Some(address) => self.fetch_token_metadata(address).await.map(Some),
            None => {
                debug!("No contract known for symbol {}", symbol);
                Ok(None)
            }
        }
    }
}

/// Decode a success body, or surface the server's `message` on failure
async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());

        warn!("History API returned error status {}: {}", status, message);
        return Err(Error::HistoryApi(message));
    }

    response.json().await.map_err(|e| {
        warn!("Failed to parse history API response: {}", e);
        Error::HistoryApi(fallback.to_string())
    })
}
