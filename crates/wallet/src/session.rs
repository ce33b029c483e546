use shared::{Error, Result};
use tracing::{info, warn};

use crate::backend::{ConnectorInfo, EmbeddedWalletProvider, ExtensionConnector};
use crate::connection::WalletConnection;

/// What [`disconnect_all`] tore down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disconnected {
    pub extension: bool,
    pub embedded: bool,
}

/// The injected (MetaMask-style) connector, if the browser offers one
pub fn find_injected_connector(connectors: &[ConnectorInfo]) -> Option<&ConnectorInfo> {
    connectors.iter().find(|c| {
        c.id.to_lowercase().contains("injected") || c.name.to_lowercase().contains("metamask")
    })
}

/// Connect the extension wallet through the injected connector
pub async fn connect_extension(
    connector: &dyn ExtensionConnector,
    available: &[ConnectorInfo],
) -> Result<WalletConnection> {
    let injected = find_injected_connector(available).ok_or_else(|| {
        warn!("No injected connector among {} available", available.len());
        Error::ConnectorNotFound("injected".to_string())
    })?;

    info!("Connecting extension wallet via {}", injected.name);
    Ok(connector.connect(&injected.id).await?)
}

/// Disconnect the extension (if connected) and log out of the embedded
/// wallet (if authenticated)
pub async fn disconnect_all(
    connector: &dyn ExtensionConnector,
    embedded: &dyn EmbeddedWalletProvider,
    extension_connections: &[WalletConnection],
) -> Result<Disconnected> {
    let mut disconnected = Disconnected::default();

    if extension_connections.iter().any(|c| c.is_connected) {
        connector.disconnect().await?;
        disconnected.extension = true;
    }

    if embedded.is_authenticated() {
        embedded.logout().await?;
        disconnected.embedded = true;
    }

    info!(
        "Disconnected wallets (extension: {}, embedded: {})",
        disconnected.extension, disconnected.embedded
    );
    Ok(disconnected)
}
