//! Derives the single active wallet from the extension connector and the
//! embedded wallet subsystem.

/// Which signing backend an identity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    ExtensionConnector,
    EmbeddedWallet,
    None,
}

/// One candidate wallet source, as reported by its SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConnection {
    pub backend_kind: BackendKind,
    pub address: Option<String>,
    pub accounts: Vec<String>,
    pub is_connected: bool,
    pub chain_id: Option<u64>,
}

impl WalletConnection {
    /// An extension connection with its account list (first account is active)
    pub fn extension(accounts: Vec<String>, is_connected: bool, chain_id: Option<u64>) -> Self {
        Self {
            backend_kind: BackendKind::ExtensionConnector,
            address: accounts.first().cloned(),
            accounts,
            is_connected,
            chain_id,
        }
    }

    pub fn embedded(address: impl Into<String>, chain_id: Option<u64>) -> Self {
        let address = address.into();
        Self {
            backend_kind: BackendKind::EmbeddedWallet,
            address: Some(address.clone()),
            accounts: vec![address],
            is_connected: true,
            chain_id,
        }
    }

    /// First account, falling back to the reported address
    fn active_account(&self) -> Option<&str> {
        self.accounts
            .first()
            .or(self.address.as_ref())
            .map(String::as_str)
    }
}

/// The wallet every other component acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub address: Option<String>,
    pub backend_kind: BackendKind,
}

impl ResolvedIdentity {
    pub fn none() -> Self {
        Self {
            address: None,
            backend_kind: BackendKind::None,
        }
    }

    fn connected(address: &str, backend_kind: BackendKind) -> Self {
        Self {
            address: Some(address.to_string()),
            backend_kind,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.backend_kind != BackendKind::None
    }

    /// `0x1234...abcd`, or the connect prompt when nothing is connected
    pub fn short_address(&self) -> String {
        let Some(address) = &self.address else {
            return "Connect Wallet".to_string();
        };

        let chars: Vec<char> = address.chars().collect();
        if chars.len() <= 10 {
            return address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }

    /// Connection method shown next to the address
    pub fn label(&self, embedded_login_has_email: bool) -> &'static str {
        match self.backend_kind {
            BackendKind::ExtensionConnector => "MetaMask",
            BackendKind::EmbeddedWallet if embedded_login_has_email => "Privy (Email)",
            BackendKind::EmbeddedWallet => "Privy (Social)",
            BackendKind::None => "",
        }
    }
}

/// Pick the active wallet.
///
/// A connected extension always wins, whatever order the two subsystems
/// connected in. Otherwise the first embedded wallet is used once the
/// embedded subsystem is authenticated.
pub fn resolve(
    extension_connections: &[WalletConnection],
    embedded_wallets: &[WalletConnection],
    is_embedded_authenticated: bool,
) -> ResolvedIdentity {
    let extension_account = extension_connections
        .iter()
        .filter(|c| c.is_connected)
        .find_map(WalletConnection::active_account);

    if let Some(address) = extension_account {
        return ResolvedIdentity::connected(address, BackendKind::ExtensionConnector);
    }

    if is_embedded_authenticated {
        if let Some(address) = embedded_wallets.first().and_then(|w| w.active_account()) {
            return ResolvedIdentity::connected(address, BackendKind::EmbeddedWallet);
        }
    }

    ResolvedIdentity::none()
}
