pub mod backend;
pub mod connection;
pub mod session;
pub mod submission;
pub mod submitter;

pub use backend::{
    BackendResult, ConnectorInfo, EmbeddedWalletHandle, EmbeddedWalletProvider,
    ExtensionConnector, SigningClient,
};
pub use connection::{resolve, BackendKind, ResolvedIdentity, WalletConnection};
pub use session::{connect_extension, disconnect_all, find_injected_connector, Disconnected};
pub use submission::{TransferRequest, TransferStatus, TransferSubmission};
pub use submitter::{TransferSubmitter, TransferTarget};
