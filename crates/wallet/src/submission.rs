use shared::Error;

use crate::connection::BackendKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// What the user typed into the transfer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount_text: String,
}

impl TransferRequest {
    pub fn new(recipient: impl Into<String>, amount_text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount_text: amount_text.into(),
        }
    }
}

/// One transfer attempt.
///
/// `id` is the generation of the submit action that created it; only the
/// attempt with the latest id is reflected by the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSubmission {
    pub id: u64,
    pub backend_kind: BackendKind,
    pub status: TransferStatus,
    pub error: Option<Error>,
    pub transaction_reference: Option<String>,
}

impl TransferSubmission {
    pub(crate) fn idle(id: u64, backend_kind: BackendKind) -> Self {
        Self {
            id,
            backend_kind,
            status: TransferStatus::Idle,
            error: None,
            transaction_reference: None,
        }
    }

    pub(crate) fn pending(&self) -> Self {
        Self {
            status: TransferStatus::Pending,
            ..self.clone()
        }
    }

    pub(crate) fn succeeded(&self, transaction_reference: String) -> Self {
        Self {
            status: TransferStatus::Success,
            error: None,
            transaction_reference: Some(transaction_reference),
            ..self.clone()
        }
    }

    pub(crate) fn failed(&self, error: Error) -> Self {
        Self {
            status: TransferStatus::Error,
            error: Some(error),
            ..self.clone()
        }
    }

    /// Refused before dispatch: the status does not move
    pub(crate) fn rejected(&self, error: Error) -> Self {
        Self {
            error: Some(error),
            ..self.clone()
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TransferStatus::Success | TransferStatus::Error)
    }
}
