//! Connection error types.
//!
//! Every rejected transition and every failure reported by the wallet
//! backend ends up as a [`ConnectionError`] stored next to the connection
//! state. None of them are fatal; they are rendered as text and cleared on
//! the next attempt.

use thiserror::Error;

/// User-facing connection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// No injected provider was found. Informational: demo mode still works.
    #[error("No wallet extension detected. Install one or try demo mode.")]
    ProviderAbsent,
    /// The backend reports the connector as not ready yet.
    #[error("{0} is not ready yet")]
    ConnectorNotReady(String),
    /// The connector targets a wallet that is not present in this browser.
    #[error("{0} is not available in this browser")]
    ConnectorUnavailable(String),
    /// The user dismissed or rejected the wallet prompt.
    #[error("Connection request was rejected in the wallet")]
    ConnectionRejectedByUser,
    /// The backend failed for any other reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// A connection attempt is already waiting for the wallet.
    #[error("A connection attempt is already in progress")]
    AttemptInProgress,
    /// A session (real or demo) is already active.
    #[error("Disconnect the current session first")]
    SessionActive,
    /// No connector with this id is known.
    #[error("Unknown connector: {0}")]
    UnknownConnector(String),
}

impl ConnectionError {
    /// Whether this error is only a hint rather than a failed action.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::ProviderAbsent)
    }
}
