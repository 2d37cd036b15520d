//! The seam to the wallet-connector backend.
//!
//! The backend owns everything that actually talks to a wallet. The
//! coordinator only reads its connector list, asks it to start or tear down
//! a session, and is told about the outcome.

use serde::{Deserialize, Serialize};

use crate::error::ConnectionError;
use crate::provider::WalletKind;

/// One way of obtaining a wallet session, as described by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDescriptor {
    pub id: String,
    pub name: String,
    pub ready: bool,
    /// Talks to whatever provider is injected, recognized or not.
    pub is_generic_injected: bool,
}

impl ConnectorDescriptor {
    /// The catch-all injected connector.
    pub fn injected(ready: bool) -> Self {
        Self {
            id: "injected".to_string(),
            name: "Browser Wallet".to_string(),
            ready,
            is_generic_injected: true,
        }
    }

    /// A brand-specific connector.
    pub fn named(id: impl Into<String>, name: impl Into<String>, ready: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ready,
            is_generic_injected: false,
        }
    }

    /// The recognized wallet this connector is branded for, if any.
    pub fn wallet_kind(&self) -> Option<WalletKind> {
        if self.is_generic_injected {
            return None;
        }
        WalletKind::ALL
            .into_iter()
            .find(|w| w.matches_name(&self.name) || w.matches_name(&self.id))
    }
}

/// Live session feed reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Active {
        address: String,
        chain_id: Option<u64>,
    },
    Inactive,
}

/// The external wallet-connector collaborator.
///
/// `initiate_connection` must return immediately; the outcome is reported
/// later through [`ConnectionCoordinator::session_established`] or
/// [`ConnectionCoordinator::connection_failed`].
///
/// [`ConnectionCoordinator::session_established`]: crate::ConnectionCoordinator::session_established
/// [`ConnectionCoordinator::connection_failed`]: crate::ConnectionCoordinator::connection_failed
pub trait WalletBackend {
    /// Connectors currently offered.
    fn connectors(&self) -> Vec<ConnectorDescriptor>;

    /// Start an asynchronous connection through `connector_id`.
    fn initiate_connection(&self, connector_id: &str);

    /// End the active session.
    fn terminate_connection(&self);
}

impl<B: WalletBackend + ?Sized> WalletBackend for &B {
    fn connectors(&self) -> Vec<ConnectorDescriptor> {
        (**self).connectors()
    }

    fn initiate_connection(&self, connector_id: &str) {
        (**self).initiate_connection(connector_id)
    }

    fn terminate_connection(&self) {
        (**self).terminate_connection()
    }
}

/// A connector as shown in the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectorView {
    pub descriptor: ConnectorDescriptor,
    pub selectable: bool,
    /// Why the connector cannot be picked right now.
    pub blocked_by: Option<ConnectionError>,
    /// Suggested connector for the detected wallet.
    pub highlighted: bool,
}
