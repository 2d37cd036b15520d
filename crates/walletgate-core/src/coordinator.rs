//! Connection state machine.
//!
//! ```text
//!  Disconnected --select_connector--> Connecting --session_established--> Connected
//!       ^  |                              |                                   |
//!       |  +--enter_demo_mode--> Demo     +--connection_failed--> Disconnected |
//!       +-------------------- disconnect -------------------------------------+
//! ```
//!
//! The coordinator never reports `Connected` on its own: that state is only
//! entered from the backend's outcome or its live session feed. `Demo` is
//! purely local.

use alloy_primitives::Address;
use log::{info, warn};

use crate::connector::{ConnectorDescriptor, ConnectorView, SessionStatus, WalletBackend};
use crate::demo::DEMO_ADDRESS;
use crate::error::ConnectionError;
use crate::provider::ProviderSnapshot;
use crate::state::ConnectionState;

/// Owns the authoritative [`ConnectionState`] and the current error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionCoordinator {
    state: ConnectionState,
    error: Option<ConnectionError>,
    snapshot: ProviderSnapshot,
    connectors: Vec<ConnectorDescriptor>,
    pending: Option<String>,
}

impl ConnectionCoordinator {
    pub fn new(connectors: Vec<ConnectorDescriptor>) -> Self {
        Self {
            connectors,
            ..Self::default()
        }
    }

    /// Builder-style initial snapshot.
    pub fn with_snapshot(mut self, snapshot: ProviderSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn error(&self) -> Option<&ConnectionError> {
        self.error.as_ref()
    }

    pub fn snapshot(&self) -> &ProviderSnapshot {
        &self.snapshot
    }

    pub fn connectors(&self) -> &[ConnectorDescriptor] {
        &self.connectors
    }

    /// Connector id of the attempt in flight.
    pub fn pending_connector(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    // ------------------------------------------------------------------
    // Availability
    // ------------------------------------------------------------------

    /// Why `connector` cannot be selected, if it cannot.
    ///
    /// Readiness is checked first: a connector the backend has not finished
    /// setting up is reported as not ready even when no provider exists.
    pub fn availability(&self, connector: &ConnectorDescriptor) -> Result<(), ConnectionError> {
        if !connector.ready {
            return Err(ConnectionError::ConnectorNotReady(connector.name.clone()));
        }
        if !connector.is_generic_injected && !self.snapshot.has_any_provider {
            return Err(ConnectionError::ConnectorUnavailable(connector.name.clone()));
        }
        Ok(())
    }

    /// `ready && (generic injected || any provider detected)`.
    pub fn is_selectable(&self, connector: &ConnectorDescriptor) -> bool {
        self.availability(connector).is_ok()
    }

    /// Suggested connector while disconnected.
    ///
    /// Prefers a selectable brand connector for a detected wallet, then the
    /// generic injected one. Advisory only.
    pub fn highlighted(&self) -> Option<&str> {
        if !matches!(self.state, ConnectionState::Disconnected) {
            return None;
        }

        let selectable = move || self.connectors.iter().filter(move |c| self.is_selectable(c));

        selectable()
            .find(|c| c.wallet_kind().is_some_and(|w| self.snapshot.has(w)))
            .or_else(|| selectable().find(|c| c.is_generic_injected))
            .map(|c| c.id.as_str())
    }

    /// Connector list annotated for rendering.
    pub fn connector_views(&self) -> Vec<ConnectorView> {
        let highlighted = self.highlighted();
        self.connectors
            .iter()
            .map(|c| {
                let blocked_by = self.availability(c).err();
                ConnectorView {
                    descriptor: c.clone(),
                    selectable: blocked_by.is_none(),
                    blocked_by,
                    highlighted: highlighted == Some(c.id.as_str()),
                }
            })
            .collect()
    }

    /// `ProviderAbsent` while disconnected with nothing injected.
    pub fn provider_notice(&self) -> Option<ConnectionError> {
        (matches!(self.state, ConnectionState::Disconnected) && !self.snapshot.has_any_provider)
            .then_some(ConnectionError::ProviderAbsent)
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Start connecting through the connector `id`.
    ///
    /// On success the state is `Connecting` and the backend has been asked
    /// to connect exactly once. On rejection the state is unchanged, the
    /// error is set, and the backend is not called.
    pub fn select_connector(
        &mut self,
        id: &str,
        backend: &impl WalletBackend,
    ) -> Result<(), ConnectionError> {
        self.error = None;

        let checked = self.check_selection(id);
        if let Err(err) = checked {
            warn!("connector '{}' rejected: {}", id, err);
            self.error = Some(err.clone());
            return Err(err);
        }

        info!("connecting via '{}'", id);
        self.state = ConnectionState::Connecting;
        self.pending = Some(id.to_string());
        backend.initiate_connection(id);
        Ok(())
    }

    fn check_selection(&self, id: &str) -> Result<(), ConnectionError> {
        match self.state {
            ConnectionState::Connecting => return Err(ConnectionError::AttemptInProgress),
            ConnectionState::Connected { .. } | ConnectionState::Demo { .. } => {
                return Err(ConnectionError::SessionActive);
            }
            ConnectionState::Disconnected => {}
        }

        let connector = self
            .connectors
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConnectionError::UnknownConnector(id.to_string()))?;
        self.availability(connector)
    }

    /// Switch to the local demo session.
    ///
    /// Always succeeds from `Disconnected`, whatever the providers. Entering
    /// again while in demo is a no-op. Rejected while a wallet session is
    /// connecting or connected.
    pub fn enter_demo_mode(&mut self) -> Result<(), ConnectionError> {
        self.error = None;
        match self.state {
            ConnectionState::Disconnected => {
                info!("entering demo mode");
                self.state = ConnectionState::Demo {
                    mock_address: DEMO_ADDRESS.to_string(),
                };
                Ok(())
            }
            ConnectionState::Demo { .. } => Ok(()),
            ConnectionState::Connecting | ConnectionState::Connected { .. } => {
                let err = ConnectionError::SessionActive;
                warn!("demo mode rejected: {}", err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// End the current session.
    ///
    /// Only a real session is torn down through the backend; leaving demo
    /// mode is local.
    pub fn disconnect(&mut self, backend: &impl WalletBackend) {
        match self.state {
            ConnectionState::Connected { .. } => {
                info!("disconnecting wallet session");
                backend.terminate_connection();
                self.state = ConnectionState::Disconnected;
            }
            ConnectionState::Demo { .. } => {
                info!("leaving demo mode");
                self.state = ConnectionState::Disconnected;
            }
            ConnectionState::Disconnected | ConnectionState::Connecting => {}
        }
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Backend events
    // ------------------------------------------------------------------

    /// The backend reports that the pending attempt succeeded.
    pub fn session_established(&mut self, address: &str, chain_id: Option<u64>) {
        if !self.state.is_connecting() {
            warn!("ignoring session for {} in state {}", address, self.state.label());
            return;
        }

        match normalize_address(address) {
            Ok(address) => {
                info!("connected as {}", address);
                self.pending = None;
                self.error = None;
                self.state = ConnectionState::Connected { address, chain_id };
            }
            Err(err) => self.connection_failed(err),
        }
    }

    /// The backend reports that the pending attempt failed.
    pub fn connection_failed(&mut self, error: ConnectionError) {
        if !self.state.is_connecting() {
            warn!("ignoring failure in state {}: {}", self.state.label(), error);
            return;
        }
        warn!("connection failed: {}", error);
        self.pending = None;
        self.state = ConnectionState::Disconnected;
        self.error = Some(error);
    }

    /// Live session feed from the backend.
    ///
    /// An active session is reflected from `Disconnected` (restored on
    /// load), `Connecting` and `Connected` (account or chain switched). An
    /// inactive one ends a `Connected` state. Demo mode ignores the feed.
    pub fn session_status(&mut self, status: SessionStatus) {
        if self.state.is_demo() {
            return;
        }

        match status {
            SessionStatus::Active { address, chain_id } => {
                let Ok(address) = normalize_address(&address) else {
                    warn!("ignoring session feed with invalid address {}", address);
                    return;
                };
                if self.state.address() != Some(address.as_str())
                    || self.state.chain_id() != chain_id
                {
                    info!("session active: {} (chain {:?})", address, chain_id);
                }
                self.pending = None;
                self.error = None;
                self.state = ConnectionState::Connected { address, chain_id };
            }
            SessionStatus::Inactive => {
                if self.state.is_connected() {
                    info!("session ended by wallet");
                    self.state = ConnectionState::Disconnected;
                }
            }
        }
    }

    /// Store a new detector snapshot. Never changes the state.
    pub fn snapshot_changed(&mut self, snapshot: ProviderSnapshot) {
        self.snapshot = snapshot;
    }

    /// Replace the backend's connector list.
    pub fn set_connectors(&mut self, connectors: Vec<ConnectorDescriptor>) {
        self.connectors = connectors;
    }
}

/// Parse a hex address and return its EIP-55 checksummed form.
fn normalize_address(raw: &str) -> Result<String, ConnectionError> {
    raw.trim()
        .parse::<Address>()
        .map(|a| a.to_checksum(None))
        .map_err(|_| ConnectionError::ConnectionFailed(format!("invalid address '{}'", raw)))
}
