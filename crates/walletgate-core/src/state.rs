use serde::{Deserialize, Serialize};

/// Address display constants (`0x1234...5678`).
pub mod eth_address {
    /// Characters kept from the start, including `0x`.
    pub const PREFIX_LEN: usize = 6;
    /// Index where the kept suffix starts.
    pub const SUFFIX_START: usize = 38;
    /// Length of a full hex address with prefix.
    pub const FULL_LEN: usize = 42;
}

/// Format an Ethereum address for display (0x1234...5678).
pub fn short_address(address: &str) -> String {
    if address.len() >= eth_address::FULL_LEN && address.is_ascii() {
        format!(
            "{}...{}",
            &address[..eth_address::PREFIX_LEN],
            &address[eth_address::SUFFIX_START..]
        )
    } else {
        address.to_string()
    }
}

/// Wallet connection state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        address: String,
        chain_id: Option<u64>,
    },
    /// Local simulated session; no wallet is involved.
    Demo {
        mock_address: String,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, ConnectionState::Demo { .. })
    }

    /// Whether a real or demo session is showing.
    pub fn has_session(&self) -> bool {
        self.is_connected() || self.is_demo()
    }

    /// Address of the real or demo session.
    pub fn address(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { address, .. } => Some(address),
            ConnectionState::Demo { mock_address } => Some(mock_address),
            _ => None,
        }
    }

    /// Get chain ID if connected
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            ConnectionState::Connected { chain_id, .. } => *chain_id,
            _ => None,
        }
    }

    /// Format address for display (0x1234...5678, or a placeholder)
    pub fn display_name(&self) -> String {
        match self {
            ConnectionState::Connected { address, .. } => short_address(address),
            ConnectionState::Demo { mock_address } => format!("{} (demo)", short_address(mock_address)),
            ConnectionState::Connecting => "connecting...".to_string(),
            ConnectionState::Disconnected => "guest".to_string(),
        }
    }

    /// Lowercase label used in logs and CSS hooks.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected { .. } => "connected",
            ConnectionState::Demo { .. } => "demo",
        }
    }
}
