//! Wallet provider detection and connection coordination.
//!
//! This crate has no browser dependency. It provides:
//! - [`detect`] and [`ProviderDetector`] - which injected wallets exist
//! - [`ConnectionCoordinator`] - the connection / demo-mode state machine
//! - [`WalletBackend`] - the seam to whatever actually talks to a wallet
//! - [`DemoAccount`] - mocked data shown in demo mode

mod connector;
mod coordinator;
pub mod demo;
mod detector;
pub mod error;
mod provider;
mod state;

pub use connector::{ConnectorDescriptor, ConnectorView, SessionStatus, WalletBackend};
pub use coordinator::ConnectionCoordinator;
pub use demo::{DEMO_ADDRESS, DemoAccount, DemoError, Direction, MockTransaction};
pub use detector::{DetectTrigger, FnSource, ProviderDetector, ProviderSource, SubscriptionId};
pub use error::ConnectionError;
pub use provider::{ProviderFlags, ProviderSnapshot, SelectedProviderFlags, WalletKind, detect};
pub use state::{ConnectionState, eth_address, short_address};
