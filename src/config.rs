//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

use walletgate_core::WalletKind;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "walletgate";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tagline under the header.
pub const APP_TAGLINE: &str = "Connect your wallet to get started";

// =============================================================================
// Logging
// =============================================================================

/// Most verbose level `wasm_logger` forwards to the browser console.
pub const LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Info
};

// =============================================================================
// Provider Detection
// =============================================================================

/// Injected provider detection.
pub mod detection {
    /// Window event fired by wallets once `window.ethereum` is injected.
    pub const PROVIDER_INITIALIZED_EVENT: &str = "ethereum#initialized";

    /// Fallback polling interval for wallets that never fire the event.
    pub const PROVIDER_POLL_INTERVAL_MS: u32 = 1000;

    /// Delay between the event and the re-check, so the handle has settled.
    pub const PROVIDER_SETTLE_DELAY_MS: u32 = 100;
}

// =============================================================================
// Wallet Configuration
// =============================================================================

/// Wallet connection settings.
pub mod wallet {
    use super::WalletKind;

    /// localStorage key for wallet session persistence.
    pub const SESSION_KEY: &str = "wallet_session";

    /// Timeout for silent (no popup) account lookups, in milliseconds.
    pub const TIMEOUT_MS: i32 = 2000;

    /// EIP-1193 error code for a request the user rejected.
    pub const USER_REJECTED_CODE: i64 = 4001;

    /// Brand connectors offered next to the generic injected one.
    pub const NAMED_CONNECTORS: &[(&str, WalletKind)] = &[
        ("metaMask", WalletKind::MetaMask),
        ("coinbaseWallet", WalletKind::CoinbaseWallet),
        ("rabby", WalletKind::Rabby),
        ("trust", WalletKind::TrustWallet),
    ];
}

// =============================================================================
// Display
// =============================================================================

/// Display limits.
pub mod display {
    /// Transactions listed on the demo dashboard.
    pub const DEMO_TX_LIMIT: usize = 5;
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
