//! Error types for the browser-side wallet integration.
//!
//! - [`WalletError`] - EIP-1193 provider access and request errors
//!
//! Connection-level errors shown to the user live in
//! [`walletgate_core::ConnectionError`]; [`WalletError`] converts into it.

use thiserror::Error;
use walletgate_core::ConnectionError;

use crate::config::wallet::USER_REJECTED_CODE;

/// Wallet-related errors for EIP-1193 integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// No injected provider on `window.ethereum`
    #[error("No wallet extension installed")]
    NotInstalled,
    /// Failed to build or dispatch the request
    #[error("Failed to create wallet request")]
    RequestCreationFailed,
    /// The provider rejected the request
    #[error("Wallet request rejected: {message}")]
    RequestRejected { code: Option<i64>, message: String },
    /// No account returned from wallet
    #[error("No account returned from wallet")]
    NoAccount,
    /// The wallet did not answer in time
    #[error("Wallet did not respond in time")]
    Timeout,
}

impl WalletError {
    /// EIP-1193 code 4001: the user dismissed the prompt.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::RequestRejected { code: Some(code), .. } if *code == USER_REJECTED_CODE)
    }
}

impl From<WalletError> for ConnectionError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NotInstalled => ConnectionError::ProviderAbsent,
            ref e if e.is_user_rejection() => ConnectionError::ConnectionRejectedByUser,
            other => ConnectionError::ConnectionFailed(other.to_string()),
        }
    }
}
