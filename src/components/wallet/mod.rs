//! Wallet connection UI.
//!
//! - [`WalletPanel`] - Connector picker and demo entry
//! - [`AccountCard`] - Connected session details
//! - [`DemoDashboard`] - Mock account for demo mode

mod account;
mod demo;
mod hooks;
mod panel;

pub use account::AccountCard;
pub use demo::DemoDashboard;
pub use panel::WalletPanel;

stylance::import_crate_style!(css, "src/components/wallet/wallet.module.css");
