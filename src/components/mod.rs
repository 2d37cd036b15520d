//! UI components built with Leptos.
//!
//! - [`Layout`] - Page layout, switches views on the connection state
//! - [`debug`] - Raw snapshot and state inspector
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`status`] - Status bar showing session, wallets and network
//! - [`wallet`] - Connector picker, account card and demo dashboard

pub mod debug;
pub mod icons;
mod layout;
pub mod status;
pub mod wallet;

pub use layout::Layout;
