//! Browser-side wallet integration.
//!
//! This module provides:
//! - [`ethereum`] EIP-1193 interop on `window.ethereum`
//! - [`WindowProvider`] the injected handle as a detector source
//! - [`ProviderWatcher`] event and polling driven re-detection
//! - [`Eip1193Backend`] the wallet backend driving the coordinator

mod backend;
pub mod error;
pub mod ethereum;
mod provider;
mod watcher;

pub use backend::Eip1193Backend;
pub use provider::WindowProvider;
pub use watcher::ProviderWatcher;
