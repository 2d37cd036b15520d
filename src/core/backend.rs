//! [`WalletBackend`] over the injected EIP-1193 provider.
//!
//! Requests run on `spawn_local`; their outcome is written back into the
//! coordinator signal. The coordinator decides what the outcome means.

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use walletgate_core::{
    ConnectionCoordinator, ConnectorDescriptor, ProviderSnapshot, ProviderSource, SessionStatus,
    WalletBackend, WalletKind, detect,
};

use crate::config::wallet::NAMED_CONNECTORS;
use crate::core::error::WalletError;
use crate::core::ethereum;
use crate::core::provider::WindowProvider;

/// Connector list for a provider snapshot.
///
/// The generic injected connector is always ready; a brand connector is
/// ready once its wallet has been detected.
fn connector_list(snapshot: &ProviderSnapshot) -> Vec<ConnectorDescriptor> {
    let mut connectors = vec![ConnectorDescriptor::injected(true)];
    connectors.extend(NAMED_CONNECTORS.iter().map(|(id, kind)| {
        ConnectorDescriptor::named(*id, kind.display_name(), snapshot.has(*kind))
    }));
    connectors
}

/// Wallet kind behind a connector id, `None` for the generic connector.
fn connector_kind(connector_id: &str) -> Option<WalletKind> {
    NAMED_CONNECTORS
        .iter()
        .find(|(id, _)| *id == connector_id)
        .map(|(_, kind)| *kind)
}

/// EIP-1193 backend bound to the app's coordinator signal.
#[derive(Clone, Copy)]
pub struct Eip1193Backend {
    coordinator: RwSignal<ConnectionCoordinator>,
}

impl Eip1193Backend {
    pub fn new(coordinator: RwSignal<ConnectionCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Reflect a session the wallet still grants from a previous visit.
    ///
    /// Only runs when the session flag was saved, and never opens a popup.
    pub fn restore_session(self) {
        if !ethereum::is_available() || !ethereum::has_session() {
            return;
        }

        let coordinator = self.coordinator;
        spawn_local(async move {
            match silent_account().await {
                Ok(Some((address, chain_id))) => {
                    info!("restored wallet session");
                    coordinator.update(|c| c.session_status(SessionStatus::Active { address, chain_id }));
                }
                Ok(None) => {
                    info!("stored wallet session expired");
                    ethereum::clear_session();
                }
                Err(e) => warn!("could not restore wallet session: {}", e),
            }
        });
    }

    /// Follow account and chain switches made inside the wallet.
    pub fn listen(self) {
        let coordinator = self.coordinator;

        let accounts = ethereum::on_accounts_changed(move |account| {
            coordinator.update(|c| match account {
                Some(address) if c.state().is_connected() => {
                    let chain_id = c.state().chain_id();
                    c.session_status(SessionStatus::Active { address, chain_id });
                }
                Some(_) => {}
                None => {
                    ethereum::clear_session();
                    c.session_status(SessionStatus::Inactive);
                }
            });
        });

        let chain = ethereum::on_chain_changed(move |chain_id| {
            coordinator.update(|c| {
                if !c.state().is_connected() {
                    return;
                }
                if let Some(address) = c.state().address().map(str::to_string) {
                    c.session_status(SessionStatus::Active { address, chain_id });
                }
            });
        });

        if let Err(e) = accounts.and(chain) {
            debug!("wallet events not available: {}", e);
        }
    }
}

/// Account and chain of an existing session, without a popup.
async fn silent_account() -> Result<Option<(String, Option<u64>)>, WalletError> {
    let provider = ethereum::get_ethereum()?;
    let Some(address) = ethereum::get_account(&provider).await? else {
        return Ok(None);
    };
    let chain_id = ethereum::get_chain_id(&provider).await;
    Ok(Some((address, chain_id)))
}

/// Prompt the wallet behind `kind` for an account.
async fn request_account(kind: Option<WalletKind>) -> Result<(String, Option<u64>), WalletError> {
    let provider = ethereum::provider_for(kind)?;
    let address = ethereum::connect(&provider).await?;
    let chain_id = ethereum::get_chain_id(&provider).await;
    Ok((address, chain_id))
}

impl WalletBackend for Eip1193Backend {
    fn connectors(&self) -> Vec<ConnectorDescriptor> {
        connector_list(&detect(WindowProvider.read().as_ref()))
    }

    fn initiate_connection(&self, connector_id: &str) {
        let kind = connector_kind(connector_id);
        let coordinator = self.coordinator;

        spawn_local(async move {
            match request_account(kind).await {
                Ok((address, chain_id)) => {
                    ethereum::save_session();
                    coordinator.update(|c| c.session_established(&address, chain_id));
                }
                Err(e) => {
                    warn!("wallet request failed: {}", e);
                    coordinator.update(|c| c.connection_failed(e.into()));
                }
            }
        });
    }

    fn terminate_connection(&self) {
        ethereum::clear_session();

        spawn_local(async {
            let Ok(provider) = ethereum::get_ethereum() else {
                return;
            };
            if let Err(e) = ethereum::revoke_permissions(&provider).await {
                debug!("wallet kept permissions: {}", e);
            }
        });
    }
}
