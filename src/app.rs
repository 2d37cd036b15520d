//! Root application module.
//!
//! Contains the main App component and the AppContext definition, following
//! Leptos conventions.

use leptos::prelude::*;
use log::error;
use walletgate_core::{ConnectionCoordinator, DemoAccount, ProviderSnapshot, WalletBackend};

use crate::components::Layout;
use crate::core::Eip1193Backend;
use crate::utils::dom;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// with `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Connection state machine, including the latest provider snapshot.
    pub wallet: RwSignal<ConnectionCoordinator>,

    /// Mock data while demo mode is active.
    pub demo: RwSignal<Option<DemoAccount>>,

    /// Whether the debug panel is open.
    pub show_debug: RwSignal<bool>,
}

impl AppContext {
    /// Creates a new application context.
    ///
    /// The coordinator starts disconnected with the backend's current
    /// connector list; the provider watcher keeps it up to date.
    pub fn new() -> Self {
        let ctx = Self {
            wallet: RwSignal::new(ConnectionCoordinator::default()),
            demo: RwSignal::new(None),
            show_debug: RwSignal::new(false),
        };
        let connectors = ctx.backend().connectors();
        ctx.wallet.update(|c| c.set_connectors(connectors));
        ctx
    }

    /// Backend bound to this context's coordinator.
    pub fn backend(&self) -> Eip1193Backend {
        Eip1193Backend::new(self.wallet)
    }

    /// Record a new provider snapshot and refresh connector readiness.
    pub fn apply_snapshot(&self, snapshot: ProviderSnapshot) {
        let connectors = self.backend().connectors();
        self.wallet.update(|c| {
            c.snapshot_changed(snapshot);
            c.set_connectors(connectors);
        });
    }

    /// User picked a connector button.
    pub fn select_connector(&self, id: &str) {
        let backend = self.backend();
        self.wallet.update(|c| {
            let _ = c.select_connector(id, &backend);
        });
    }

    /// User asked for demo mode.
    pub fn enter_demo_mode(&self) {
        let mut entered = false;
        self.wallet.update(|c| entered = c.enter_demo_mode().is_ok());
        if !entered {
            return;
        }

        match DemoAccount::load() {
            Ok(account) => {
                let address = self
                    .wallet
                    .with_untracked(|c| c.state().address().map(str::to_string));
                let account = match address {
                    Some(address) => account.for_address(address),
                    None => account,
                };
                self.demo.set(Some(account));
            }
            Err(e) => error!("demo data is malformed: {}", e),
        }
    }

    /// User pressed disconnect (real or demo session).
    pub fn disconnect(&self) {
        let backend = self.backend();
        self.wallet.update(|c| c.disconnect(&backend));
        self.demo.set(None);
    }

    pub fn toggle_debug(&self) {
        self.show_debug.update(|open| *open = !*open);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Restores a previous wallet session and follows wallet events
/// - Renders the page layout
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let backend = ctx.backend();
    backend.restore_session();
    backend.listen();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    min-height: 100vh;
                    padding: 2rem;
                    background: #0b1020;
                    color: #e0e0e0;
                    font-family: system-ui, sans-serif;
                ">
                    <h1 style="color: #ff6b6b; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="color: #ff6b6b; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| dom::reload()
                        style="
                            background: #4a90e2;
                            color: white;
                            border: none;
                            padding: 0.75rem 2rem;
                            border-radius: 6px;
                            cursor: pointer;
                        "
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Layout />
        </ErrorBoundary>
    }
}
