//! Page layout.
//!
//! Switches the main area on the connection state: the connector picker
//! while disconnected or connecting, the account card for a real session,
//! and the dashboard in demo mode.

use leptos::prelude::*;
use leptos_icons::Icon;
use walletgate_core::ConnectionState;

use crate::app::AppContext;
use crate::components::debug::DebugPanel;
use crate::components::icons as ic;
use crate::components::status::Status;
use crate::components::wallet::{AccountCard, DemoDashboard, WalletPanel};
use crate::config::{APP_NAME, APP_TAGLINE, APP_VERSION};

stylance::import_crate_style!(css, "src/components/layout.module.css");

/// Which view the main area shows.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Picker,
    Account,
    Demo,
}

impl Screen {
    fn for_state(state: &ConnectionState) -> Self {
        match state {
            ConnectionState::Disconnected | ConnectionState::Connecting => Screen::Picker,
            ConnectionState::Connected { .. } => Screen::Account,
            ConnectionState::Demo { .. } => Screen::Demo,
        }
    }
}

#[component]
pub fn Layout() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    // Memo so the picker (and its provider watcher) is only rebuilt when
    // the screen actually changes
    let screen = Memo::new(move |_| ctx.wallet.with(|w| Screen::for_state(w.state())));

    view! {
        <div class=css::page>
            <Status />
            <main class=css::main>
                <div class=css::hero>
                    <span class=css::logo><Icon icon=ic::WALLET /></span>
                    <h1 class=css::name>{APP_NAME}</h1>
                    <p class=css::tagline>{APP_TAGLINE}</p>
                </div>
                {move || match screen.get() {
                    Screen::Picker => view! { <WalletPanel /> }.into_any(),
                    Screen::Account => view! { <AccountCard /> }.into_any(),
                    Screen::Demo => view! { <DemoDashboard /> }.into_any(),
                }}
            </main>
            <footer class=css::footer>{format!("{} v{}", APP_NAME, APP_VERSION)}</footer>
            <DebugPanel />
        </div>
    }
}
