//! Status bar component.
//!
//! Displays session, detected wallets, and network information.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ethereum;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

/// Network shown in the bar, `-` without a session.
fn network_label(chain_id: Option<u64>) -> String {
    chain_id
        .map(|id| ethereum::chain_name(id).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Status bar component displaying session, wallet, and network information.
///
/// ## Responsive behavior
///
/// | Breakpoint | Display |
/// |------------|---------|
/// | Desktop (> 768px) | Full labels: `Session: guest \| Wallets: MetaMask \| Network: Ethereum` |
/// | Mobile (< 480px) | Values only, network hidden |
#[component]
pub fn Status() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let session_name = Signal::derive(move || ctx.wallet.with(|w| w.state().display_name()));
    let session_label = Signal::derive(move || ctx.wallet.with(|w| w.state().label()));
    let wallets = Signal::derive(move || ctx.wallet.with(|w| w.snapshot().summary()));
    let network_name =
        Signal::derive(move || ctx.wallet.with(|w| network_label(w.state().chain_id())));

    view! {
        <header class=css::bar data-session=session_label>
            <div class=css::section>
                <span class=css::label>
                    <span class=css::labelText>"Session:"</span>
                    <span class=css::labelIcon><Icon icon=ic::USER /></span>
                    <span class=css::value>{session_name}</span>
                </span>

                <span class=css::labelCyan>
                    <span class=css::labelText>"Wallets:"</span>
                    <span class=css::labelIcon><Icon icon=ic::WALLET /></span>
                    <span class=css::value>{wallets}</span>
                </span>

                <span class=css::labelPurple>
                    <span class=css::labelText>"Network:"</span>
                    <span class=css::labelIcon><Icon icon=ic::NETWORK /></span>
                    <span class=css::value>{network_name}</span>
                </span>
            </div>

            <button
                class=css::toggleButton
                on:click=move |_| ctx.toggle_debug()
                title="Toggle debug panel"
            >
                <Icon icon=ic::DEBUG />
            </button>
        </header>
    }
}
