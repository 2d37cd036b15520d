//! Connector picker shown while no session is active.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::css;
use super::hooks::use_provider_watcher;
use crate::app::AppContext;
use crate::components::icons as ic;

/// Connector buttons, the current error or notice, and the demo entry.
#[component]
pub fn WalletPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    use_provider_watcher(ctx);

    let busy = Signal::derive(move || ctx.wallet.with(|w| w.state().is_connecting()));

    let connectors = move || {
        ctx.wallet.with(|w| {
            let pending = w.pending_connector().map(str::to_string);
            let connecting = w.state().is_connecting();
            w.connector_views()
                .into_iter()
                .map(|connector| {
                    let id = connector.descriptor.id.clone();
                    let is_pending = pending.as_deref() == Some(id.as_str());
                    let class = if connector.highlighted {
                        css::connectorHighlighted
                    } else {
                        css::connector
                    };
                    let title = connector.blocked_by.as_ref().map(ToString::to_string);

                    view! {
                        <button
                            class=class
                            disabled=!connector.selectable || connecting
                            title=title
                            on:click=move |_| ctx.select_connector(&id)
                        >
                            <Icon icon=ic::WALLET />
                            <span class=css::connectorName>{connector.descriptor.name}</span>
                            {is_pending.then(|| view! {
                                <span class=css::spinner>"connecting..."</span>
                            })}
                        </button>
                    }
                })
                .collect_view()
        })
    };

    // A failed action outranks the "no provider" hint
    let message = move || {
        ctx.wallet.with(|w| w.error().cloned().or_else(|| w.provider_notice()))
    };

    view! {
        <section class=css::panel>
            <h2 class=css::title>"Connect a wallet"</h2>

            <div class=css::connectors>{connectors}</div>

            {move || message().map(|err| {
                let class = if err.is_informational() { css::notice } else { css::error };
                view! { <p class=class role="status">{err.to_string()}</p> }
            })}

            <div class=css::divider>"or"</div>

            <button
                class=css::demoButton
                disabled=busy
                on:click=move |_| ctx.enter_demo_mode()
            >
                <Icon icon=ic::DEMO />
                <span>"Try demo mode"</span>
            </button>
        </section>
    }
}
