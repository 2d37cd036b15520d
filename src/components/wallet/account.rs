//! Card for a connected wallet session.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ethereum;

#[component]
pub fn AccountCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let address = Signal::derive(move || {
        ctx.wallet
            .with(|w| w.state().address().map(str::to_string))
            .unwrap_or_default()
    });
    let chain_id = Signal::derive(move || ctx.wallet.with(|w| w.state().chain_id()));
    let network = Signal::derive(move || match chain_id.get() {
        Some(id) => format!("{} ({})", ethereum::chain_name(id), id),
        None => "unknown network".to_string(),
    });
    let explorer = Signal::derive(move || {
        chain_id
            .get()
            .and_then(|id| ethereum::explorer_url(id, &address.get()))
    });

    view! {
        <section class=css::card>
            <div class=css::cardHeader>
                <Icon icon=ic::LOCK />
                <span class=css::badge>"Connected"</span>
            </div>

            <p class=css::address title=address>{address}</p>

            <dl class=css::facts>
                <dt>"Network"</dt>
                <dd>{network}</dd>
            </dl>

            <div class=css::actions>
                {move || explorer.get().map(|href| view! {
                    <a class=css::link href=href target="_blank" rel="noopener noreferrer">
                        <span>"View on explorer"</span>
                        <Icon icon=ic::EXTERNAL_LINK />
                    </a>
                })}
                <button class=css::disconnect on:click=move |_| ctx.disconnect()>
                    <Icon icon=ic::DISCONNECT />
                    <span>"Disconnect"</span>
                </button>
            </div>
        </section>
    }
}
