//! Debug panel showing the raw provider snapshot and connection state.

use leptos::prelude::*;
use leptos_icons::Icon;
use log::warn;
use serde::Serialize;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/debug/debug.module.css");

fn pretty(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        warn!("debug panel could not serialize: {}", e);
        String::new()
    })
}

#[component]
pub fn DebugPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let snapshot = move || ctx.wallet.with(|w| pretty(w.snapshot()));
    let state = move || ctx.wallet.with(|w| pretty(w.state()));
    let connectors = move || ctx.wallet.with(|w| pretty(&w.connectors()));

    view! {
        <Show when=move || ctx.show_debug.get()>
            <aside class=css::panel>
                <div class=css::header>
                    <span>"Debug"</span>
                    <button class=css::close on:click=move |_| ctx.toggle_debug() title="Close">
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
                <h4 class=css::heading>"Provider snapshot"</h4>
                <pre class=css::json>{snapshot}</pre>
                <h4 class=css::heading>"Connection state"</h4>
                <pre class=css::json>{state}</pre>
                <h4 class=css::heading>"Connectors"</h4>
                <pre class=css::json>{connectors}</pre>
            </aside>
        </Show>
    }
}
