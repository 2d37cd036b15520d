//! Dashboard for demo mode, driven entirely by bundled mock data.

use leptos::prelude::*;
use leptos_icons::Icon;
use walletgate_core::{Direction, short_address};

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::display::DEMO_TX_LIMIT;
use crate::utils::format::{format_amount, format_date_iso};

#[component]
pub fn DemoDashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let body = move || {
        ctx.demo.with(|demo| {
            demo.as_ref().map(|account| {
                let rows = account
                    .recent()
                    .into_iter()
                    .take(DEMO_TX_LIMIT)
                    .map(|tx| {
                        let class = match tx.direction {
                            Direction::Received => css::incoming,
                            Direction::Sent => css::outgoing,
                        };
                        view! {
                            <li class=css::txRow>
                                <span class=css::txDate>{format_date_iso(tx.timestamp)}</span>
                                <span class=css::txParty>{short_address(&tx.counterparty)}</span>
                                <span class=class>{format_amount(tx.direction, &tx.amount)}</span>
                            </li>
                        }
                    })
                    .collect_view();

                view! {
                    <p class=css::address>{account.address.clone()}</p>
                    <dl class=css::facts>
                        <dt>"Network"</dt>
                        <dd>{account.network.clone()}</dd>
                        <dt>"Balance"</dt>
                        <dd>{format!("{} ETH", account.balance)}</dd>
                        <dt>"Received"</dt>
                        <dd>{format!("{} ETH", account.total_received())}</dd>
                        <dt>"Sent"</dt>
                        <dd>{format!("{} ETH", account.total_sent())}</dd>
                    </dl>
                    <h3 class=css::subtitle>"Recent activity"</h3>
                    <ul class=css::txList>{rows}</ul>
                }
            })
        })
    };

    view! {
        <section class=css::card>
            <div class=css::cardHeader>
                <Icon icon=ic::DEMO />
                <span class=css::badgeDemo>"Demo mode"</span>
            </div>

            {body}

            <p class=css::notice>"Mock data only. No wallet is connected."</p>

            <div class=css::actions>
                <button class=css::disconnect on:click=move |_| ctx.disconnect()>
                    <Icon icon=ic::CLOSE />
                    <span>"Exit demo"</span>
                </button>
            </div>
        </section>
    }
}
