//! Provider detection hook for wallet components.

use leptos::prelude::*;
use log::debug;

use crate::app::AppContext;
use crate::core::{ProviderWatcher, WindowProvider};

/// Watch `window.ethereum` for as long as the calling component is mounted.
///
/// Every changed snapshot is pushed into the coordinator together with a
/// fresh connector list. The watcher is dropped on cleanup, which stops
/// the event listener and both timers.
pub fn use_provider_watcher(ctx: AppContext) {
    let watcher = ProviderWatcher::start(WindowProvider, move |snapshot| {
        debug!("providers: {}", snapshot.summary());
        ctx.apply_snapshot(snapshot.clone());
    });

    let watcher = StoredValue::new_local(Some(watcher));
    on_cleanup(move || {
        watcher.update_value(|w| {
            w.take();
        });
    });
}
