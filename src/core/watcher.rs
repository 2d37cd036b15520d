//! Keeps a [`ProviderDetector`] up to date while a view is mounted.
//!
//! Two things trigger a re-detection:
//! - the `ethereum#initialized` window event, followed by a short settle delay
//! - a fixed polling interval, for wallets that never fire the event
//!
//! Dropping the watcher removes the listener, cancels both timers and shuts
//! the detector down, so no callback runs after the owning view is gone.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use walletgate_core::{DetectTrigger, ProviderDetector, ProviderSnapshot, ProviderSource};

use crate::config::detection::{
    PROVIDER_INITIALIZED_EVENT, PROVIDER_POLL_INTERVAL_MS, PROVIDER_SETTLE_DELAY_MS,
};
use crate::utils::dom;

type SharedDetector<S> = Rc<RefCell<ProviderDetector<S>>>;

/// Re-run detection, skipping if a refresh is already on the stack.
fn refresh<S: ProviderSource>(detector: &SharedDetector<S>, trigger: DetectTrigger) {
    if let Ok(mut detector) = detector.try_borrow_mut() {
        detector.refresh(trigger);
    }
}

/// Owns the detector together with its event listener and timers.
pub struct ProviderWatcher<S: ProviderSource + 'static> {
    detector: SharedDetector<S>,
    listener: Option<Closure<dyn FnMut()>>,
    poll: Option<Interval>,
    settle: Rc<RefCell<Option<Timeout>>>,
}

impl<S: ProviderSource + 'static> ProviderWatcher<S> {
    /// Detect now, then keep detecting until dropped.
    ///
    /// `on_change` is called with every snapshot that differs from the
    /// previous one, including the first if a provider is already present.
    pub fn start(source: S, on_change: impl FnMut(&ProviderSnapshot) + 'static) -> Self {
        let detector = Rc::new(RefCell::new(ProviderDetector::new(source)));
        detector.borrow_mut().subscribe(on_change);
        refresh(&detector, DetectTrigger::Initial);

        let settle: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let listener = {
            let detector = detector.clone();
            let settle = settle.clone();
            Closure::<dyn FnMut()>::new(move || {
                debug!("{} received", PROVIDER_INITIALIZED_EVENT);
                let detector = detector.clone();
                let timeout = Timeout::new(PROVIDER_SETTLE_DELAY_MS, move || {
                    refresh(&detector, DetectTrigger::ProviderInitialized);
                });
                // Replacing a pending timeout cancels it
                settle.borrow_mut().replace(timeout);
            })
        };

        let registered = dom::window().is_some_and(|window| {
            window
                .add_event_listener_with_callback(
                    PROVIDER_INITIALIZED_EVENT,
                    listener.as_ref().unchecked_ref(),
                )
                .is_ok()
        });

        let poll = {
            let detector = detector.clone();
            Interval::new(PROVIDER_POLL_INTERVAL_MS, move || {
                refresh(&detector, DetectTrigger::Poll);
            })
        };

        Self {
            detector,
            listener: registered.then_some(listener),
            poll: Some(poll),
            settle,
        }
    }
}

impl<S: ProviderSource + 'static> Drop for ProviderWatcher<S> {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take()
            && let Some(window) = dom::window()
        {
            let _ = window.remove_event_listener_with_callback(
                PROVIDER_INITIALIZED_EVENT,
                listener.as_ref().unchecked_ref(),
            );
        }
        // Dropping gloo timers clears them
        drop(self.poll.take());
        drop(self.settle.borrow_mut().take());
        if let Ok(mut detector) = self.detector.try_borrow_mut() {
            detector.shutdown();
        }
        debug!("provider watcher stopped");
    }
}
