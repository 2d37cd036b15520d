//! Provider detection with change notification.
//!
//! [`ProviderDetector`] owns a read-only [`ProviderSource`] and the last
//! snapshot it produced. Whoever drives it (an event listener, a polling
//! timer, a test) calls [`ProviderDetector::refresh`]; subscribers only hear
//! about snapshots that actually changed.

use std::rc::Rc;

use log::debug;

use crate::provider::{ProviderFlags, ProviderSnapshot, detect};

// ============================================================================
// ProviderSource
// ============================================================================

/// Read-only access to the injected provider handle.
///
/// Returns `None` when no handle is present.
pub trait ProviderSource {
    fn read(&self) -> Option<ProviderFlags>;
}

impl ProviderSource for Option<ProviderFlags> {
    fn read(&self) -> Option<ProviderFlags> {
        *self
    }
}

impl ProviderSource for ProviderFlags {
    fn read(&self) -> Option<ProviderFlags> {
        Some(*self)
    }
}

impl<S: ProviderSource + ?Sized> ProviderSource for &S {
    fn read(&self) -> Option<ProviderFlags> {
        (**self).read()
    }
}

impl<S: ProviderSource + ?Sized> ProviderSource for Rc<S> {
    fn read(&self) -> Option<ProviderFlags> {
        (**self).read()
    }
}

impl<S: ProviderSource + ?Sized> ProviderSource for Box<S> {
    fn read(&self) -> Option<ProviderFlags> {
        (**self).read()
    }
}

/// Adapts a closure into a [`ProviderSource`].
pub struct FnSource<F>(pub F);

impl<F> ProviderSource for FnSource<F>
where
    F: Fn() -> Option<ProviderFlags>,
{
    fn read(&self) -> Option<ProviderFlags> {
        (self.0)()
    }
}

// ============================================================================
// ProviderDetector
// ============================================================================

/// What caused a re-detection.
///
/// [`Initial`](Self::Initial) always publishes; the other triggers only
/// publish changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectTrigger {
    /// First detection when the owning view starts.
    Initial,
    /// The host signalled that a provider finished initializing.
    ProviderInitialized,
    /// Periodic fallback check.
    Poll,
}

/// Handle returned by [`ProviderDetector::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ProviderSnapshot)>;

/// Detector state scoped to one consuming view.
pub struct ProviderDetector<S> {
    source: S,
    current: ProviderSnapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    shut_down: bool,
}

impl<S: ProviderSource> ProviderDetector<S> {
    /// Creates a detector. The stored snapshot starts all-false until the
    /// first [`refresh`](Self::refresh).
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: ProviderSnapshot::default(),
            subscribers: Vec::new(),
            next_id: 0,
            shut_down: false,
        }
    }

    /// Reads the source now without touching stored state.
    pub fn detect(&self) -> ProviderSnapshot {
        detect(self.source.read().as_ref())
    }

    /// Last snapshot that was stored by `refresh`.
    pub fn snapshot(&self) -> &ProviderSnapshot {
        &self.current
    }

    /// Re-detects and notifies subscribers when anything changed.
    ///
    /// An `Initial` refresh notifies even when the reading matches the
    /// stored default: subscribers may hold a snapshot from an earlier
    /// detector. Returns the published snapshot, or `None` when nothing was
    /// published or the detector has been shut down.
    pub fn refresh(&mut self, trigger: DetectTrigger) -> Option<&ProviderSnapshot> {
        if self.shut_down {
            return None;
        }

        let next = self.detect();
        if next == self.current && trigger != DetectTrigger::Initial {
            return None;
        }

        debug!(
            "provider snapshot changed ({:?}): {} -> {}",
            trigger,
            self.current.summary(),
            next.summary()
        );
        self.current = next;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.current);
        }
        Some(&self.current)
    }

    /// Registers a callback for changed snapshots.
    pub fn subscribe(&mut self, callback: impl FnMut(&ProviderSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if !self.shut_down {
            self.subscribers.push((id, Box::new(callback)));
        }
        id
    }

    /// Removes a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Stops all further notifications and drops the subscribers.
    pub fn shutdown(&mut self) {
        if !self.shut_down {
            debug!("provider detector shut down");
        }
        self.shut_down = true;
        self.subscribers.clear();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::provider::WalletKind;

    /// Source whose flags can be swapped while a detector holds it.
    #[derive(Default)]
    struct FakeHandle {
        flags: Cell<Option<ProviderFlags>>,
    }

    impl FakeHandle {
        fn set(&self, flags: Option<ProviderFlags>) {
            self.flags.set(flags);
        }
    }

    impl ProviderSource for FakeHandle {
        fn read(&self) -> Option<ProviderFlags> {
            self.flags.get()
        }
    }

    fn recording(detector: &mut ProviderDetector<Rc<FakeHandle>>) -> Rc<RefCell<Vec<ProviderSnapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        detector.subscribe(move |snap| sink.borrow_mut().push(snap.clone()));
        seen
    }

    #[test]
    fn test_detect_has_no_side_effects() {
        let detector = ProviderDetector::new(Some(ProviderFlags::metamask()));
        let snap = detector.detect();
        assert!(snap.is_meta_mask);
        // Stored snapshot is untouched until refresh
        assert_eq!(detector.snapshot(), &ProviderSnapshot::default());
    }

    #[test]
    fn test_refresh_notifies_on_change_only() {
        let handle = Rc::new(FakeHandle::default());
        let mut detector = ProviderDetector::new(handle.clone());
        let seen = recording(&mut detector);

        handle.set(Some(ProviderFlags::metamask()));
        assert!(detector.refresh(DetectTrigger::ProviderInitialized).is_some());
        assert!(detector.refresh(DetectTrigger::Poll).is_none());
        assert!(detector.refresh(DetectTrigger::Poll).is_none());

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].detected, vec![WalletKind::MetaMask]);
    }

    #[test]
    fn test_initial_refresh_always_publishes() {
        let handle = Rc::new(FakeHandle::default());
        let mut detector = ProviderDetector::new(handle.clone());
        let seen = recording(&mut detector);

        // Nothing injected: equal to the stored default, published anyway
        assert!(detector.refresh(DetectTrigger::Initial).is_some());
        assert!(detector.refresh(DetectTrigger::Poll).is_none());

        assert_eq!(*seen.borrow(), vec![ProviderSnapshot::default()]);
    }

    #[test]
    fn test_converges_to_latest_flags() {
        let handle = Rc::new(FakeHandle::default());
        let mut detector = ProviderDetector::new(handle.clone());
        let seen = recording(&mut detector);

        handle.set(Some(ProviderFlags::brave()));
        detector.refresh(DetectTrigger::Poll);
        handle.set(Some(ProviderFlags {
            is_rabby: true,
            ..ProviderFlags::default()
        }));
        detector.refresh(DetectTrigger::Poll);
        handle.set(None);
        detector.refresh(DetectTrigger::Poll);

        let last = seen.borrow().last().cloned().unwrap();
        assert_eq!(last, ProviderSnapshot::default());
        assert_eq!(detector.snapshot(), &last);
    }

    #[test]
    fn test_unsubscribe() {
        let handle = Rc::new(FakeHandle::default());
        let mut detector = ProviderDetector::new(handle.clone());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = detector.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(detector.unsubscribe(id));
        assert!(!detector.unsubscribe(id));

        handle.set(Some(ProviderFlags::metamask()));
        detector.refresh(DetectTrigger::Poll);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_no_notifications_after_shutdown() {
        let handle = Rc::new(FakeHandle::default());
        let mut detector = ProviderDetector::new(handle.clone());
        let seen = recording(&mut detector);

        detector.shutdown();
        assert!(detector.is_shut_down());
        assert_eq!(detector.subscriber_count(), 0);

        handle.set(Some(ProviderFlags::metamask()));
        assert!(detector.refresh(DetectTrigger::Poll).is_none());
        assert!(seen.borrow().is_empty());

        // Late subscriptions are ignored too
        detector.subscribe(|_| panic!("must not be called"));
        assert_eq!(detector.subscriber_count(), 0);
    }

    #[test]
    fn test_independent_detectors_do_not_interfere() {
        let a = Rc::new(FakeHandle::default());
        let b = Rc::new(FakeHandle::default());
        let mut first = ProviderDetector::new(a.clone());
        let mut second = ProviderDetector::new(b.clone());

        a.set(Some(ProviderFlags::metamask()));
        first.refresh(DetectTrigger::Poll);
        second.refresh(DetectTrigger::Poll);
        first.shutdown();

        b.set(Some(ProviderFlags::default()));
        assert!(second.refresh(DetectTrigger::Poll).is_some());
        assert!(first.snapshot().is_meta_mask);
        assert!(!second.snapshot().is_meta_mask);
        assert!(second.snapshot().has_any_provider);
    }

    #[test]
    fn test_fn_source() {
        let detector = ProviderDetector::new(FnSource(|| {
            Some(ProviderFlags {
                is_trust: true,
                ..ProviderFlags::default()
            })
        }));
        assert_eq!(detector.detect().detected_names(), vec!["Trust Wallet"]);
    }
}
