//! End-to-end flows through the detector and the coordinator with a
//! backend that answers asynchronously, the way a real wallet does.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::task::{JoinHandle, LocalSet};
use walletgate_core::{
    ConnectionCoordinator, ConnectionError, ConnectionState, ConnectorDescriptor, DEMO_ADDRESS,
    DetectTrigger, ProviderDetector, ProviderFlags, ProviderSnapshot, ProviderSource,
    WalletBackend,
};

const ADDRESS: &str = "0xde709f2102306220921060314715629080e2fb77";

/// Injected handle whose flags change over time.
#[derive(Default)]
struct Window {
    ethereum: Cell<Option<ProviderFlags>>,
}

impl ProviderSource for Window {
    fn read(&self) -> Option<ProviderFlags> {
        self.ethereum.get()
    }
}

/// Backend that settles each attempt on a spawned local task.
struct SimulatedBackend {
    coordinator: Rc<RefCell<ConnectionCoordinator>>,
    outcome: Result<String, ConnectionError>,
    initiated: RefCell<Vec<String>>,
    terminated: Cell<usize>,
    tasks: RefCell<Vec<JoinHandle<()>>>,
}

impl SimulatedBackend {
    fn new(
        coordinator: Rc<RefCell<ConnectionCoordinator>>,
        outcome: Result<String, ConnectionError>,
    ) -> Self {
        Self {
            coordinator,
            outcome,
            initiated: RefCell::new(Vec::new()),
            terminated: Cell::new(0),
            tasks: RefCell::new(Vec::new()),
        }
    }

    async fn settle(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for task in tasks {
            task.await.unwrap();
        }
    }
}

impl WalletBackend for SimulatedBackend {
    fn connectors(&self) -> Vec<ConnectorDescriptor> {
        self.coordinator.borrow().connectors().to_vec()
    }

    fn initiate_connection(&self, connector_id: &str) {
        self.initiated.borrow_mut().push(connector_id.to_string());
        let coordinator = self.coordinator.clone();
        let outcome = self.outcome.clone();
        let task = tokio::task::spawn_local(async move {
            tokio::task::yield_now().await;
            let mut coordinator = coordinator.borrow_mut();
            match outcome {
                Ok(address) => coordinator.session_established(&address, Some(1)),
                Err(err) => coordinator.connection_failed(err),
            }
        });
        self.tasks.borrow_mut().push(task);
    }

    fn terminate_connection(&self) {
        self.terminated.set(self.terminated.get() + 1);
    }
}

fn shared(connectors: Vec<ConnectorDescriptor>) -> Rc<RefCell<ConnectionCoordinator>> {
    Rc::new(RefCell::new(ConnectionCoordinator::new(connectors)))
}

#[tokio::test]
async fn no_provider_generic_injected_is_selectable() {
    LocalSet::new()
        .run_until(async {
            let coordinator = shared(vec![ConnectorDescriptor::injected(true)]);
            let backend = SimulatedBackend::new(coordinator.clone(), Ok(ADDRESS.to_string()));

            {
                let c = coordinator.borrow();
                assert!(c.is_selectable(&c.connectors()[0]));
            }

            coordinator
                .borrow_mut()
                .select_connector("injected", &backend)
                .unwrap();
            assert_eq!(*backend.initiated.borrow(), vec!["injected".to_string()]);
            assert!(coordinator.borrow().state().is_connecting());

            backend.settle().await;
            assert!(coordinator.borrow().state().is_connected());
            assert_eq!(backend.initiated.borrow().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn metamask_provider_enables_both_connectors() {
    let window = Rc::new(Window::default());
    window.ethereum.set(Some(ProviderFlags::metamask()));

    let coordinator = shared(vec![
        ConnectorDescriptor::injected(true),
        ConnectorDescriptor::named("metaMask", "MetaMask", true),
    ]);

    let mut detector = ProviderDetector::new(window.clone());
    let sink = coordinator.clone();
    detector.subscribe(move |snap| sink.borrow_mut().snapshot_changed(snap.clone()));
    detector.refresh(DetectTrigger::Initial);

    let c = coordinator.borrow();
    assert_eq!(c.snapshot().detected_names(), vec!["MetaMask"]);
    assert!(c.connectors().iter().all(|conn| c.is_selectable(conn)));
    assert_eq!(c.highlighted(), Some("metaMask"));
}

#[tokio::test]
async fn rejected_attempt_returns_to_disconnected() {
    LocalSet::new()
        .run_until(async {
            let coordinator = shared(vec![ConnectorDescriptor::injected(true)]);
            let backend = SimulatedBackend::new(
                coordinator.clone(),
                Err(ConnectionError::ConnectionRejectedByUser),
            );

            coordinator
                .borrow_mut()
                .select_connector("injected", &backend)
                .unwrap();

            // A second click while the wallet prompt is open
            let second = coordinator
                .borrow_mut()
                .select_connector("injected", &backend);
            assert_eq!(second, Err(ConnectionError::AttemptInProgress));

            backend.settle().await;

            let c = coordinator.borrow();
            assert_eq!(c.state(), &ConnectionState::Disconnected);
            assert_eq!(c.error(), Some(&ConnectionError::ConnectionRejectedByUser));
            assert_eq!(backend.initiated.borrow().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn wallet_installed_later_unlocks_named_connector() {
    let window = Rc::new(Window::default());
    let coordinator = shared(vec![
        ConnectorDescriptor::injected(true),
        ConnectorDescriptor::named("rabby", "Rabby", true),
    ]);

    let mut detector = ProviderDetector::new(window.clone());
    let sink = coordinator.clone();
    detector.subscribe(move |snap| sink.borrow_mut().snapshot_changed(snap.clone()));
    detector.refresh(DetectTrigger::Initial);

    {
        let c = coordinator.borrow();
        assert!(!c.is_selectable(&c.connectors()[1]));
        assert_eq!(c.provider_notice(), Some(ConnectionError::ProviderAbsent));
    }

    // Extension finishes injecting; a poll tick picks it up
    window.ethereum.set(Some(ProviderFlags {
        is_rabby: true,
        ..ProviderFlags::default()
    }));
    detector.refresh(DetectTrigger::Poll);

    let c = coordinator.borrow();
    assert!(c.is_selectable(&c.connectors()[1]));
    assert_eq!(c.highlighted(), Some("rabby"));
    assert_eq!(c.state(), &ConnectionState::Disconnected);
    assert_eq!(c.provider_notice(), None);
}

#[tokio::test]
async fn demo_round_trip_never_touches_backend() {
    LocalSet::new()
        .run_until(async {
            let coordinator = shared(vec![ConnectorDescriptor::injected(true)]);
            let backend = SimulatedBackend::new(coordinator.clone(), Ok(ADDRESS.to_string()));

            coordinator.borrow_mut().enter_demo_mode().unwrap();
            assert_eq!(
                coordinator.borrow().state(),
                &ConnectionState::Demo {
                    mock_address: DEMO_ADDRESS.to_string()
                }
            );

            coordinator.borrow_mut().disconnect(&backend);
            assert_eq!(coordinator.borrow().state(), &ConnectionState::Disconnected);
            assert_eq!(backend.terminated.get(), 0);
            assert!(backend.initiated.borrow().is_empty());
        })
        .await;
}

#[tokio::test]
async fn real_session_disconnect_terminates_once() {
    LocalSet::new()
        .run_until(async {
            let coordinator = shared(vec![ConnectorDescriptor::injected(true)]);
            let backend = SimulatedBackend::new(coordinator.clone(), Ok(ADDRESS.to_string()));

            coordinator
                .borrow_mut()
                .select_connector("injected", &backend)
                .unwrap();
            backend.settle().await;

            coordinator.borrow_mut().disconnect(&backend);
            assert_eq!(backend.terminated.get(), 1);
            assert_eq!(coordinator.borrow().state(), &ConnectionState::Disconnected);
        })
        .await;
}

#[test]
fn detector_shutdown_stops_updates() {
    let window = Rc::new(Window::default());
    let coordinator = shared(vec![ConnectorDescriptor::injected(true)]);

    let mut detector = ProviderDetector::new(window.clone());
    let sink = coordinator.clone();
    detector.subscribe(move |snap| sink.borrow_mut().snapshot_changed(snap.clone()));
    detector.shutdown();

    window.ethereum.set(Some(ProviderFlags::metamask()));
    detector.refresh(DetectTrigger::ProviderInitialized);

    assert_eq!(coordinator.borrow().snapshot(), &ProviderSnapshot::default());
}

#[test]
fn remounted_detector_clears_stale_snapshot() {
    // The coordinator outlives the view; it last saw MetaMask
    let coordinator = shared(vec![
        ConnectorDescriptor::injected(true),
        ConnectorDescriptor::named("metaMask", "MetaMask", true),
    ]);
    coordinator
        .borrow_mut()
        .snapshot_changed(walletgate_core::detect(Some(&ProviderFlags::metamask())));

    // Extension removed, view mounted again with a fresh detector
    let window = Rc::new(Window::default());
    let mut detector = ProviderDetector::new(window.clone());
    let sink = coordinator.clone();
    detector.subscribe(move |snap| sink.borrow_mut().snapshot_changed(snap.clone()));
    assert!(detector.refresh(DetectTrigger::Initial).is_some());

    let c = coordinator.borrow();
    assert!(!c.snapshot().has_any_provider);
    assert!(!c.is_selectable(&c.connectors()[1]));
    assert_eq!(c.provider_notice(), Some(ConnectionError::ProviderAbsent));
}
