//! Integration tests for the deferred command facade.
//!
//! These exercise the full path — readiness gate, dispatch, state
//! confirmation, event proxying — against a scripted fake widget.

use async_trait::async_trait;
use core_player::{
    Command, EventKind, FacadeTarget, PlayerBootstrap, PlayerConstructor, PlayerError,
    PlayerFacade, PlayerHandle, PlayerOptions, PlayerState, Result, SharedBootstrap,
};
use core_player::proxy::HandlerTable;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

// ============================================================================
// Fakes
// ============================================================================

/// A scripted widget: state only changes when the test says so.
struct FakeWidget {
    state: Mutex<PlayerState>,
    state_tx: broadcast::Sender<PlayerState>,
    calls: Mutex<Vec<Command>>,
    subscriptions: AtomicUsize,
    fail_next: Mutex<Option<String>>,
}

impl FakeWidget {
    fn new(initial: PlayerState) -> Arc<Self> {
        let (state_tx, _) = broadcast::channel(16);
        Arc::new(Self {
            state: Mutex::new(initial),
            state_tx,
            calls: Mutex::new(Vec::new()),
            subscriptions: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
        })
    }

    fn transition(&self, next: PlayerState) {
        *self.state.lock() = next;
        self.state_tx.send(next).ok();
    }

    fn fail_next(&self, message: &str) {
        *self.fail_next.lock() = Some(message.to_string());
    }

    fn calls(&self) -> Vec<Command> {
        self.calls.lock().clone()
    }

    fn listener_count(&self) -> usize {
        self.state_tx.receiver_count()
    }

    fn subscription_count(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }
}

fn dispatch_value(command: &Command) -> Value {
    json!({ "dispatched": command.operation().name() })
}

impl PlayerHandle for FakeWidget {
    fn dispatch(&self, command: &Command) -> Result<Value> {
        if let Some(message) = self.fail_next.lock().take() {
            return Err(PlayerError::Widget(message));
        }
        self.calls.lock().push(command.clone());
        Ok(dispatch_value(command))
    }

    fn state(&self) -> PlayerState {
        *self.state.lock()
    }

    fn state_changes(&self) -> broadcast::Receiver<PlayerState> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        self.state_tx.subscribe()
    }
}

/// Captures the handler tables the facade installs, so tests can play the
/// widget's part and fire events.
struct FakeConstructor {
    widget: Arc<FakeWidget>,
    installed: Mutex<Vec<HandlerTable>>,
    created: AtomicUsize,
}

impl FakeConstructor {
    fn new(widget: Arc<FakeWidget>) -> Arc<Self> {
        Arc::new(Self {
            widget,
            installed: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
        })
    }

    async fn wait_installed(&self) -> HandlerTable {
        loop {
            if let Some(table) = self.installed.lock().pop() {
                return table;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    async fn wait_created(&self, count: usize) {
        while self.created.load(Ordering::SeqCst) < count {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

impl PlayerConstructor for FakeConstructor {
    fn create(
        &self,
        _container_id: &str,
        _options: &PlayerOptions,
        events: HandlerTable,
    ) -> Result<Arc<dyn PlayerHandle>> {
        self.installed.lock().push(events);
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.widget.clone())
    }
}

struct FakeBootstrap {
    constructor: Arc<FakeConstructor>,
    known_container: String,
    loads: AtomicUsize,
}

impl FakeBootstrap {
    fn new(constructor: Arc<FakeConstructor>, known_container: &str) -> Arc<Self> {
        Arc::new(Self {
            constructor,
            known_container: known_container.to_string(),
            loads: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PlayerBootstrap for FakeBootstrap {
    fn container_exists(&self, container_id: &str) -> bool {
        container_id == self.known_container
    }

    async fn ensure_loaded(&self) -> Arc<dyn PlayerConstructor> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.constructor.clone()
    }
}

/// Bootstrap for facades built around an existing handle; never consulted.
struct UnusedBootstrap;

#[async_trait]
impl PlayerBootstrap for UnusedBootstrap {
    fn container_exists(&self, _container_id: &str) -> bool {
        false
    }

    async fn ensure_loaded(&self) -> Arc<dyn PlayerConstructor> {
        unreachable!("bootstrap should not run for an existing handle");
    }
}

fn facade_for(widget: Arc<FakeWidget>, strict: bool) -> PlayerFacade {
    let bootstrap = Arc::new(SharedBootstrap::new(Arc::new(UnusedBootstrap)));
    PlayerFacade::create(
        bootstrap,
        FacadeTarget::Existing(widget),
        PlayerOptions::default(),
        strict,
    )
    .unwrap()
}

// ============================================================================
// Dispatch Without State Confirmation
// ============================================================================

#[tokio::test]
async fn test_non_strict_facade_never_registers_a_listener() {
    let widget = FakeWidget::new(PlayerState::Cued);
    let facade = facade_for(widget.clone(), false);

    // Play is state-sensitive, but strict mode is off.
    let value = facade.play().await.unwrap();
    assert_eq!(value, json!({ "dispatched": "play" }));
    assert_eq!(widget.subscription_count(), 0);
    assert_eq!(widget.calls(), vec![Command::Play]);
}

#[tokio::test]
async fn test_unpoliced_operation_resolves_immediately_in_strict_mode() {
    let widget = FakeWidget::new(PlayerState::Playing);
    let facade = facade_for(widget.clone(), true);

    let value = facade.get_current_time().await.unwrap();
    assert_eq!(value, json!({ "dispatched": "getCurrentTime" }));
    assert_eq!(widget.subscription_count(), 0);
}

#[tokio::test]
async fn test_already_acceptable_state_skips_the_wait() {
    // Pause accepts {Ended, Paused}; the widget is already Ended after the
    // call and pause has no forced-change rule, so no wait happens.
    let widget = FakeWidget::new(PlayerState::Ended);
    let facade = facade_for(widget.clone(), true);

    let value = facade.pause().await.unwrap();
    assert_eq!(value, json!({ "dispatched": "pause" }));
    assert_eq!(widget.listener_count(), 0);
}

#[tokio::test]
async fn test_dispatch_error_propagates_without_wait() {
    let widget = FakeWidget::new(PlayerState::Playing);
    widget.fail_next("device lost");
    let facade = facade_for(widget.clone(), true);

    let error = facade.play().await.unwrap_err();
    assert!(matches!(error, PlayerError::Widget(message) if message == "device lost"));
    assert!(widget.calls().is_empty());
    assert_eq!(widget.listener_count(), 0);
}

// ============================================================================
// State-Confirmation Waits
// ============================================================================

#[tokio::test]
async fn test_forced_wait_holds_even_when_state_already_acceptable() {
    // Seeking while playing lands back in Playing, which is acceptable, but
    // the seek policy forces a wait for an actual notification.
    let widget = FakeWidget::new(PlayerState::Playing);
    let facade = facade_for(widget.clone(), true);

    let task = tokio::spawn({
        let facade = facade.clone();
        async move { facade.seek_to(20.0, true).await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(!task.is_finished());
    assert_eq!(widget.listener_count(), 1);

    // Same state as before the seek; the notification itself completes it.
    widget.transition(PlayerState::Playing);

    let value = task.await.unwrap().unwrap();
    assert_eq!(value, json!({ "dispatched": "seekTo" }));
    assert_eq!(widget.listener_count(), 0);
}

#[tokio::test]
async fn test_wait_ignores_unacceptable_states_and_resolves_on_match() {
    // Play accepts {Ended, Playing}; the widget stays Paused after dispatch.
    let widget = FakeWidget::new(PlayerState::Paused);
    let facade = facade_for(widget.clone(), true);

    let task = tokio::spawn({
        let facade = facade.clone();
        async move { facade.play().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!task.is_finished());

    // First notification reports an unacceptable state: still waiting.
    widget.transition(PlayerState::Buffering);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!task.is_finished());

    // Second notification matches: resolves now.
    widget.transition(PlayerState::Playing);
    let value = task.await.unwrap().unwrap();
    assert_eq!(value, json!({ "dispatched": "play" }));
    assert_eq!(widget.listener_count(), 0);

    // A spurious notification after resolution has no observable effect.
    widget.transition(PlayerState::Ended);
    assert_eq!(widget.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_forces_resolution_at_the_deadline() {
    let widget = FakeWidget::new(PlayerState::Playing);
    let facade = facade_for(widget.clone(), true);

    let start = tokio::time::Instant::now();
    let value = facade.seek_to(5.0, false).await.unwrap();

    // No notification ever arrives; the seek policy's 3s timeout resolves
    // the command, not before.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(3));
    assert!(elapsed < Duration::from_secs(3) + Duration::from_millis(50));
    assert_eq!(value, json!({ "dispatched": "seekTo" }));
    assert_eq!(widget.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_timeout_also_bounded() {
    let widget = FakeWidget::new(PlayerState::Playing);
    let facade = facade_for(widget.clone(), true);

    let start = tokio::time::Instant::now();
    facade.stop().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert_eq!(widget.listener_count(), 0);
}

// ============================================================================
// Readiness & Construction
// ============================================================================

#[tokio::test]
async fn test_commands_queue_until_ready_and_duplicate_ready_is_ignored() {
    let widget = FakeWidget::new(PlayerState::Cued);
    let constructor = FakeConstructor::new(widget.clone());
    let bootstrap = FakeBootstrap::new(constructor.clone(), "player");
    let shared = Arc::new(SharedBootstrap::new(
        bootstrap.clone() as Arc<dyn PlayerBootstrap>
    ));

    let facade = PlayerFacade::create(
        shared,
        FacadeTarget::Container("player".to_string()),
        PlayerOptions::default().with_media_id("abc123"),
        false,
    )
    .unwrap();
    assert!(!facade.is_ready());

    // Issue a command before the widget exists.
    let queued = tokio::spawn({
        let facade = facade.clone();
        async move { facade.play().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!queued.is_finished());
    assert!(widget.calls().is_empty());

    // The widget comes up and reports ready twice.
    let table = constructor.wait_installed().await;
    assert!(table.dispatch("onReady", json!(null)));
    assert!(table.dispatch("onReady", json!(null)));

    // The queued command now executes against the resolved handle.
    queued.await.unwrap().unwrap();
    assert!(facade.is_ready());
    assert_eq!(widget.calls(), vec![Command::Play]);

    // Later commands hit the same widget instance.
    facade.pause().await.unwrap();
    assert_eq!(widget.calls(), vec![Command::Play, Command::Pause]);
    assert_eq!(bootstrap.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shared_bootstrap_loads_once_across_facades() {
    let widget = FakeWidget::new(PlayerState::Cued);
    let constructor = FakeConstructor::new(widget.clone());
    let bootstrap = FakeBootstrap::new(constructor.clone(), "player");
    let shared = Arc::new(SharedBootstrap::new(
        bootstrap.clone() as Arc<dyn PlayerBootstrap>
    ));

    let _first = PlayerFacade::create(
        shared.clone(),
        FacadeTarget::Container("player".to_string()),
        PlayerOptions::default(),
        false,
    )
    .unwrap();
    let _second = PlayerFacade::create(
        shared,
        FacadeTarget::Container("player".to_string()),
        PlayerOptions::default(),
        false,
    )
    .unwrap();

    constructor.wait_created(2).await;
    assert_eq!(bootstrap.loads.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Event Proxying
// ============================================================================

#[tokio::test]
async fn test_proxied_events_reach_subscribers_exactly_once() {
    let widget = FakeWidget::new(PlayerState::Cued);
    let constructor = FakeConstructor::new(widget.clone());
    let bootstrap = FakeBootstrap::new(constructor.clone(), "player");
    let shared = Arc::new(SharedBootstrap::new(
        bootstrap as Arc<dyn PlayerBootstrap>
    ));

    let facade = PlayerFacade::create(
        shared,
        FacadeTarget::Container("player".to_string()),
        PlayerOptions::default(),
        false,
    )
    .unwrap();
    let mut events = facade.subscribe();

    let table = constructor.wait_installed().await;
    table.dispatch("onReady", json!(null));

    let ready = events.recv().await.unwrap();
    assert_eq!(ready.kind, EventKind::Ready);

    let payload = json!({ "data": 2, "extra": ["kept", "as-is"] });
    assert!(table.dispatch("onStateChange", payload.clone()));

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, EventKind::StateChange);
    assert_eq!(event.payload, payload);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_kind_filtered_subscription_skips_other_events() {
    let widget = FakeWidget::new(PlayerState::Cued);
    let constructor = FakeConstructor::new(widget.clone());
    let bootstrap = FakeBootstrap::new(constructor.clone(), "player");
    let shared = Arc::new(SharedBootstrap::new(
        bootstrap as Arc<dyn PlayerBootstrap>
    ));

    let facade = PlayerFacade::create(
        shared,
        FacadeTarget::Container("player".to_string()),
        PlayerOptions::default(),
        false,
    )
    .unwrap();
    let mut errors = facade.subscribe_kind(EventKind::Error);

    let table = constructor.wait_installed().await;
    table.dispatch("onReady", json!(null));
    table.dispatch("onStateChange", json!({ "data": 1 }));
    table.dispatch("onError", json!({ "code": 101 }));

    let event = errors.recv().await.unwrap();
    assert_eq!(event.kind, EventKind::Error);
    assert_eq!(event.payload, json!({ "code": 101 }));
}
