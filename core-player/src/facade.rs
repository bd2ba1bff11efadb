//! # Player Facade
//!
//! The deferred command facade around the widget. Callers invoke control
//! operations immediately, before the widget exists; each command queues
//! behind the readiness gate, dispatches once the widget is live, and — in
//! strict mode, for state-sensitive operations — performs a
//! state-confirmation wait before resolving.
//!
//! ## Data flow
//!
//! ```text
//! caller ──> PlayerFacade::invoke ──> ReadinessGate::wait
//!                                          │
//!                                          ▼
//!                                 PlayerHandle::dispatch
//!                                          │
//!                          (policy + strict mode decide)
//!                                          │
//!                                          ▼
//!                              state-confirmation wait
//!                        (state match  vs  policy timeout)
//!                                          │
//!                                          ▼
//!                            dispatch value back to caller
//! ```
//!
//! Independently, the widget's native callbacks flow through the handler
//! table built by [`crate::proxy::proxy_events`] onto the event bus, where
//! subscribers receive them under raw event names.
//!
//! ## Concurrency
//!
//! Commands in flight race independently to the shared widget handle; the
//! facade imposes no mutual exclusion and no relative ordering between
//! concurrent commands. The only managed resources are the per-invocation
//! state-change receiver and timeout, both of which are released on every
//! resolution path by being dropped when the wait returns.

use crate::command::Command;
use crate::config::PlayerOptions;
use crate::error::{PlayerError, Result};
use crate::events::{EventKind, PlayerEvent, PlayerEventBus};
use crate::handle::{PlayerHandle, SharedBootstrap};
use crate::policy::OperationPolicy;
use crate::proxy::proxy_events;
use crate::readiness::ReadinessGate;
use crate::state::PlayerState;
use core_runtime::events::{EventStream, Receiver, RecvError};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

/// What the facade should wrap.
pub enum FacadeTarget {
    /// An already-live widget handle; the readiness gate resolves
    /// immediately and construction options are ignored.
    Existing(Arc<dyn PlayerHandle>),
    /// A host container to construct the widget into once the bootstrap
    /// completes.
    Container(String),
}

impl std::fmt::Debug for FacadeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacadeTarget::Existing(_) => f.write_str("FacadeTarget::Existing"),
            FacadeTarget::Container(id) => write!(f, "FacadeTarget::Container({:?})", id),
        }
    }
}

/// The deferred command facade. One facade wraps exactly one widget
/// instance; clones share the same gate and emitter.
#[derive(Clone)]
pub struct PlayerFacade {
    gate: ReadinessGate,
    bus: PlayerEventBus,
    strict: bool,
}

impl PlayerFacade {
    /// Creates a facade around `target`.
    ///
    /// For a container target this validates the options and container
    /// synchronously, then spawns the bootstrap/construction sequence; the
    /// readiness gate resolves when the widget raises its first `ready`
    /// event. Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::ReservedEventHandlers`] if `options.events` is set
    /// - [`PlayerError::ContainerNotFound`] if a container target cannot be
    ///   resolved at call time
    pub fn create(
        bootstrap: Arc<SharedBootstrap>,
        target: FacadeTarget,
        options: PlayerOptions,
        strict: bool,
    ) -> Result<PlayerFacade> {
        if options.events.is_some() {
            return Err(PlayerError::ReservedEventHandlers);
        }

        let bus = PlayerEventBus::default();
        let (resolver, gate) = ReadinessGate::channel();

        match target {
            FacadeTarget::Existing(handle) => {
                resolver.resolve(handle);
            }
            FacadeTarget::Container(container_id) => {
                if !bootstrap.container_exists(&container_id) {
                    return Err(PlayerError::ContainerNotFound(container_id));
                }

                let table = proxy_events(&bus);
                // Subscribe before the constructor runs so a ready event
                // raised during construction cannot be missed.
                let mut ready = EventStream::new(bus.subscribe())
                    .filter(|event: &PlayerEvent| event.kind == EventKind::Ready);

                tokio::spawn(async move {
                    let constructor = bootstrap.constructor().await;
                    let handle = match constructor.create(&container_id, &options, table) {
                        Ok(handle) => handle,
                        Err(error) => {
                            // The gate stays pending; callers observe a hang,
                            // mirroring a stalled bootstrap.
                            warn!(%container_id, %error, "widget construction failed");
                            return;
                        }
                    };

                    loop {
                        match ready.recv().await {
                            Ok(_) => {
                                debug!(%container_id, "widget ready");
                                resolver.resolve(handle);
                                break;
                            }
                            Err(RecvError::Lagged(_)) => continue,
                            // Facade dropped before the widget became ready.
                            Err(RecvError::Closed) => break,
                        }
                    }
                });
            }
        }

        Ok(PlayerFacade { gate, bus, strict })
    }

    /// Whether the wrapped widget is available yet.
    pub fn is_ready(&self) -> bool {
        self.gate.is_resolved()
    }

    /// Whether state-sensitive commands wait for confirmation.
    pub fn strict(&self) -> bool {
        self.strict
    }

    // ========================================================================
    // Event Subscriptions
    // ========================================================================

    /// Subscribes to all proxied widget events. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<PlayerEvent> {
        self.bus.subscribe()
    }

    /// Subscribes to one event kind only.
    pub fn subscribe_kind(&self, kind: EventKind) -> EventStream<PlayerEvent> {
        EventStream::new(self.bus.subscribe()).filter(move |event| event.kind == kind)
    }

    /// The underlying emitter, for callers that want to share it.
    pub fn events(&self) -> &PlayerEventBus {
        &self.bus
    }

    // ========================================================================
    // Command Dispatch
    // ========================================================================

    /// Dispatches `command` once the widget is ready, waiting for state
    /// confirmation when strict mode and the operation's policy require it.
    ///
    /// Resolves with the dispatch return value in every case; a
    /// state-confirmation timeout is a forced completion, not a failure.
    #[instrument(skip(self, command), fields(operation = %command.operation()))]
    pub async fn invoke(&self, command: Command) -> Result<Value> {
        let handle = self.gate.wait().await;

        let policy = if self.strict {
            command.operation().policy()
        } else {
            None
        };
        let Some(policy) = policy else {
            debug!("dispatching without state confirmation");
            return handle.dispatch(&command);
        };

        // Subscribe before dispatching: a transition raised between dispatch
        // and the wait must not be missed.
        let listener = handle.state_changes();
        let value = handle.dispatch(&command)?;
        let state_after_dispatch = handle.state();

        if policy.requires_wait(state_after_dispatch) {
            debug!(?state_after_dispatch, "waiting for state confirmation");
            confirm_state(handle.as_ref(), policy, listener).await;
        }

        Ok(value)
    }

    // ========================================================================
    // Loading & Cueing
    // ========================================================================

    pub async fn cue_by_id(
        &self,
        media_id: impl Into<String>,
        start_seconds: Option<f64>,
    ) -> Result<Value> {
        self.invoke(Command::CueById {
            media_id: media_id.into(),
            start_seconds,
        })
        .await
    }

    pub async fn load_by_id(
        &self,
        media_id: impl Into<String>,
        start_seconds: Option<f64>,
    ) -> Result<Value> {
        self.invoke(Command::LoadById {
            media_id: media_id.into(),
            start_seconds,
        })
        .await
    }

    pub async fn cue_by_url(
        &self,
        url: impl Into<String>,
        start_seconds: Option<f64>,
    ) -> Result<Value> {
        self.invoke(Command::CueByUrl {
            url: url.into(),
            start_seconds,
        })
        .await
    }

    pub async fn load_by_url(
        &self,
        url: impl Into<String>,
        start_seconds: Option<f64>,
    ) -> Result<Value> {
        self.invoke(Command::LoadByUrl {
            url: url.into(),
            start_seconds,
        })
        .await
    }

    pub async fn cue_playlist(
        &self,
        playlist: Vec<String>,
        index: Option<u32>,
    ) -> Result<Value> {
        self.invoke(Command::CuePlaylist { playlist, index }).await
    }

    pub async fn load_playlist(
        &self,
        playlist: Vec<String>,
        index: Option<u32>,
    ) -> Result<Value> {
        self.invoke(Command::LoadPlaylist { playlist, index }).await
    }

    // ========================================================================
    // Playback Control
    // ========================================================================

    pub async fn play(&self) -> Result<Value> {
        self.invoke(Command::Play).await
    }

    pub async fn pause(&self) -> Result<Value> {
        self.invoke(Command::Pause).await
    }

    pub async fn stop(&self) -> Result<Value> {
        self.invoke(Command::Stop).await
    }

    pub async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<Value> {
        self.invoke(Command::SeekTo {
            seconds,
            allow_seek_ahead,
        })
        .await
    }

    pub async fn next_track(&self) -> Result<Value> {
        self.invoke(Command::NextTrack).await
    }

    pub async fn previous_track(&self) -> Result<Value> {
        self.invoke(Command::PreviousTrack).await
    }

    pub async fn play_track_at(&self, index: u32) -> Result<Value> {
        self.invoke(Command::PlayTrackAt { index }).await
    }

    // ========================================================================
    // Volume
    // ========================================================================

    pub async fn mute(&self) -> Result<Value> {
        self.invoke(Command::Mute).await
    }

    pub async fn unmute(&self) -> Result<Value> {
        self.invoke(Command::Unmute).await
    }

    pub async fn is_muted(&self) -> Result<Value> {
        self.invoke(Command::IsMuted).await
    }

    pub async fn set_volume(&self, volume: u8) -> Result<Value> {
        self.invoke(Command::SetVolume { volume }).await
    }

    pub async fn get_volume(&self) -> Result<Value> {
        self.invoke(Command::GetVolume).await
    }

    // ========================================================================
    // Playback Rate & Quality
    // ========================================================================

    pub async fn set_playback_rate(&self, rate: f64) -> Result<Value> {
        self.invoke(Command::SetPlaybackRate { rate }).await
    }

    pub async fn get_playback_rate(&self) -> Result<Value> {
        self.invoke(Command::GetPlaybackRate).await
    }

    pub async fn get_available_playback_rates(&self) -> Result<Value> {
        self.invoke(Command::GetAvailablePlaybackRates).await
    }

    pub async fn set_playback_quality(&self, quality: impl Into<String>) -> Result<Value> {
        self.invoke(Command::SetPlaybackQuality {
            quality: quality.into(),
        })
        .await
    }

    pub async fn get_playback_quality(&self) -> Result<Value> {
        self.invoke(Command::GetPlaybackQuality).await
    }

    pub async fn get_available_quality_levels(&self) -> Result<Value> {
        self.invoke(Command::GetAvailableQualityLevels).await
    }

    // ========================================================================
    // Playlist
    // ========================================================================

    pub async fn set_loop(&self, looping: bool) -> Result<Value> {
        self.invoke(Command::SetLoop { looping }).await
    }

    pub async fn set_shuffle(&self, shuffle: bool) -> Result<Value> {
        self.invoke(Command::SetShuffle { shuffle }).await
    }

    pub async fn get_playlist(&self) -> Result<Value> {
        self.invoke(Command::GetPlaylist).await
    }

    pub async fn get_playlist_index(&self) -> Result<Value> {
        self.invoke(Command::GetPlaylistIndex).await
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub async fn get_state(&self) -> Result<Value> {
        self.invoke(Command::GetState).await
    }

    pub async fn get_current_time(&self) -> Result<Value> {
        self.invoke(Command::GetCurrentTime).await
    }

    pub async fn get_duration(&self) -> Result<Value> {
        self.invoke(Command::GetDuration).await
    }

    pub async fn get_media_url(&self) -> Result<Value> {
        self.invoke(Command::GetMediaUrl).await
    }

    pub async fn get_embed_code(&self) -> Result<Value> {
        self.invoke(Command::GetEmbedCode).await
    }

    pub async fn get_loaded_fraction(&self) -> Result<Value> {
        self.invoke(Command::GetLoadedFraction).await
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn set_size(&self, width: u32, height: u32) -> Result<Value> {
        self.invoke(Command::SetSize { width, height }).await
    }

    pub async fn destroy(&self) -> Result<Value> {
        self.invoke(Command::Destroy).await
    }
}

impl std::fmt::Debug for PlayerFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerFacade")
            .field("ready", &self.is_ready())
            .field("strict", &self.strict)
            .finish()
    }
}

/// The state-confirmation wait: races state-change notifications against the
/// policy's optional timeout.
///
/// Resolution is exactly-once by construction — the receiver and the timeout
/// are both owned by this future and dropped together when it returns, so
/// neither path can fire after the other has resolved, and no notification
/// received afterwards has any effect.
async fn confirm_state(
    handle: &dyn PlayerHandle,
    policy: &OperationPolicy,
    mut listener: broadcast::Receiver<PlayerState>,
) {
    let observe = async {
        loop {
            match listener.recv().await {
                Ok(_) => {
                    // The notification only marks that a transition happened;
                    // the widget's current state is authoritative.
                    let state = handle.state();
                    if policy.is_satisfied_by(state) {
                        debug!(?state, "state confirmed");
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // Missed notifications may include the one we wanted;
                    // check the current state before waiting further.
                    if policy.is_satisfied_by(handle.state()) {
                        break;
                    }
                    warn!(missed, "state-change listener lagged");
                }
                // Widget gone; resolving beats hanging the caller.
                Err(RecvError::Closed) => break,
            }
        }
    };

    match policy.timeout {
        Some(limit) => {
            if tokio::time::timeout(limit, observe).await.is_err() {
                warn!(timeout = ?limit, "state confirmation timed out; resolving anyway");
            }
        }
        None => observe.await,
    }
}
