//! # Widget Seams
//!
//! Trait boundaries between the facade and its external collaborators: the
//! live widget instance, the widget constructor, and the script bootstrap
//! that produces the constructor.
//!
//! The widget is host-supplied; the facade only ever talks to these traits.
//! State-change listeners follow broadcast semantics: subscribing returns a
//! receiver and dropping the receiver is the unsubscribe operation, which is
//! what guarantees listener release on every resolution path of a
//! state-confirmation wait.

use crate::command::Command;
use crate::config::PlayerOptions;
use crate::error::Result;
use crate::proxy::HandlerTable;
use crate::state::PlayerState;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, OnceCell};

/// A live widget instance.
///
/// Dispatch is synchronous from the widget's point of view; the facade adds
/// all waiting behavior on top.
pub trait PlayerHandle: Send + Sync {
    /// Invokes one operation on the widget, returning its raw result.
    ///
    /// Failures propagate to the caller unchanged; the facade never retries.
    fn dispatch(&self, command: &Command) -> Result<Value>;

    /// The widget's current playback state.
    fn state(&self) -> PlayerState;

    /// Subscribes to state-change notifications. Dropping the receiver
    /// removes the listener.
    fn state_changes(&self) -> broadcast::Receiver<PlayerState>;
}

/// Constructs widget instances inside a host container.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerConstructor: Send + Sync {
    /// Creates a widget in `container_id` with the facade's handler table
    /// installed as its event callbacks.
    fn create(
        &self,
        container_id: &str,
        options: &PlayerOptions,
        events: HandlerTable,
    ) -> Result<Arc<dyn PlayerHandle>>;
}

/// Loads the widget's script resources and produces the constructor.
///
/// `ensure_loaded` has no failure path by design: if the host never finishes
/// loading, callers stay pending rather than receiving an error they could
/// not act on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerBootstrap: Send + Sync {
    /// Whether `container_id` can currently be resolved in the host document.
    fn container_exists(&self, container_id: &str) -> bool;

    /// Resolves once the widget constructor is available.
    async fn ensure_loaded(&self) -> Arc<dyn PlayerConstructor>;
}

/// Memoizing wrapper around a [`PlayerBootstrap`].
///
/// The first caller triggers the load; every later caller receives the same
/// constructor handle without re-triggering it. One `SharedBootstrap` is
/// meant to be held by whoever owns the facades' lifecycle and reused across
/// facade creations.
pub struct SharedBootstrap {
    inner: Arc<dyn PlayerBootstrap>,
    constructor: OnceCell<Arc<dyn PlayerConstructor>>,
}

impl SharedBootstrap {
    pub fn new(inner: Arc<dyn PlayerBootstrap>) -> Self {
        Self {
            inner,
            constructor: OnceCell::new(),
        }
    }

    /// Whether `container_id` can currently be resolved in the host document.
    pub fn container_exists(&self, container_id: &str) -> bool {
        self.inner.container_exists(container_id)
    }

    /// The memoized widget constructor, loading it on first use.
    pub async fn constructor(&self) -> Arc<dyn PlayerConstructor> {
        self.constructor
            .get_or_init(|| self.inner.ensure_loaded())
            .await
            .clone()
    }
}

impl std::fmt::Debug for SharedBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBootstrap")
            .field("loaded", &self.constructor.initialized())
            .finish()
    }
}
