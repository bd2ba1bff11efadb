//! # Readiness Gate
//!
//! A single-resolution future signalling that the widget handle is usable.
//! Every command awaits the gate before touching the widget; commands issued
//! before resolution simply queue behind it.
//!
//! The gate never rejects. If the bootstrap or construction never completes,
//! waiters stay pending indefinitely; that is the upstream loading contract,
//! and inventing a timeout here would turn a slow host into spurious errors.

use crate::handle::PlayerHandle;
use std::sync::Arc;
use tokio::sync::watch;

type SharedHandle = Arc<dyn PlayerHandle>;

/// Waiting side of the gate. Cheap to clone; all clones observe the same
/// resolution.
#[derive(Clone)]
pub struct ReadinessGate {
    rx: watch::Receiver<Option<SharedHandle>>,
}

/// Resolving side of the gate. Held by whichever path produces the handle:
/// the facade factory (existing-handle target) or the construction task
/// (container target).
pub struct ReadinessResolver {
    tx: watch::Sender<Option<SharedHandle>>,
}

impl ReadinessGate {
    /// Creates an unresolved gate and its resolver.
    pub fn channel() -> (ReadinessResolver, ReadinessGate) {
        let (tx, rx) = watch::channel(None);
        (ReadinessResolver { tx }, ReadinessGate { rx })
    }

    /// Resolves with the widget handle once it is available.
    ///
    /// If the resolver is dropped without ever resolving, this pends forever
    /// rather than erroring.
    pub async fn wait(&self) -> SharedHandle {
        let mut rx = self.rx.clone();
        loop {
            let current = rx.borrow_and_update().as_ref().map(Arc::clone);
            if let Some(handle) = current {
                return handle;
            }
            if rx.changed().await.is_err() {
                // Resolver dropped unresolved: stalled bootstrap, stay pending.
                std::future::pending::<()>().await;
            }
        }
    }

    /// Whether the gate has already resolved.
    pub fn is_resolved(&self) -> bool {
        self.rx.borrow().is_some()
    }
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl ReadinessResolver {
    /// Resolves the gate with `handle`.
    ///
    /// At most one resolution wins; later calls (a duplicate `ready` signal,
    /// for instance) are no-ops. Returns whether this call was the one that
    /// resolved the gate.
    pub fn resolve(&self, handle: SharedHandle) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(handle);
            true
        })
    }
}

impl std::fmt::Debug for ReadinessResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessResolver")
            .field("resolved", &self.tx.borrow().is_some())
            .finish()
    }
}
