//! # Event Proxy
//!
//! Builds the handler table installed into the widget at construction time.
//! Each handler republishes its event on the generic emitter under the raw
//! event name, payload untouched.
//!
//! Publishing is synchronous with respect to the invoking callback. A missing
//! subscriber is not an error; the event is simply dropped by the broadcast
//! channel.

use crate::events::{EventKind, PlayerEvent, PlayerEventBus};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Callback the widget invokes with an event payload.
pub type EventCallback = Box<dyn Fn(Value) + Send + Sync>;

/// One callback per normalized handler name, accepted by the widget at
/// construction.
pub struct HandlerTable {
    handlers: HashMap<String, EventCallback>,
}

impl HandlerTable {
    /// Invokes the handler registered under `handler_name`, forwarding the
    /// payload as-is. Returns `false` if no such handler exists.
    pub fn dispatch(&self, handler_name: &str, payload: Value) -> bool {
        match self.handlers.get(handler_name) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    /// The normalized names this table responds to.
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.handler_names())
            .finish()
    }
}

/// Builds the handler table for `bus`: one callback per known event, each
/// publishing `(kind, payload)` on the emitter.
pub fn proxy_events(bus: &PlayerEventBus) -> HandlerTable {
    let mut handlers = HashMap::new();

    for &kind in EventKind::ALL {
        let bus = bus.clone();
        let callback: EventCallback = Box::new(move |payload: Value| {
            debug!(event = kind.raw_name(), "proxying widget event");
            bus.emit(PlayerEvent { kind, payload }).ok();
        });
        handlers.insert(kind.handler_name(), callback);
    }

    HandlerTable { handlers }
}
