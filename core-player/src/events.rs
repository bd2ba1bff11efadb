//! # Player Events
//!
//! The widget's native event vocabulary and the normalized handler-name
//! transform used when installing callbacks at construction time.
//!
//! Raw event names (`stateChange`, `error`, ...) are what the facade
//! publishes on the event bus; the widget itself invokes callbacks under the
//! normalized `on`-prefixed names (`onStateChange`, ...). The transform is
//! computed from the raw name rather than hand-listed, so the two tables can
//! never drift apart.

use core_runtime::events::EventBus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw events raised by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// The widget finished initializing and is ready for commands.
    Ready,
    /// Playback state changed.
    StateChange,
    /// Playback quality changed.
    PlaybackQualityChange,
    /// Playback rate changed.
    PlaybackRateChange,
    /// The widget reported an error.
    Error,
    /// The widget's control API surface changed.
    ApiChange,
    /// Volume or mute status changed.
    VolumeChange,
}

impl EventKind {
    /// Every event the widget can raise.
    pub const ALL: &'static [EventKind] = &[
        EventKind::Ready,
        EventKind::StateChange,
        EventKind::PlaybackQualityChange,
        EventKind::PlaybackRateChange,
        EventKind::Error,
        EventKind::ApiChange,
        EventKind::VolumeChange,
    ];

    /// The raw event name the facade publishes under.
    pub fn raw_name(self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::StateChange => "stateChange",
            EventKind::PlaybackQualityChange => "playbackQualityChange",
            EventKind::PlaybackRateChange => "playbackRateChange",
            EventKind::Error => "error",
            EventKind::ApiChange => "apiChange",
            EventKind::VolumeChange => "volumeChange",
        }
    }

    /// The normalized callback name the widget invokes.
    pub fn handler_name(self) -> String {
        normalized_handler_name(self.raw_name())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_name())
    }
}

/// Derives the normalized handler name from a raw event name:
/// `"on"` + capitalized first letter (`stateChange` -> `onStateChange`).
pub fn normalized_handler_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

/// One event republished on the generic emitter.
///
/// The payload is whatever the widget handed the callback, forwarded without
/// inspection or transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEvent {
    pub kind: EventKind,
    pub payload: Value,
}

/// The emitter type shared by the facade and its subscribers.
pub type PlayerEventBus = EventBus<PlayerEvent>;
