//! # Player Options
//!
//! Construction options passed through to the widget constructor. The facade
//! itself inspects only the reserved `events` field; everything else is the
//! widget's business.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for constructing the widget instance.
///
/// Ignored when the facade wraps an already-live widget handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// Rendered width in pixels.
    pub width: Option<u32>,
    /// Rendered height in pixels.
    pub height: Option<u32>,
    /// Media item to cue at construction.
    pub media_id: Option<String>,
    /// Opaque widget-specific playback parameters, forwarded untouched.
    pub playback_params: Option<Value>,
    /// Reserved. The facade installs its own handler table; supplying a value
    /// here fails facade creation with `ReservedEventHandlers`.
    pub events: Option<Value>,
}

impl PlayerOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    pub fn with_playback_params(mut self, params: Value) -> Self {
        self.playback_params = Some(params);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let options = PlayerOptions::default()
            .with_size(640, 360)
            .with_media_id("abc123")
            .with_playback_params(json!({ "autoplay": 0 }));

        assert_eq!(options.width, Some(640));
        assert_eq!(options.height, Some(360));
        assert_eq!(options.media_id.as_deref(), Some("abc123"));
        assert!(options.events.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: PlayerOptions =
            serde_json::from_value(json!({ "media_id": "xyz" })).unwrap();
        assert_eq!(options.media_id.as_deref(), Some("xyz"));
        assert!(options.width.is_none());
    }
}
