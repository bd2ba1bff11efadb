//! Playback states reported by the embedded player widget.

use serde::{Deserialize, Serialize};

/// State of the underlying player widget.
///
/// The member set and wire codes follow the widget's published contract and
/// are append-only from the facade's perspective: codes the facade does not
/// know about are surfaced as `None` by [`PlayerState::from_code`] and never
/// treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Playback has not started yet.
    Unstarted,
    /// The current media finished playing.
    Ended,
    /// Actively playing.
    Playing,
    /// Paused by the user or a command.
    Paused,
    /// Buffering before or during playback.
    Buffering,
    /// Media is cued and ready to play.
    Cued,
}

impl PlayerState {
    /// Decodes the widget's numeric state code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayerState::Unstarted),
            0 => Some(PlayerState::Ended),
            1 => Some(PlayerState::Playing),
            2 => Some(PlayerState::Paused),
            3 => Some(PlayerState::Buffering),
            5 => Some(PlayerState::Cued),
            _ => None,
        }
    }

    /// The widget's numeric code for this state.
    pub fn code(self) -> i32 {
        match self {
            PlayerState::Unstarted => -1,
            PlayerState::Ended => 0,
            PlayerState::Playing => 1,
            PlayerState::Paused => 2,
            PlayerState::Buffering => 3,
            PlayerState::Cued => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[PlayerState] = &[
        PlayerState::Unstarted,
        PlayerState::Ended,
        PlayerState::Playing,
        PlayerState::Paused,
        PlayerState::Buffering,
        PlayerState::Cued,
    ];

    #[test]
    fn test_code_round_trip() {
        for &state in ALL {
            assert_eq!(PlayerState::from_code(state.code()), Some(state));
        }
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        assert_eq!(PlayerState::from_code(4), None);
        assert_eq!(PlayerState::from_code(6), None);
        assert_eq!(PlayerState::from_code(-2), None);
    }
}
