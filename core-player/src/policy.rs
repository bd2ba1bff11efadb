//! # Operation Policies
//!
//! Per-operation rules describing whether a command must wait for the widget
//! to confirm a state transition before its future resolves.
//!
//! Only four operations are state-sensitive. Everything else dispatches and
//! resolves immediately, regardless of strict mode.

use crate::command::Operation;
use crate::state::PlayerState;
use std::time::Duration;

/// How long state-sensitive seek/stop commands wait for a transition before
/// giving up and resolving anyway.
const STATE_CHANGE_TIMEOUT: Duration = Duration::from_secs(3);

/// State-confirmation policy for one operation.
///
/// Immutable; defined once per operation in [`Operation::policy`].
#[derive(Debug, Clone, Copy)]
pub struct OperationPolicy {
    /// States that satisfy the wait. `None` means any transition satisfies it
    /// (only meaningful together with `state_change_required`).
    pub acceptable_states: Option<&'static [PlayerState]>,
    /// Force a wait even when the post-dispatch state is already acceptable.
    ///
    /// TRICKY: operations like seeking can land in the same state they
    /// started in without emitting a distinguishable transition up front, so
    /// an already-acceptable state must not short-circuit the wait.
    pub state_change_required: bool,
    /// Upper bound on the wait. Expiry is a forced, non-error completion.
    pub timeout: Option<Duration>,
}

impl OperationPolicy {
    /// Whether a state-confirmation wait is required given the widget state
    /// observed immediately after dispatch.
    pub fn requires_wait(&self, state_after_dispatch: PlayerState) -> bool {
        if self.state_change_required {
            return true;
        }
        match self.acceptable_states {
            Some(states) => !states.contains(&state_after_dispatch),
            None => false,
        }
    }

    /// Whether `state` satisfies the wait.
    ///
    /// With no acceptable set configured, any observed transition counts.
    pub fn is_satisfied_by(&self, state: PlayerState) -> bool {
        match self.acceptable_states {
            Some(states) => states.contains(&state),
            None => true,
        }
    }
}

const PAUSE: OperationPolicy = OperationPolicy {
    acceptable_states: Some(&[PlayerState::Ended, PlayerState::Paused]),
    state_change_required: false,
    timeout: None,
};

const PLAY: OperationPolicy = OperationPolicy {
    acceptable_states: Some(&[PlayerState::Ended, PlayerState::Playing]),
    state_change_required: false,
    timeout: None,
};

const SEEK_TO: OperationPolicy = OperationPolicy {
    acceptable_states: Some(&[
        PlayerState::Ended,
        PlayerState::Playing,
        PlayerState::Paused,
    ]),
    state_change_required: true,
    timeout: Some(STATE_CHANGE_TIMEOUT),
};

const STOP: OperationPolicy = OperationPolicy {
    acceptable_states: Some(&[
        PlayerState::Unstarted,
        PlayerState::Ended,
        PlayerState::Paused,
        PlayerState::Cued,
    ]),
    state_change_required: true,
    timeout: Some(STATE_CHANGE_TIMEOUT),
};

impl Operation {
    /// The state-confirmation policy for this operation, if it has one.
    pub fn policy(self) -> Option<&'static OperationPolicy> {
        match self {
            Operation::Pause => Some(&PAUSE),
            Operation::Play => Some(&PLAY),
            Operation::SeekTo => Some(&SEEK_TO),
            Operation::Stop => Some(&STOP),
            _ => None,
        }
    }
}
