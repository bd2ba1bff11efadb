//! # Player Facade Error Types

use thiserror::Error;

/// Errors surfaced by the player facade.
///
/// A bootstrap that never completes is deliberately *not* an error: commands
/// issued against an unready facade stay pending, because no universally
/// correct timeout exists for the upstream loading contract.
#[derive(Error, Debug)]
pub enum PlayerError {
    // ========================================================================
    // Configuration Errors (synchronous, at facade creation)
    // ========================================================================
    /// The caller tried to supply its own event handlers; the facade installs
    /// its own proxy table.
    #[error("Event handlers cannot be overwritten")]
    ReservedEventHandlers,

    /// The container the widget should render into does not exist.
    #[error("Container \"{0}\" does not exist")]
    ContainerNotFound(String),

    // ========================================================================
    // Widget Errors (propagated verbatim, no retry)
    // ========================================================================
    /// A dispatched widget operation failed.
    #[error("Widget operation failed: {0}")]
    Widget(String),

    /// The widget constructor failed to produce an instance.
    #[error("Widget construction failed: {0}")]
    Construction(String),
}

impl PlayerError {
    /// Returns `true` if this error was detected at facade creation time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PlayerError::ReservedEventHandlers | PlayerError::ContainerNotFound(_)
        )
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
