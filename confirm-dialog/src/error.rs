//! Error types for the dialog core.

use focusdom::OverlayHandle;
use thiserror::Error;

use crate::lifecycle::DialogState;

/// Errors absorbed at the component/context boundary.
///
/// None of these reach the end user: they are logged and the safe fallback
/// (refuse to render, ignore the transition) is taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// Required dialog content is missing.
    #[error("Dialog configuration is missing required content: {field}")]
    Configuration {
        /// The empty field.
        field: &'static str,
    },

    /// A lifecycle transition that the state machine does not allow.
    #[error("Invalid dialog transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// State the dialog was in.
        from: DialogState,
        /// State that was requested.
        to: DialogState,
    },

    /// The overlay is not (or no longer) mounted.
    #[error("Unknown overlay {0}")]
    UnknownOverlay(OverlayHandle),
}
