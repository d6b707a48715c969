//! Open/close state machine shared by every mounted overlay.

use crate::error::DialogError;

/// `Closed -> Opening -> Open -> Closing -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// Focus is being captured.
    Opening,
    Open,
    /// Focus has been released; waiting to be unmounted.
    Closing,
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: DialogState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    /// Move to `to` if the transition is allowed.
    pub fn advance(&mut self, to: DialogState) -> Result<(), DialogError> {
        use DialogState::*;

        let allowed = matches!(
            (self.state, to),
            (Closed, Opening) | (Opening, Open) | (Open, Closing) | (Closing, Closed)
        );

        if !allowed {
            return Err(DialogError::InvalidTransition {
                from: self.state,
                to,
            });
        }

        log::trace!("[lifecycle] {:?} -> {:?}", self.state, to);
        self.state = to;
        Ok(())
    }
}
