//! Which action receives focus when a confirmation dialog opens.

use crate::options::ConfirmButtonType;

/// One of the two built-in dialog actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Confirm,
    Cancel,
}

/// Destructive confirmations start on cancel so a stray Enter is harmless.
/// Everything else starts on confirm.
pub fn resolve_initial_focus_target(button_type: ConfirmButtonType) -> FocusTarget {
    match button_type {
        ConfirmButtonType::Danger => FocusTarget::Cancel,
        ConfirmButtonType::Normal | ConfirmButtonType::Primary => FocusTarget::Confirm,
    }
}
