//! Session configuration.

use serde::{Deserialize, Serialize};

/// Behavior shared by every overlay opened in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Turn configuration errors (a dialog missing its title, content or
    /// button labels) into a failed debug assertion in addition to logging
    /// them. Defaults to on in debug builds.
    pub strict_configuration: bool,

    /// Escape dismisses the front-most overlay.
    pub dismiss_on_escape: bool,

    /// Clicking outside the active focus trap dismisses the front-most overlay.
    pub dismiss_on_backdrop: bool,

    /// `y` confirms and `n` cancels the front-most confirmation dialog.
    pub shortcuts: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            strict_configuration: cfg!(debug_assertions),
            dismiss_on_escape: true,
            dismiss_on_backdrop: true,
            shortcuts: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only log configuration errors, never assert.
    pub fn lenient(mut self) -> Self {
        self.strict_configuration = false;
        self
    }

    pub fn dismiss_on_escape(mut self, enabled: bool) -> Self {
        self.dismiss_on_escape = enabled;
        self
    }

    pub fn dismiss_on_backdrop(mut self, enabled: bool) -> Self {
        self.dismiss_on_backdrop = enabled;
        self
    }

    pub fn shortcuts(mut self, enabled: bool) -> Self {
        self.shortcuts = enabled;
        self
    }
}
