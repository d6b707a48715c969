//! Dialog configuration.

use serde::{Deserialize, Serialize};

use crate::error::DialogError;

/// Visual weight of the confirm action. `Danger` also moves initial focus
/// to the cancel action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmButtonType {
    #[default]
    Normal,
    Primary,
    Danger,
}

/// Everything a confirmation dialog shows. Immutable while the dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: String,
    pub content: String,
    pub cancel_button_content: String,
    pub confirm_button_content: String,
    pub confirm_button_type: ConfirmButtonType,
}

impl ConfirmOptions {
    /// Create options with the default "Cancel" / "OK" actions.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            cancel_button_content: "Cancel".to_string(),
            confirm_button_content: "OK".to_string(),
            confirm_button_type: ConfirmButtonType::Normal,
        }
    }

    pub fn cancel_button_content(mut self, content: impl Into<String>) -> Self {
        self.cancel_button_content = content.into();
        self
    }

    pub fn confirm_button_content(mut self, content: impl Into<String>) -> Self {
        self.confirm_button_content = content.into();
        self
    }

    pub fn confirm_button_type(mut self, button_type: ConfirmButtonType) -> Self {
        self.confirm_button_type = button_type;
        self
    }

    /// Check that every required piece of content is present.
    pub fn validate(&self) -> Result<(), DialogError> {
        let required = [
            ("title", &self.title),
            ("content", &self.content),
            ("cancel_button_content", &self.cancel_button_content),
            ("confirm_button_content", &self.confirm_button_content),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(DialogError::Configuration { field: *field }),
            None => Ok(()),
        }
    }
}
