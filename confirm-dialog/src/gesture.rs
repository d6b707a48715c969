use serde::{Deserialize, Serialize};

/// Why a dialog closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CloseGesture {
    /// The confirm action was activated.
    Confirm,
    /// The cancel action was activated.
    Cancel,
    /// Escape or a click on the backdrop.
    Dismiss,
}

impl CloseGesture {
    /// Only an explicit confirmation counts as yes.
    pub fn confirmed(&self) -> bool {
        matches!(self, CloseGesture::Confirm)
    }
}

impl std::fmt::Display for CloseGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CloseGesture::Confirm => "confirm",
            CloseGesture::Cancel => "cancel",
            CloseGesture::Dismiss => "dismiss",
        };
        f.write_str(name)
    }
}
