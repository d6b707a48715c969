pub mod config;
pub mod context;
pub mod dialog;
pub mod error;
pub mod gesture;
pub mod lifecycle;
pub mod options;
pub mod overlay;
pub mod policy;
pub mod resolver;
pub mod runtime;
pub mod session;

pub use config::SessionConfig;
pub use context::{Confirmation, DialogContext};
pub use dialog::ConfirmationDialog;
pub use error::DialogError;
pub use gesture::CloseGesture;
pub use lifecycle::{DialogState, Lifecycle};
pub use options::{ConfirmButtonType, ConfirmOptions};
pub use overlay::{Closing, Overlay};
pub use policy::{resolve_initial_focus_target, FocusTarget};
pub use resolver::Resolver;
pub use runtime::{run, RuntimeError};
pub use session::Session;

pub mod prelude {
    pub use crate::config::SessionConfig;
    pub use crate::context::{Confirmation, DialogContext};
    pub use crate::dialog::ConfirmationDialog;
    pub use crate::gesture::CloseGesture;
    pub use crate::options::{ConfirmButtonType, ConfirmOptions};
    pub use crate::overlay::{Closing, Overlay};
    pub use crate::session::Session;

    pub use focusdom::{Element, Key, Role};
}
