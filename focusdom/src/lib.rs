pub mod a11y;
pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod terminal;
pub mod trap;
pub mod types;

pub use a11y::{audit, Rule, Violation};
pub use document::Document;
pub use element::{contains, find_by_text, find_element, text_content, Content, Element};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, FocusState};
pub use layout::{hit_test, LayoutResult, Rect};
pub use overlay::{OverlayHandle, OverlayHost};
pub use terminal::Terminal;
pub use trap::{FocusMemento, FocusTrapController, TrapId};
pub use types::*;
