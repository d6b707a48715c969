//! The confirmation dialog component.

use focusdom::{Element, Key, Modifiers, Role};
use uuid::Uuid;

use crate::context::DialogContext;
use crate::error::DialogError;
use crate::gesture::CloseGesture;
use crate::options::ConfirmOptions;
use crate::overlay::{Closing, Overlay};
use crate::policy::{resolve_initial_focus_target, FocusTarget};

type OnClose = Box<dyn FnOnce(CloseGesture, &Closing<'_>) + Send>;

/// A modal dialog with a title, a body, and cancel/confirm actions.
///
/// Every way of closing it (either action, Escape, a backdrop click) ends in
/// exactly one call of `on_close`. Unmounting is left to the caller, usually
/// from inside `on_close` via [`Closing::unmount`].
///
/// # Example
///
/// ```ignore
/// let dialog = ConfirmationDialog::new(
///     ConfirmOptions::new("Delete branch", "This cannot be undone.")
///         .confirm_button_content("Delete")
///         .confirm_button_type(ConfirmButtonType::Danger),
///     |gesture, closing| {
///         if gesture.confirmed() {
///             delete_branch();
///         }
///         let _ = closing.unmount();
///     },
/// );
/// cx.show(dialog)?;
/// ```
pub struct ConfirmationDialog {
    id: String,
    options: ConfirmOptions,
    on_close: Option<OnClose>,
}

impl ConfirmationDialog {
    pub fn new(
        options: ConfirmOptions,
        on_close: impl FnOnce(CloseGesture, &Closing<'_>) + Send + 'static,
    ) -> Self {
        Self {
            id: format!("confirm-{}", Uuid::new_v4().simple()),
            options,
            on_close: Some(Box::new(on_close)),
        }
    }

    pub fn options(&self) -> &ConfirmOptions {
        &self.options
    }

    pub fn validate(&self) -> Result<(), DialogError> {
        self.options.validate()
    }

    /// ID of the dialog container (the focus trap root).
    pub fn container_id(&self) -> &str {
        &self.id
    }

    pub fn title_id(&self) -> String {
        format!("{}-title", self.id)
    }

    pub fn body_id(&self) -> String {
        format!("{}-body", self.id)
    }

    pub fn cancel_id(&self) -> String {
        format!("{}-cancel", self.id)
    }

    pub fn confirm_id(&self) -> String {
        format!("{}-confirm", self.id)
    }

    pub fn initial_focus_target(&self) -> FocusTarget {
        resolve_initial_focus_target(self.options.confirm_button_type)
    }

    /// The gesture produced by activating `target`, if it is one of the actions.
    pub fn gesture_for(&self, target: &str) -> Option<CloseGesture> {
        if target == self.confirm_id() {
            Some(CloseGesture::Confirm)
        } else if target == self.cancel_id() {
            Some(CloseGesture::Cancel)
        } else {
            None
        }
    }
}

impl Overlay for ConfirmationDialog {
    fn name(&self) -> &str {
        "ConfirmationDialog"
    }

    fn element(&self) -> Element {
        Element::col()
            .id(self.id.clone())
            .role(Role::Dialog)
            .aria_modal(true)
            .labelled_by(self.title_id())
            .described_by(self.body_id())
            .bordered(true)
            .padding(1)
            .gap(1)
            .child(
                Element::text(self.options.title.clone())
                    .id(self.title_id())
                    .role(Role::Heading),
            )
            .child(Element::text(self.options.content.clone()).id(self.body_id()))
            .child(
                Element::row()
                    .gap(2)
                    .child(Element::button(self.options.cancel_button_content.clone()).id(self.cancel_id()))
                    .child(Element::button(self.options.confirm_button_content.clone()).id(self.confirm_id())),
            )
    }

    fn initial_focus(&self) -> Vec<String> {
        let target = match self.initial_focus_target() {
            FocusTarget::Confirm => self.confirm_id(),
            FocusTarget::Cancel => self.cancel_id(),
        };
        vec![target, self.id.clone()]
    }

    fn on_activate(&mut self, target: &str, _cx: &DialogContext) -> Option<CloseGesture> {
        self.gesture_for(target)
    }

    fn on_key(&mut self, key: Key, modifiers: Modifiers, cx: &DialogContext) -> Option<CloseGesture> {
        if !modifiers.none() || !cx.config().shortcuts {
            return None;
        }
        match key {
            Key::Char('y') => Some(CloseGesture::Confirm),
            Key::Char('n') => Some(CloseGesture::Cancel),
            _ => None,
        }
    }

    fn on_close(&mut self, gesture: CloseGesture, closing: &Closing<'_>) {
        match self.on_close.take() {
            Some(on_close) => on_close(gesture, closing),
            None => log::warn!("[dialog] {} closed twice ({gesture})", self.id),
        }
    }
}
