//! Overlays: content mounted in front of the page with its own focus trap.
//!
//! Overlays are taken out of the session while their hooks run, so a hook can
//! freely call back into the [`DialogContext`] (open another dialog, unmount
//! itself) without deadlocking.

use focusdom::{Element, Key, Modifiers, OverlayHandle};

use crate::context::DialogContext;
use crate::error::DialogError;
use crate::gesture::CloseGesture;

/// Passed to [`Overlay::on_close`].
pub struct Closing<'a> {
    handle: OverlayHandle,
    cx: &'a DialogContext,
}

impl<'a> Closing<'a> {
    pub(crate) fn new(handle: OverlayHandle, cx: &'a DialogContext) -> Self {
        Self { handle, cx }
    }

    /// The overlay being closed.
    pub fn handle(&self) -> OverlayHandle {
        self.handle
    }

    pub fn cx(&self) -> &'a DialogContext {
        self.cx
    }

    /// Unmount the closing overlay.
    pub fn unmount(&self) -> Result<(), DialogError> {
        self.cx.unmount(self.handle)
    }
}

/// Trait for anything mounted through the session's overlay host.
pub trait Overlay: Send + 'static {
    /// Get the overlay's name (for debugging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Render the overlay. The root element is the focus trap container.
    fn element(&self) -> Element;

    /// Initial focus candidates, highest priority first.
    fn initial_focus(&self) -> Vec<String> {
        Vec::new()
    }

    /// A clickable element inside the overlay was activated.
    fn on_activate(&mut self, target: &str, cx: &DialogContext) -> Option<CloseGesture> {
        let _ = (target, cx);
        None
    }

    /// A key the document did not consume, while this overlay is in front.
    fn on_key(&mut self, key: Key, modifiers: Modifiers, cx: &DialogContext) -> Option<CloseGesture> {
        let _ = (key, modifiers, cx);
        None
    }

    /// Escape or a backdrop click.
    fn on_dismiss(&mut self, cx: &DialogContext) -> Option<CloseGesture> {
        let _ = cx;
        Some(CloseGesture::Dismiss)
    }

    /// Called once, after the focus trap was released.
    fn on_close(&mut self, gesture: CloseGesture, closing: &Closing<'_>) {
        let _ = (gesture, closing);
    }
}
