//! Dialog context - the handle callers and overlay hooks use to open, close
//! and query overlays.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{self, Poll};

use focusdom::{Document, Element, OverlayHandle, TrapId, Violation};
use tokio::sync::{mpsc, oneshot};

use crate::config::SessionConfig;
use crate::dialog::ConfirmationDialog;
use crate::error::DialogError;
use crate::gesture::CloseGesture;
use crate::lifecycle::{DialogState, Lifecycle};
use crate::options::ConfirmOptions;
use crate::overlay::{Closing, Overlay};
use crate::resolver::Resolver;

pub(crate) type PageHandler = Arc<dyn Fn(&DialogContext) + Send + Sync>;

/// A mounted overlay and the state the session keeps for it.
pub(crate) struct Entry {
    handle: OverlayHandle,
    name: String,
    trap: Option<TrapId>,
    lifecycle: Lifecycle,
    /// `None` while one of the overlay's hooks is running.
    overlay: Option<Box<dyn Overlay>>,
}

pub(crate) struct Shared {
    pub(crate) document: Document,
    pub(crate) entries: Vec<Entry>,
    pub(crate) handlers: HashMap<String, PageHandler>,
    pub(crate) config: SessionConfig,
}

impl Shared {
    fn entry_mut(&mut self, handle: OverlayHandle) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.handle == handle)
    }
}

/// Cheap, cloneable access to a session's overlays.
///
/// The lock is never held while user code (handlers, `on_close` callbacks,
/// overlay hooks) runs, so any of those may use the context again.
#[derive(Clone)]
pub struct DialogContext {
    shared: Arc<Mutex<Shared>>,
    dismissals: mpsc::UnboundedSender<OverlayHandle>,
}

impl DialogContext {
    pub(crate) fn new(
        document: Document,
        config: SessionConfig,
        dismissals: mpsc::UnboundedSender<OverlayHandle>,
    ) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                document,
                entries: Vec::new(),
                handlers: HashMap::new(),
                config,
            })),
            dismissals,
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> SessionConfig {
        self.lock().config.clone()
    }

    /// Show a confirmation dialog and wait for the user's answer.
    ///
    /// Resolves to `true` only when the confirm action closes the dialog.
    /// Cancel, Escape and backdrop clicks resolve to `false`, and so does a
    /// dialog that could not be shown because its options are incomplete.
    ///
    /// The dialog is mounted and focused before this returns; awaiting the
    /// result is optional for that.
    ///
    /// # Example
    ///
    /// ```ignore
    /// if cx.confirm(ConfirmOptions::new("Discard changes?", "Unsaved edits will be lost.")).await {
    ///     discard();
    /// }
    /// ```
    pub fn confirm(&self, options: ConfirmOptions) -> Confirmation {
        let (tx, rx) = oneshot::channel();
        let resolver = Resolver::new(tx);

        let dialog = ConfirmationDialog::new(options, {
            let resolver = resolver.clone();
            move |gesture: CloseGesture, closing: &Closing<'_>| {
                resolver.resolve(gesture.confirmed());
                if let Err(err) = closing.unmount() {
                    log::warn!("[confirm] unmount after {gesture} failed: {err}");
                }
            }
        });

        let handle = match self.show(dialog) {
            Ok(handle) => Some(handle),
            Err(_) => {
                resolver.resolve(false);
                None
            }
        };

        Confirmation { rx, handle }
    }

    /// `confirm` as a standalone, cloneable function.
    pub fn use_confirm(
        &self,
    ) -> impl Fn(ConfirmOptions) -> Confirmation + Clone + Send + Sync + 'static {
        let cx = self.clone();
        move |options| cx.confirm(options)
    }

    /// Mount a confirmation dialog. Incomplete dialogs are refused and
    /// nothing is rendered.
    pub fn show(&self, dialog: ConfirmationDialog) -> Result<OverlayHandle, DialogError> {
        if let Err(err) = dialog.validate() {
            self.report_configuration_error(&err);
            return Err(err);
        }
        self.open(dialog)
    }

    /// Mount any overlay and trap focus inside it.
    pub fn open(&self, overlay: impl Overlay) -> Result<OverlayHandle, DialogError> {
        let overlay: Box<dyn Overlay> = Box::new(overlay);

        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(DialogState::Opening)?;

        let element = overlay.element();
        let container = element.id.clone();
        let candidates = overlay.initial_focus();
        let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let name = overlay.name().to_string();

        let mut shared = self.lock();
        let document = &mut shared.document;

        let handle = document.mount_overlay(element);
        let dismissals = self.dismissals.clone();
        document.overlays_mut().on_dismiss(handle, move |handle| {
            // Receiver gone means the session is shutting down
            let _ = dismissals.send(handle);
        });

        let trap = document.engage_trap(&container, &candidates);
        lifecycle.advance(DialogState::Open)?;

        log::debug!(
            "[dialog] opened {} as {} focus={:?} depth={}",
            name,
            handle,
            document.focused(),
            document.traps().depth()
        );

        shared.entries.push(Entry {
            handle,
            name,
            trap,
            lifecycle,
            overlay: Some(overlay),
        });

        Ok(handle)
    }

    /// Close an overlay with the given gesture, as if the user produced it.
    /// Returns false if the overlay is gone or already closing.
    pub fn close(&self, handle: OverlayHandle, gesture: CloseGesture) -> bool {
        self.with_overlay(handle, |_, _| Some(gesture))
    }

    /// Remove an overlay. An overlay that is still open has its focus trap
    /// released first.
    pub fn unmount(&self, handle: OverlayHandle) -> Result<(), DialogError> {
        let mut shared = self.lock();
        let index = shared
            .entries
            .iter()
            .position(|entry| entry.handle == handle)
            .ok_or(DialogError::UnknownOverlay(handle))?;
        let mut entry = shared.entries.remove(index);

        if let Some(trap) = entry.trap.take() {
            if entry.lifecycle.is_open() {
                let _ = entry.lifecycle.advance(DialogState::Closing);
            }
            shared.document.release_trap(trap);
        }
        if let Err(err) = entry.lifecycle.advance(DialogState::Closed) {
            log::debug!("[dialog] unmounting {}: {err}", entry.name);
        }

        shared.document.unmount_overlay(handle);
        log::debug!(
            "[dialog] unmounted {} ({}) focus={:?}",
            entry.name,
            handle,
            shared.document.focused()
        );
        Ok(())
    }

    /// Run one of an overlay's hooks with the overlay taken out of the
    /// session, then close it if the hook produced a gesture.
    pub(crate) fn with_overlay(
        &self,
        handle: OverlayHandle,
        hook: impl FnOnce(&mut dyn Overlay, &DialogContext) -> Option<CloseGesture>,
    ) -> bool {
        let Some(mut overlay) = self.take_overlay(handle) else {
            log::debug!("[dialog] {handle} is gone or busy");
            return false;
        };

        let closed = match hook(overlay.as_mut(), self) {
            Some(gesture) => self.finish_close(handle, gesture, overlay.as_mut()),
            None => false,
        };

        // An overlay unmounted by its own hook is simply dropped here
        if let Some(entry) = self.lock().entry_mut(handle) {
            entry.overlay = Some(overlay);
        }

        closed
    }

    fn take_overlay(&self, handle: OverlayHandle) -> Option<Box<dyn Overlay>> {
        self.lock().entry_mut(handle)?.overlay.take()
    }

    /// Open -> Closing, release the trap, then hand the gesture to the overlay.
    fn finish_close(
        &self,
        handle: OverlayHandle,
        gesture: CloseGesture,
        overlay: &mut dyn Overlay,
    ) -> bool {
        {
            let mut shared = self.lock();
            let Shared {
                document, entries, ..
            } = &mut *shared;

            let Some(entry) = entries.iter_mut().find(|entry| entry.handle == handle) else {
                return false;
            };

            if let Err(err) = entry.lifecycle.advance(DialogState::Closing) {
                log::warn!("[dialog] ignoring {gesture} for {}: {err}", entry.name);
                return false;
            }

            if let Some(trap) = entry.trap.take() {
                document.release_trap(trap);
            }

            log::debug!(
                "[dialog] {} closing with {gesture}, focus restored to {:?}",
                entry.name,
                document.focused()
            );
        }

        overlay.on_close(gesture, &Closing::new(handle, self));
        true
    }

    fn report_configuration_error(&self, err: &DialogError) {
        log::error!("[dialog] refusing to render: {err}");
        let strict = self.config().strict_configuration;
        debug_assert!(!strict, "invalid dialog configuration: {err}");
    }

    /// Register a handler for activations of a page element.
    pub fn on_activate(
        &self,
        id: impl Into<String>,
        handler: impl Fn(&DialogContext) + Send + Sync + 'static,
    ) {
        self.lock().handlers.insert(id.into(), Arc::new(handler));
    }

    /// Route an activation to the overlay containing `target`, or to a page handler.
    pub(crate) fn activate(&self, target: &str) {
        let (overlay, handler) = {
            let shared = self.lock();
            match shared.document.overlays().layer_of(target) {
                Some(handle) => (Some(handle), None),
                None => (None, shared.handlers.get(target).cloned()),
            }
        };

        if let Some(handle) = overlay {
            self.with_overlay(handle, |overlay, cx| overlay.on_activate(target, cx));
        } else if let Some(handler) = handler {
            handler(self);
        } else {
            log::trace!("[dialog] no handler for activation of {target}");
        }
    }

    /// Offer an unconsumed key to the front-most overlay.
    pub(crate) fn key(&self, key: focusdom::Key, modifiers: focusdom::Modifiers) {
        let top = self.lock().document.overlays().top();
        if let Some(handle) = top {
            self.with_overlay(handle, |overlay, cx| overlay.on_key(key, modifiers, cx));
        }
    }

    pub(crate) fn dismiss(&self, handle: OverlayHandle) {
        self.with_overlay(handle, |overlay, cx| overlay.on_dismiss(cx));
    }

    /// Lifecycle state of a mounted overlay. `None` once unmounted.
    pub fn state(&self, handle: OverlayHandle) -> Option<DialogState> {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.lifecycle.state())
    }

    pub fn set_page(&self, page: Element) {
        self.lock().document.set_page(page);
    }

    /// ID of the focused element.
    pub fn focused(&self) -> Option<String> {
        self.lock().document.focused().map(str::to_string)
    }

    /// Text of the focused element.
    pub fn focused_text(&self) -> Option<String> {
        self.lock()
            .document
            .focused_element()
            .and_then(|el| el.content.as_text())
            .map(str::to_string)
    }

    /// ID of the first element showing `text`, front-most overlay first.
    pub fn element_by_text(&self, text: &str) -> Option<String> {
        self.lock()
            .document
            .find_by_text(text)
            .map(|el| el.id.clone())
    }

    pub fn trap_depth(&self) -> usize {
        self.lock().document.traps().depth()
    }

    pub fn overlay_count(&self) -> usize {
        self.lock().document.overlays().len()
    }

    /// Accessibility audit of the page and every overlay.
    pub fn audit(&self) -> Vec<Violation> {
        focusdom::audit(&self.lock().document)
    }

    /// Draw the page and overlays into `height` lines of `width` cells.
    pub fn render(&self, width: u16, height: u16) -> Vec<String> {
        self.lock().document.render(width, height)
    }
}

/// The pending answer of [`DialogContext::confirm`].
///
/// Resolves to `false` if the session goes away before the user answers.
#[derive(Debug)]
pub struct Confirmation {
    rx: oneshot::Receiver<bool>,
    handle: Option<OverlayHandle>,
}

impl Confirmation {
    /// The dialog's overlay, or `None` if it was refused.
    pub fn handle(&self) -> Option<OverlayHandle> {
        self.handle
    }
}

impl Future for Confirmation {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(false))
    }
}
