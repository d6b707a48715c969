//! Session - owns the document and routes input to overlays and page handlers.

use crossterm::event::Event as CrosstermEvent;
use focusdom::{Document, Element, Event, Key, Modifiers, OverlayHandle, Violation};
use tokio::sync::mpsc;

use crate::config::SessionConfig;
use crate::context::DialogContext;

/// A page plus the overlays opened on top of it.
///
/// Input goes in through [`handle`](Self::handle) (raw terminal events) or
/// the `press`/`click` helpers, which is what tests drive.
pub struct Session {
    cx: DialogContext,
    dismissals: mpsc::UnboundedReceiver<OverlayHandle>,
}

impl Session {
    pub fn new(page: Element) -> Self {
        Self::with_config(page, SessionConfig::default())
    }

    pub fn with_config(page: Element, config: SessionConfig) -> Self {
        let mut document = Document::new(page);
        document.dismiss_on_escape = config.dismiss_on_escape;
        document.dismiss_on_backdrop = config.dismiss_on_backdrop;

        let (tx, rx) = mpsc::unbounded_channel();
        log::debug!("[session] created with {config:?}");

        Self {
            cx: DialogContext::new(document, config, tx),
            dismissals: rx,
        }
    }

    pub fn context(&self) -> DialogContext {
        self.cx.clone()
    }

    /// Register a handler for activations of a page element.
    pub fn on_activate(
        &self,
        id: impl Into<String>,
        handler: impl Fn(&DialogContext) + Send + Sync + 'static,
    ) {
        self.cx.on_activate(id, handler);
    }

    pub fn set_page(&self, page: Element) {
        self.cx.set_page(page);
    }

    /// Feed raw terminal events.
    pub fn handle(&mut self, raw: &[CrosstermEvent]) {
        let events = self.cx.lock().document.process_events(raw);
        self.dispatch(events);
    }

    pub fn press(&mut self, key: Key) {
        self.press_with(key, Modifiers::new());
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) {
        let events = self.cx.lock().document.key(key, modifiers);
        self.dispatch(events);
    }

    /// Click the element with the given ID.
    pub fn click(&mut self, id: &str) {
        let events = self.cx.lock().document.click(id);
        self.dispatch(events);
    }

    /// Click the first element showing `text`. Returns false if there is none.
    pub fn click_text(&mut self, text: &str) -> bool {
        let Some(id) = self.cx.element_by_text(text) else {
            log::debug!("[session] nothing shows {text:?}");
            return false;
        };
        self.click(&id);
        true
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            log::trace!("[session] {event:?}");
            match event {
                Event::Activate { target } => self.cx.activate(&target),
                Event::Key { key, modifiers, .. } => self.cx.key(key, modifiers),
                _ => {}
            }
            self.drain_dismissals();
        }
        // Dismissals fired without an event (nothing focused)
        self.drain_dismissals();
    }

    fn drain_dismissals(&mut self) {
        while let Ok(handle) = self.dismissals.try_recv() {
            log::debug!("[session] dismiss {handle}");
            self.cx.dismiss(handle);
        }
    }

    pub fn focused(&self) -> Option<String> {
        self.cx.focused()
    }

    pub fn focused_text(&self) -> Option<String> {
        self.cx.focused_text()
    }

    pub fn trap_depth(&self) -> usize {
        self.cx.trap_depth()
    }

    pub fn overlay_count(&self) -> usize {
        self.cx.overlay_count()
    }

    pub fn audit(&self) -> Vec<Violation> {
        self.cx.audit()
    }

    pub fn render(&self, width: u16, height: u16) -> Vec<String> {
        self.cx.render(width, height)
    }
}
