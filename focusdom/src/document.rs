//! The page, its overlays, focus and focus traps, seen as one document.

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{contains, find_by_text, find_element, Element};
use crate::event::{Event, Key, Modifiers, MouseButton};
use crate::focus::FocusState;
use crate::layout::{self, LayoutResult, Rect};
use crate::overlay::{OverlayHandle, OverlayHost};
use crate::render::{self, Canvas};
use crate::trap::{FocusMemento, FocusTrapController, TrapId};

/// Page root plus overlays, with the focus state and trap stack shared by both.
#[derive(Debug)]
pub struct Document {
    page: Element,
    overlays: OverlayHost,
    focus: FocusState,
    traps: FocusTrapController,
    layout: LayoutResult,
    /// Escape fires the dismiss signal of the front-most overlay.
    pub dismiss_on_escape: bool,
    /// Clicking outside the active trap fires the dismiss signal of the front-most overlay.
    pub dismiss_on_backdrop: bool,
}

impl Document {
    pub fn new(page: Element) -> Self {
        Self {
            page,
            overlays: OverlayHost::new(),
            focus: FocusState::new(),
            traps: FocusTrapController::new(),
            layout: LayoutResult::new(),
            dismiss_on_escape: true,
            dismiss_on_backdrop: true,
        }
    }

    pub fn page(&self) -> &Element {
        &self.page
    }

    /// Replace the page content. Focus is dropped if its element disappeared.
    pub fn set_page(&mut self, page: Element) {
        self.page = page;
        self.drop_stale_focus();
    }

    pub fn overlays(&self) -> &OverlayHost {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayHost {
        &mut self.overlays
    }

    pub fn traps(&self) -> &FocusTrapController {
        &self.traps
    }

    /// Find an element on the page or in any overlay.
    pub fn find(&self, id: &str) -> Option<&Element> {
        lookup(&self.page, &self.overlays, id)
    }

    /// Find the first element whose text equals `text`, front-most overlay first.
    pub fn find_by_text(&self, text: &str) -> Option<&Element> {
        self.overlays
            .iter()
            .rev()
            .find_map(|(_, root)| find_by_text(root, text))
            .or_else(|| find_by_text(&self.page, text))
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// The focused element itself.
    pub fn focused_element(&self) -> Option<&Element> {
        self.focus.focused().and_then(|id| self.find(id))
    }

    /// Move focus programmatically. Refused when a trap is active and `id`
    /// lies outside it, or when the element cannot take focus.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.in_active_trap(id) {
            log::debug!("[document] focus({id}) refused: outside active trap");
            return false;
        }
        let can_focus = self.find(id).is_some_and(Element::can_focus);
        can_focus && self.focus.focus(id)
    }

    /// Whether `id` is inside the innermost trap (always true when untrapped).
    pub fn in_active_trap(&self, id: &str) -> bool {
        match self.traps.active_container() {
            Some(container) => self.find(container).is_some_and(|c| contains(c, id)),
            None => true,
        }
    }

    /// Mount an overlay in front of everything else.
    pub fn mount_overlay(&mut self, element: Element) -> OverlayHandle {
        self.overlays.mount(element)
    }

    /// Re-render a mounted overlay.
    pub fn replace_overlay(&mut self, handle: OverlayHandle, element: Element) -> bool {
        let replaced = self.overlays.replace(handle, element);
        self.drop_stale_focus();
        replaced
    }

    /// Remove an overlay. Focus is dropped if it pointed into the overlay.
    pub fn unmount_overlay(&mut self, handle: OverlayHandle) -> Option<Element> {
        let element = self.overlays.unmount(handle)?;
        self.drop_stale_focus();
        Some(element)
    }

    /// Trap focus inside the element `container`, focusing the first
    /// available of `candidates`. Returns `None` if the container is not mounted.
    pub fn engage_trap(&mut self, container: &str, candidates: &[&str]) -> Option<TrapId> {
        let Some(root) = lookup(&self.page, &self.overlays, container) else {
            log::warn!("[document] cannot trap focus in unknown element {container}");
            return None;
        };
        Some(self.traps.engage(root, candidates, &mut self.focus))
    }

    /// Release a trap and restore the focus it recorded.
    pub fn release_trap(&mut self, id: TrapId) -> Option<FocusMemento> {
        let memento = self.traps.release(id, &mut self.focus)?;
        self.drop_stale_focus();
        Some(memento)
    }

    /// Process raw crossterm events and produce high-level events.
    pub fn process_events(&mut self, raw: &[CrosstermEvent]) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    events.extend(self.key(key_event.code.into(), key_event.modifiers.into()));
                }
                CrosstermEvent::Mouse(mouse_event) => {
                    if let MouseEventKind::Down(button) = mouse_event.kind {
                        let (x, y) = (mouse_event.column, mouse_event.row);
                        let target = self.hit_test(x, y);
                        events.extend(self.click_at(target, x, y, button.into()));
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }
                _ => {}
            }
        }

        events
    }

    /// Handle a key press.
    pub fn key(&mut self, key: Key, modifiers: Modifiers) -> Vec<Event> {
        log::trace!("[document] key {:?} {:?} focused={:?}", key, modifiers, self.focused());

        match key {
            Key::Tab if !modifiers.shift => return self.cycle(true),
            Key::Tab | Key::BackTab => return self.cycle(false),
            Key::Escape if self.dismiss_on_escape => {
                if let Some(overlay) = self.overlays.dismiss_top() {
                    return vec![Event::Dismiss { overlay }];
                }
            }
            k if k.activates() && modifiers.none() => {
                if let Some(el) = self.focused_element() {
                    if el.clickable && !el.disabled {
                        return vec![Event::Activate {
                            target: el.id.clone(),
                        }];
                    }
                }
            }
            _ => {}
        }

        vec![Event::Key {
            target: self.focus.focused().map(str::to_string),
            key,
            modifiers,
        }]
    }

    /// Click an element by ID, as if the pointer went down on it.
    pub fn click(&mut self, id: &str) -> Vec<Event> {
        let (x, y) = self
            .layout
            .get(id)
            .map(|rect| (rect.x, rect.y))
            .unwrap_or_default();
        let target = self.find(id).map(|el| el.id.clone());
        self.click_at(target, x, y, MouseButton::Left)
    }

    fn click_at(&mut self, target: Option<String>, x: u16, y: u16, button: MouseButton) -> Vec<Event> {
        let inside = target.as_deref().is_some_and(|id| self.in_active_trap(id));
        let trapped = self.traps.is_trapped();

        if trapped && !inside {
            if self.dismiss_on_backdrop {
                if let Some(overlay) = self.overlays.dismiss_top() {
                    return vec![Event::Dismiss { overlay }];
                }
            }
            return Vec::new();
        }

        let mut events = vec![Event::Click {
            target: target.clone(),
            x,
            y,
            button,
        }];

        let Some(id) = target else {
            return events;
        };

        let (can_focus, clickable) = match self.find(&id) {
            Some(el) => (el.can_focus(), el.clickable && !el.disabled),
            None => (false, false),
        };

        if can_focus {
            let old = self.focus.focused().map(str::to_string);
            if self.focus.focus(&id) {
                if let Some(old) = old {
                    events.push(Event::Blur {
                        target: old,
                        new_target: Some(id.clone()),
                    });
                }
                events.push(Event::Focus { target: id.clone() });
            }
        }

        if clickable && button == MouseButton::Left {
            events.push(Event::Activate { target: id });
        }

        events
    }

    /// Tab / Shift-Tab within the active trap, or the whole document when untrapped.
    fn cycle(&mut self, forward: bool) -> Vec<Event> {
        let old = self.focus.focused().map(str::to_string);
        let scope_id = self.traps.active_container().map(str::to_string);

        let new = match scope_id.as_deref() {
            Some(container) => {
                let Some(scope) = lookup(&self.page, &self.overlays, container) else {
                    return Vec::new();
                };
                if forward {
                    self.focus.focus_next(scope)
                } else {
                    self.focus.focus_prev(scope)
                }
            }
            None => {
                let scope = &self.page;
                if forward {
                    self.focus.focus_next(scope)
                } else {
                    self.focus.focus_prev(scope)
                }
            }
        };

        let Some(new) = new else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if let Some(old) = old {
            events.push(Event::Blur {
                target: old,
                new_target: Some(new.clone()),
            });
        }
        events.push(Event::Focus { target: new });
        events
    }

    /// Lay out and draw the page and its overlays. Overlays are centered.
    pub fn render(&mut self, width: u16, height: u16) -> Vec<String> {
        let mut canvas = Canvas::new(width, height);
        let screen = Rect::new(0, 0, width, height);
        let focused = self.focus.focused().map(str::to_string);

        self.layout.clear();
        let mut page = self.page.clone();
        page.mark_focused(focused.as_deref());
        layout::layout(&page, 0, 0, &mut self.layout);
        render::render(&page, &self.layout, &mut canvas);

        for (_, root) in self.overlays.iter() {
            let mut root = root.clone();
            root.mark_focused(focused.as_deref());
            let (w, h) = layout::measure(&root);
            let area = screen.centered(w, h);
            layout::layout(&root, area.x, area.y, &mut self.layout);
            render::render(&root, &self.layout, &mut canvas);
        }

        canvas.lines()
    }

    /// Layout computed by the last `render`.
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Deepest clickable element under a point, front-most overlay first.
    ///
    /// A point on an overlay but not on anything clickable in it hits the
    /// overlay root, so it never counts as a backdrop click.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<String> {
        for (_, root) in self.overlays.iter().rev() {
            if let Some(id) = layout::hit_test(&self.layout, root, x, y) {
                return Some(id);
            }
            if self.layout.get(&root.id).is_some_and(|r| r.contains(x, y)) {
                return Some(root.id.clone());
            }
        }
        layout::hit_test(&self.layout, &self.page, x, y)
    }

    fn drop_stale_focus(&mut self) {
        if let Some(id) = self.focus.focused() {
            if self.find(id).is_none() {
                log::debug!("[document] focused element {id} is gone, blurring");
                self.focus.blur();
            }
        }
    }
}

fn lookup<'a>(page: &'a Element, overlays: &'a OverlayHost, id: &str) -> Option<&'a Element> {
    overlays
        .find(id)
        .map(|(_, el)| el)
        .or_else(|| find_element(page, id))
}
