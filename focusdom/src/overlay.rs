//! Overlay layers mounted in front of the page.

use crate::element::{find_element, Element};

/// Identifies a mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Called when an overlay is asked to close by Escape or a backdrop click.
pub type DismissCallback = Box<dyn FnMut(OverlayHandle) + Send>;

struct Layer {
    handle: OverlayHandle,
    element: Element,
    on_dismiss: Option<DismissCallback>,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("handle", &self.handle)
            .field("element", &self.element.id)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

/// Ordered overlay layers. Later layers are in front.
#[derive(Debug, Default)]
pub struct OverlayHost {
    layers: Vec<Layer>,
    next_id: u64,
}

impl OverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount content in front of everything mounted so far.
    pub fn mount(&mut self, element: Element) -> OverlayHandle {
        let handle = OverlayHandle(self.next_id);
        self.next_id += 1;
        log::debug!("[overlay] mount {} root={}", handle, element.id);
        self.layers.push(Layer {
            handle,
            element,
            on_dismiss: None,
        });
        handle
    }

    /// Remove an overlay, returning its content.
    pub fn unmount(&mut self, handle: OverlayHandle) -> Option<Element> {
        let index = self.index_of(handle)?;
        log::debug!("[overlay] unmount {}", handle);
        Some(self.layers.remove(index).element)
    }

    /// Swap the content of a mounted overlay (re-render).
    pub fn replace(&mut self, handle: OverlayHandle, element: Element) -> bool {
        match self.index_of(handle) {
            Some(index) => {
                self.layers[index].element = element;
                true
            }
            None => false,
        }
    }

    /// Register the dismiss callback for an overlay. Replaces any previous one.
    pub fn on_dismiss(
        &mut self,
        handle: OverlayHandle,
        callback: impl FnMut(OverlayHandle) + Send + 'static,
    ) -> bool {
        match self.index_of(handle) {
            Some(index) => {
                self.layers[index].on_dismiss = Some(Box::new(callback));
                true
            }
            None => false,
        }
    }

    /// Fire the dismiss signal of a specific overlay.
    pub fn dismiss(&mut self, handle: OverlayHandle) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        log::debug!("[overlay] dismiss {}", handle);
        if let Some(callback) = self.layers[index].on_dismiss.as_mut() {
            callback(handle);
        }
        true
    }

    /// Fire the dismiss signal of the front-most overlay.
    pub fn dismiss_top(&mut self) -> Option<OverlayHandle> {
        let handle = self.top()?;
        self.dismiss(handle);
        Some(handle)
    }

    pub fn top(&self) -> Option<OverlayHandle> {
        self.layers.last().map(|layer| layer.handle)
    }

    pub fn get(&self, handle: OverlayHandle) -> Option<&Element> {
        self.index_of(handle).map(|index| &self.layers[index].element)
    }

    /// Layers from back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (OverlayHandle, &Element)> {
        self.layers.iter().map(|layer| (layer.handle, &layer.element))
    }

    /// Find an element in any overlay, front-most first.
    pub fn find(&self, id: &str) -> Option<(OverlayHandle, &Element)> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| find_element(&layer.element, id).map(|el| (layer.handle, el)))
    }

    /// The overlay containing element `id`.
    pub fn layer_of(&self, id: &str) -> Option<OverlayHandle> {
        self.find(id).map(|(handle, _)| handle)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn index_of(&self, handle: OverlayHandle) -> Option<usize> {
        self.layers.iter().position(|layer| layer.handle == handle)
    }
}
