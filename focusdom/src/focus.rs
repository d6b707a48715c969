use crate::element::{Content, Element};

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Replace the focused element wholesale, returning the previous one.
    pub fn replace(&mut self, focused: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.focused, focused)
    }

    /// Tab: move to the next focusable element inside `scope`, wrapping at
    /// the end. Returns the new focus if it changed.
    pub fn focus_next(&mut self, scope: &Element) -> Option<String> {
        self.step(scope, true)
    }

    /// Shift+Tab: like [`focus_next`](Self::focus_next), backwards.
    pub fn focus_prev(&mut self, scope: &Element) -> Option<String> {
        self.step(scope, false)
    }

    fn step(&mut self, scope: &Element, forward: bool) -> Option<String> {
        let order = collect_focusable(scope);
        let count = order.len();
        if count == 0 {
            return None;
        }

        let current = self
            .focused
            .as_ref()
            .and_then(|focused| order.iter().position(|id| id == focused));

        // Entering the scope from outside lands on its first (or last) element
        let index = match (current, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };

        let target = &order[index];
        self.focus(target).then(|| target.clone())
    }
}

/// Collect all focusable element IDs in tree order. Disabled elements are skipped.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.can_focus() {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, result);
        }
    }
}
