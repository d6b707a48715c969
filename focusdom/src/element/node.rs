use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Direction, Role};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,

    // Content
    pub content: Content,

    // Layout
    pub direction: Direction,
    pub gap: u16,
    pub padding: u16,
    /// Draw a border around the element (overlays use this as their frame).
    pub bordered: bool,

    // Accessibility
    pub role: Role,
    /// Accessible name given directly.
    pub label: Option<String>,
    /// ID of the element whose text names this element.
    pub labelled_by: Option<String>,
    /// ID of the element whose text describes this element.
    pub described_by: Option<String>,
    /// Content outside this element is inert while it is shown.
    pub aria_modal: bool,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,

    // State
    /// Whether this element is currently focused. Set by the document, not by user.
    pub focused: bool,
    /// Disabled elements don't receive focus or activation.
    pub disabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            content: Content::None,
            direction: Direction::Column,
            gap: 0,
            padding: 0,
            bordered: false,
            role: Role::Generic,
            label: None,
            labelled_by: None,
            described_by: None,
            aria_modal: false,
            focusable: false,
            clickable: false,
            focused: false,
            disabled: false,
        }
    }
}

impl Element {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    /// A focusable, clickable element labelled by its own text.
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            content: Content::Text(label.into()),
            role: Role::Button,
            focusable: true,
            clickable: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Layout
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    // Accessibility
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.labelled_by = Some(id.into());
        self
    }

    pub fn described_by(mut self, id: impl Into<String>) -> Self {
        self.described_by = Some(id.into());
        self
    }

    pub fn aria_modal(mut self, modal: bool) -> Self {
        self.aria_modal = modal;
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // State
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether this element can take focus right now.
    pub fn can_focus(&self) -> bool {
        self.focusable && !self.disabled
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Mark the element with `id` (and only it) as focused.
    pub fn mark_focused(&mut self, id: Option<&str>) {
        self.focused = id == Some(self.id.as_str());
        if let Content::Children(children) = &mut self.content {
            for child in children {
                child.mark_focused(id);
            }
        }
    }
}
