//! Minimal box layout: columns stack children, rows place them side by side.

use std::collections::HashMap;

use unicode_width::UnicodeWidthStr;

use crate::element::{Content, Element};
use crate::types::{Direction, Role};

pub type LayoutResult = HashMap<String, Rect>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// A rect of the given size centered inside this one.
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

/// Cells a button adds around its label: `[ ` and ` ]`.
pub const BUTTON_CHROME: u16 = 4;

/// Intrinsic size of an element, including padding and border.
pub fn measure(element: &Element) -> (u16, u16) {
    let (w, h) = match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => {
            let width = clamp(text.width());
            if element.role == Role::Button || element.role == Role::MenuItem {
                (width.saturating_add(BUTTON_CHROME), 1)
            } else {
                (width, 1)
            }
        }
        Content::Children(children) => {
            let sizes: Vec<(u16, u16)> = children.iter().map(measure).collect();
            let gaps = element.gap.saturating_mul(clamp(sizes.len().saturating_sub(1)));
            match element.direction {
                Direction::Column => (
                    sizes.iter().map(|s| s.0).max().unwrap_or(0),
                    saturating_sum(sizes.iter().map(|s| s.1)).saturating_add(gaps),
                ),
                Direction::Row => (
                    saturating_sum(sizes.iter().map(|s| s.0)).saturating_add(gaps),
                    sizes.iter().map(|s| s.1).max().unwrap_or(0),
                ),
            }
        }
    };
    let chrome = element
        .padding
        .saturating_mul(2)
        .saturating_add(if element.bordered { 2 } else { 0 });
    (w.saturating_add(chrome), h.saturating_add(chrome))
}

/// Content wider than the coordinate space is cut off at the edge.
fn clamp(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

fn saturating_sum(values: impl Iterator<Item = u16>) -> u16 {
    values.fold(0, u16::saturating_add)
}

/// Lay out `element` with its top-left corner at (`x`, `y`).
pub fn layout(element: &Element, x: u16, y: u16, result: &mut LayoutResult) {
    let (width, height) = measure(element);
    result.insert(element.id.clone(), Rect::new(x, y, width, height));

    let inset = element.padding.saturating_add(u16::from(element.bordered));
    let (mut cx, mut cy) = (x.saturating_add(inset), y.saturating_add(inset));

    if let Content::Children(children) = &element.content {
        for child in children {
            let (cw, ch) = measure(child);
            layout(child, cx, cy, result);
            match element.direction {
                Direction::Column => cy = cy.saturating_add(ch).saturating_add(element.gap),
                Direction::Row => cx = cx.saturating_add(cw).saturating_add(element.gap),
            }
        }
    }
}

/// Find the deepest clickable element at the given coordinates within `root`.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    let rect = layout.get(&root.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    if let Content::Children(children) = &root.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_test(layout, child, x, y) {
                return Some(id);
            }
        }
    }

    if root.clickable && !root.disabled {
        Some(root.id.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_of_buttons() {
        let row = Element::row()
            .id("row")
            .gap(2)
            .child(Element::button("No").id("no"))
            .child(Element::button("Yes").id("yes"));

        let mut result = LayoutResult::new();
        layout(&row, 0, 0, &mut result);

        assert_eq!(result["no"], Rect::new(0, 0, 6, 1));
        assert_eq!(result["yes"], Rect::new(8, 0, 7, 1));
        assert_eq!(result["row"], Rect::new(0, 0, 15, 1));
    }

    #[test]
    fn test_bordered_column_insets_children() {
        let col = Element::col()
            .id("col")
            .bordered(true)
            .padding(1)
            .child(Element::text("Title").id("title"));

        let mut result = LayoutResult::new();
        layout(&col, 10, 5, &mut result);

        assert_eq!(result["title"], Rect::new(12, 7, 5, 1));
        assert_eq!(result["col"], Rect::new(10, 5, 9, 5));
    }

    #[test]
    fn test_hit_test_prefers_clickable_child() {
        let row = Element::row()
            .id("row")
            .child(Element::button("A").id("a"))
            .child(Element::text("plain").id("plain"));

        let mut result = LayoutResult::new();
        layout(&row, 0, 0, &mut result);

        assert_eq!(hit_test(&result, &row, 1, 0), Some("a".to_string()));
        assert_eq!(hit_test(&result, &row, 6, 0), None);
    }

    #[test]
    fn test_oversized_content_saturates() {
        let col = Element::col()
            .id("col")
            .bordered(true)
            .padding(1)
            .gap(1)
            .child(Element::text("x".repeat(70_000)).id("wide"))
            .child(Element::button("y".repeat(65_534)).id("button"));

        let mut result = LayoutResult::new();
        layout(&col, 10, 5, &mut result);

        assert_eq!(result["wide"].width, u16::MAX);
        assert_eq!(result["button"].width, u16::MAX);
        assert_eq!(result["col"], Rect::new(10, 5, u16::MAX, 7));
        assert_eq!(result["col"].right(), u16::MAX);
    }
}
