//! Plain character rendering of a laid-out element tree.

use unicode_width::UnicodeWidthChar;

use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::types::Role;

/// Marks the second cell of a wide character.
const CONTINUATION: char = '\0';

/// A grid of character cells.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Write a string starting at (x, y), clipped to the canvas.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str) {
        let Some(row) = self.cells.get_mut(y as usize) else {
            return;
        };
        let mut col = x as usize;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > row.len() {
                break;
            }
            row[col] = ch;
            if w == 2 {
                row[col + 1] = CONTINUATION;
            }
            col += w;
        }
    }

    /// Blank out a rectangle.
    pub fn clear(&mut self, rect: Rect) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.cells[y as usize][x as usize] = ' ';
            }
        }
    }

    /// Draw an ASCII border along the edge of a rectangle.
    pub fn border(&mut self, rect: Rect) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in rect.x..=right {
            self.set(x, rect.y, '-');
            self.set(x, bottom, '-');
        }
        for y in rect.y..=bottom {
            self.set(rect.x, y, '|');
            self.set(right, y, '|');
        }
        for (x, y) in [(rect.x, rect.y), (right, rect.y), (rect.x, bottom), (right, bottom)] {
            self.set(x, y, '+');
        }
    }

    /// Rows as strings with trailing whitespace trimmed.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|&&c| c != CONTINUATION)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(cell) = self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = ch;
        }
    }
}

/// Draw an element (and its children) using positions from `layout`.
pub fn render(element: &Element, layout: &LayoutResult, canvas: &mut Canvas) {
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };

    if element.bordered {
        canvas.clear(rect);
        canvas.border(rect);
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            if matches!(element.role, Role::Button | Role::MenuItem) {
                let decorated = if element.focused {
                    format!("[>{text}<]")
                } else {
                    format!("[ {text} ]")
                };
                canvas.put_str(rect.x, rect.y, &decorated);
            } else {
                canvas.put_str(rect.x, rect.y, text);
            }
        }
        Content::Children(children) => {
            for child in children {
                render(child, layout, canvas);
            }
        }
    }
}
