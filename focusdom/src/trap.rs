//! Focus traps.
//!
//! A trap confines keyboard focus to one container. Traps stack: the most
//! recently engaged trap owns navigation, and releasing it restores the focus
//! that was current when it engaged. Traps are expected to be released in
//! reverse order of engagement.

use crate::element::{find_element, Element};
use crate::focus::FocusState;

/// Identifies one engaged trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrapId(u64);

/// The focus that was current right before a trap engaged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusMemento {
    pub focused: Option<String>,
}

#[derive(Debug)]
struct TrapFrame {
    id: TrapId,
    container: String,
    memento: FocusMemento,
}

/// Stack of engaged focus traps.
#[derive(Debug, Default)]
pub struct FocusTrapController {
    frames: Vec<TrapFrame>,
    next_id: u64,
}

impl FocusTrapController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trap focus inside `container`.
    ///
    /// Focus moves to the first of `candidates` that exists inside the
    /// container and can take focus. When none qualifies the container itself
    /// is focused.
    pub fn engage(
        &mut self,
        container: &Element,
        candidates: &[&str],
        focus: &mut FocusState,
    ) -> TrapId {
        let id = TrapId(self.next_id);
        self.next_id += 1;

        let memento = FocusMemento {
            focused: focus.focused().map(str::to_string),
        };

        let target = candidates
            .iter()
            .copied()
            .find(|candidate| {
                find_element(container, candidate)
                    .is_some_and(|el| el.can_focus() || el.id == container.id)
            })
            .unwrap_or_else(|| {
                log::debug!(
                    "[trap] no focus candidate available in {}, falling back to container",
                    container.id
                );
                container.id.as_str()
            });

        log::debug!(
            "[trap] engage {:?} container={} focus={} memento={:?} depth={}",
            id,
            container.id,
            target,
            memento.focused,
            self.frames.len() + 1
        );

        focus.focus(target);
        self.frames.push(TrapFrame {
            id,
            container: container.id.clone(),
            memento,
        });

        id
    }

    /// Release a trap, restoring its memento when it is the innermost trap.
    ///
    /// Releasing a trap that is not on top removes it and hands its memento to
    /// the trap engaged right after it, so restoration still unwinds to the
    /// original focus. Returns the released memento, or `None` for an unknown id.
    pub fn release(&mut self, id: TrapId, focus: &mut FocusState) -> Option<FocusMemento> {
        let index = self.frames.iter().position(|frame| frame.id == id)?;
        let frame = self.frames.remove(index);

        if index == self.frames.len() {
            log::debug!(
                "[trap] release {:?} container={} restore={:?}",
                id,
                frame.container,
                frame.memento.focused
            );
            focus.replace(frame.memento.focused.clone());
            return Some(frame.memento);
        }

        log::warn!(
            "[trap] {:?} released out of order (depth {} of {})",
            id,
            index + 1,
            self.frames.len() + 1
        );
        let memento = frame.memento.clone();
        self.frames[index].memento = frame.memento;
        Some(memento)
    }

    /// Container ID of the innermost trap.
    pub fn active_container(&self) -> Option<&str> {
        self.frames.last().map(|frame| frame.container.as_str())
    }

    /// The innermost trap.
    pub fn top(&self) -> Option<TrapId> {
        self.frames.last().map(|frame| frame.id)
    }

    /// Memento recorded when `id` engaged.
    pub fn memento(&self, id: TrapId) -> Option<&FocusMemento> {
        self.frames
            .iter()
            .find(|frame| frame.id == id)
            .map(|frame| &frame.memento)
    }

    pub fn is_trapped(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
