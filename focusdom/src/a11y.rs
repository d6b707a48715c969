//! Automated accessibility audit of a document.
//!
//! Checks the rules that matter for overlays: named dialogs and buttons,
//! resolvable label references, unique IDs, and focus containment.

use std::collections::HashSet;

use crate::document::Document;
use crate::element::{text_content, walk, Element};

/// An audit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Dialogs need an accessible name.
    DialogName,
    /// Buttons and menu items need an accessible name.
    ButtonName,
    /// `labelled_by` / `described_by` must reference an existing element.
    ValidReference,
    /// Element IDs must be unique across page and overlays.
    DuplicateId,
    /// A modal dialog must be marked `aria_modal`.
    ModalDialog,
    /// Focus must be inside the active focus trap.
    FocusContainment,
}

impl Rule {
    pub fn code(&self) -> &'static str {
        match self {
            Rule::DialogName => "aria-dialog-name",
            Rule::ButtonName => "button-name",
            Rule::ValidReference => "aria-valid-attr-value",
            Rule::DuplicateId => "duplicate-id",
            Rule::ModalDialog => "aria-modal",
            Rule::FocusContainment => "focus-trap",
        }
    }
}

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub element: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule.code(), self.element, self.message)
    }
}

/// Audit the page and every mounted overlay.
pub fn audit(document: &Document) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();

    let roots = std::iter::once(document.page()).chain(document.overlays().iter().map(|(_, root)| root));
    for root in roots {
        let overlay = !std::ptr::eq(root, document.page());
        walk(root, &mut |el| {
            if !seen.insert(el.id.clone()) {
                violations.push(violation(Rule::DuplicateId, el, "id is used more than once"));
            }
            check_element(document, el, overlay, &mut violations);
        });
    }

    if let Some(container) = document.traps().active_container() {
        match document.focused() {
            Some(focused) if document.in_active_trap(focused) => {}
            Some(focused) => violations.push(Violation {
                rule: Rule::FocusContainment,
                element: focused.to_string(),
                message: format!("focus escaped the active trap {container}"),
            }),
            None => violations.push(Violation {
                rule: Rule::FocusContainment,
                element: container.to_string(),
                message: "nothing is focused while a trap is active".to_string(),
            }),
        }
    }

    for violation in &violations {
        log::debug!("[a11y] {violation}");
    }
    violations
}

fn check_element(document: &Document, el: &Element, in_overlay: bool, violations: &mut Vec<Violation>) {
    for reference in [&el.labelled_by, &el.described_by].into_iter().flatten() {
        if document.find(reference).is_none() {
            violations.push(violation(
                Rule::ValidReference,
                el,
                &format!("references missing element {reference}"),
            ));
        }
    }

    if el.role.is_dialog() {
        if accessible_name(document, el).is_none() {
            violations.push(violation(Rule::DialogName, el, "dialog has no accessible name"));
        }
        if in_overlay && !el.aria_modal {
            violations.push(violation(Rule::ModalDialog, el, "overlay dialog is not marked modal"));
        }
    } else if el.role.requires_name() && accessible_name(document, el).is_none() {
        violations.push(violation(Rule::ButtonName, el, "element has no accessible name"));
    }
}

/// Accessible name: `labelled_by` text, then `label`, then own text.
pub fn accessible_name(document: &Document, el: &Element) -> Option<String> {
    let name = el
        .labelled_by
        .as_deref()
        .and_then(|id| document.find(id))
        .map(text_content)
        .or_else(|| el.label.clone())
        .or_else(|| el.content.as_text().map(str::to_string))?;

    let name = name.trim().to_string();
    (!name.is_empty()).then_some(name)
}

fn violation(rule: Rule, el: &Element, message: &str) -> Violation {
    Violation {
        rule,
        element: el.id.clone(),
        message: message.to_string(),
    }
}
