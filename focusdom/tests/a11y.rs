use focusdom::{audit, Document, Element, Role, Rule};

fn named_dialog() -> Element {
    Element::col()
        .id("dialog")
        .role(Role::Dialog)
        .aria_modal(true)
        .labelled_by("dialog-title")
        .described_by("dialog-body")
        .child(Element::text("Confirm").id("dialog-title").role(Role::Heading))
        .child(Element::text("Body").id("dialog-body"))
        .child(Element::button("OK").id("ok"))
}

fn rules(document: &Document) -> Vec<Rule> {
    audit(document).into_iter().map(|v| v.rule).collect()
}

#[test]
fn test_clean_dialog_has_no_violations() {
    let mut doc = Document::new(Element::col().child(Element::button("Open").id("open")));
    doc.mount_overlay(named_dialog());
    doc.engage_trap("dialog", &["ok"]);

    assert!(audit(&doc).is_empty(), "{:?}", audit(&doc));
}

#[test]
fn test_unnamed_dialog() {
    let mut doc = Document::new(Element::col());
    doc.mount_overlay(Element::col().id("dialog").role(Role::Dialog).aria_modal(true));

    assert_eq!(rules(&doc), vec![Rule::DialogName]);
}

#[test]
fn test_dialog_label_must_resolve() {
    let mut doc = Document::new(Element::col());
    doc.mount_overlay(
        Element::col()
            .id("dialog")
            .role(Role::Dialog)
            .aria_modal(true)
            .labelled_by("nowhere"),
    );

    assert_eq!(rules(&doc), vec![Rule::ValidReference, Rule::DialogName]);
}

#[test]
fn test_overlay_dialog_must_be_modal() {
    let mut doc = Document::new(Element::col());
    doc.mount_overlay(Element::col().id("dialog").role(Role::Dialog).label("Settings"));

    assert_eq!(rules(&doc), vec![Rule::ModalDialog]);
}

#[test]
fn test_empty_button() {
    let doc = Document::new(Element::col().child(Element::button("").id("empty")));

    let violations = audit(&doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, Rule::ButtonName);
    assert_eq!(violations[0].element, "empty");
}

#[test]
fn test_duplicate_ids_across_layers() {
    let mut doc = Document::new(Element::col().child(Element::button("A").id("same")));
    doc.mount_overlay(Element::col().child(Element::button("B").id("same")));

    assert_eq!(rules(&doc), vec![Rule::DuplicateId]);
}

#[test]
fn test_trap_without_focus_is_reported() {
    let mut doc = Document::new(Element::col());
    doc.mount_overlay(named_dialog());
    doc.engage_trap("dialog", &["ok"]);
    let handle = doc.overlays().top().unwrap();
    // Re-render without the focused button.
    doc.replace_overlay(
        handle,
        Element::col()
            .id("dialog")
            .role(Role::Dialog)
            .aria_modal(true)
            .label("Confirm"),
    );

    assert_eq!(rules(&doc), vec![Rule::FocusContainment]);
}
