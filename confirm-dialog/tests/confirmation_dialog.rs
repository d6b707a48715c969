use std::sync::{Arc, Mutex};

use confirm_dialog::{
    CloseGesture, ConfirmButtonType, ConfirmOptions, ConfirmationDialog, DialogError, DialogState, Session,
    SessionConfig,
};
use crossterm::event::{Event as CrosstermEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use focusdom::{Element, Key, Modifiers};

type Gestures = Arc<Mutex<Vec<CloseGesture>>>;

fn options() -> ConfirmOptions {
    ConfirmOptions::new("Confirm", "Lorem ipsum dolor sit Pippin good dog.")
        .cancel_button_content("Secondary")
        .confirm_button_content("Primary")
}

fn page() -> Element {
    Element::col()
        .id("page")
        .child(Element::button("Show dialog").id("show"))
        .child(Element::button("Elsewhere").id("elsewhere"))
}

/// A page whose "Show dialog" button mounts a dialog that unmounts itself on close.
fn basic(button_type: Option<ConfirmButtonType>) -> (Session, Gestures) {
    let session = Session::with_config(page(), SessionConfig::new().lenient());
    let gestures = Gestures::default();

    let log = Arc::clone(&gestures);
    session.on_activate("show", move |cx| {
        let mut options = options();
        if let Some(button_type) = button_type {
            options = options.confirm_button_type(button_type);
        }
        let log = Arc::clone(&log);
        cx.show(ConfirmationDialog::new(options, move |gesture, closing| {
            log.lock().unwrap().push(gesture);
            closing.unmount().unwrap();
        }))
        .unwrap();
    });

    (session, gestures)
}

fn open(button_type: Option<ConfirmButtonType>) -> (Session, Gestures) {
    let (mut session, gestures) = basic(button_type);
    assert!(session.click_text("Show dialog"));
    assert_eq!(session.overlay_count(), 1);
    (session, gestures)
}

// ============================================================================
// Initial focus
// ============================================================================

#[test]
fn test_focuses_primary_when_type_unset() {
    let (session, _) = open(None);
    assert_eq!(session.focused_text().as_deref(), Some("Primary"));
}

#[test]
fn test_focuses_primary_for_normal_and_primary() {
    for button_type in [ConfirmButtonType::Normal, ConfirmButtonType::Primary] {
        let (session, _) = open(Some(button_type));
        assert_eq!(session.focused_text().as_deref(), Some("Primary"), "{button_type:?}");
    }
}

#[test]
fn test_focuses_secondary_for_danger() {
    let (session, _) = open(Some(ConfirmButtonType::Danger));
    assert_eq!(session.focused_text().as_deref(), Some("Secondary"));
}

// ============================================================================
// Closing
// ============================================================================

#[test]
fn test_confirm_click() {
    let (mut session, gestures) = open(None);

    assert!(session.click_text("Primary"));

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Confirm]);
    assert_eq!(session.overlay_count(), 0);
    assert_eq!(session.trap_depth(), 0);
    assert_eq!(session.focused().as_deref(), Some("show"));
}

#[test]
fn test_cancel_click() {
    let (mut session, gestures) = open(None);

    session.click_text("Secondary");

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Cancel]);
    assert_eq!(session.focused_text().as_deref(), Some("Show dialog"));
}

#[test]
fn test_keyboard_activation() {
    let (mut session, gestures) = open(Some(ConfirmButtonType::Danger));

    // Danger starts on cancel; move to confirm and press Space
    session.press(Key::Tab);
    assert_eq!(session.focused_text().as_deref(), Some("Primary"));
    session.press(Key::Char(' '));

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Confirm]);
}

#[test]
fn test_escape_dismisses() {
    let (mut session, gestures) = open(None);

    session.press(Key::Escape);

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Dismiss]);
    assert_eq!(session.overlay_count(), 0);
    assert_eq!(session.focused().as_deref(), Some("show"));
}

#[test]
fn test_backdrop_click_dismisses() {
    let (mut session, gestures) = open(None);

    session.click("elsewhere");

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Dismiss]);
    // The click itself does not reach the page
    assert_eq!(session.focused().as_deref(), Some("show"));
}

#[test]
fn test_escape_ignored_when_disabled() {
    let mut session = Session::with_config(page(), SessionConfig::new().lenient().dismiss_on_escape(false));
    let cx = session.context();
    let handle = cx.show(ConfirmationDialog::new(options(), |_, closing| {
        closing.unmount().unwrap();
    }))
    .unwrap();

    session.press(Key::Escape);

    assert_eq!(cx.state(handle), Some(DialogState::Open));
    assert_eq!(session.focused_text().as_deref(), Some("Primary"));
}

#[test]
fn test_shortcuts() {
    let (mut session, gestures) = open(None);
    session.press(Key::Char('n'));

    session.click_text("Show dialog");
    session.press(Key::Char('y'));

    // Modified keys are not shortcuts
    session.click_text("Show dialog");
    session.press_with(Key::Char('y'), Modifiers::ctrl());

    assert_eq!(
        *gestures.lock().unwrap(),
        vec![CloseGesture::Cancel, CloseGesture::Confirm]
    );
    assert_eq!(session.overlay_count(), 1);
}

#[test]
fn test_shortcuts_disabled() {
    let mut session = Session::with_config(page(), SessionConfig::new().lenient().shortcuts(false));
    let cx = session.context();
    let handle = cx.show(ConfirmationDialog::new(options(), |_, _| {})).unwrap();

    session.press(Key::Char('y'));

    assert_eq!(cx.state(handle), Some(DialogState::Open));
}

// ============================================================================
// Exactly-once close
// ============================================================================

#[test]
fn test_close_reported_once_when_caller_delays_unmount() {
    let mut session = Session::with_config(page(), SessionConfig::new().lenient());
    let cx = session.context();
    let gestures = Gestures::default();

    let log = Arc::clone(&gestures);
    let dialog = ConfirmationDialog::new(options(), move |gesture, _| {
        log.lock().unwrap().push(gesture);
    });
    let confirm_id = dialog.confirm_id();
    let handle = cx.show(dialog).unwrap();

    session.click(&confirm_id);
    assert_eq!(cx.state(handle), Some(DialogState::Closing));
    assert_eq!(session.trap_depth(), 0);

    // Still mounted: a second activation and an Escape change nothing
    session.click(&confirm_id);
    session.press(Key::Escape);
    assert!(!cx.close(handle, CloseGesture::Cancel));

    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Confirm]);

    cx.unmount(handle).unwrap();
    assert_eq!(cx.state(handle), None);
    assert_eq!(cx.unmount(handle), Err(DialogError::UnknownOverlay(handle)));
}

#[test]
fn test_programmatic_close() {
    let (session, gestures) = basic(None);
    let cx = session.context();

    let log = Arc::clone(&gestures);
    let handle = cx.show(ConfirmationDialog::new(options(), move |gesture, closing| {
        log.lock().unwrap().push(gesture);
        closing.unmount().unwrap();
    }))
    .unwrap();

    assert!(cx.close(handle, CloseGesture::Cancel));
    assert!(!cx.close(handle, CloseGesture::Confirm));
    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Cancel]);
}

#[test]
fn test_unmount_while_open_releases_trap() {
    let (session, gestures) = basic(None);
    let cx = session.context();
    let handle = cx.show(ConfirmationDialog::new(options(), |_, _| {})).unwrap();
    assert_eq!(session.trap_depth(), 1);

    cx.unmount(handle).unwrap();

    assert_eq!(session.trap_depth(), 0);
    assert_eq!(session.overlay_count(), 0);
    assert!(gestures.lock().unwrap().is_empty());
}

// ============================================================================
// Focus containment
// ============================================================================

#[test]
fn test_tab_stays_inside_dialog() {
    let (mut session, _) = open(None);

    let mut seen = Vec::new();
    for _ in 0..4 {
        session.press(Key::Tab);
        seen.push(session.focused_text().unwrap());
    }
    assert_eq!(seen, ["Secondary", "Primary", "Secondary", "Primary"]);

    session.press(Key::BackTab);
    assert_eq!(session.focused_text().as_deref(), Some("Secondary"));
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_incomplete_options_render_nothing() {
    let session = Session::with_config(page(), SessionConfig::new().lenient());
    let cx = session.context();

    let result = cx.show(ConfirmationDialog::new(
        ConfirmOptions::new("", "Body"),
        |_, _| panic!("never shown, never closed"),
    ));

    assert_eq!(result, Err(DialogError::Configuration { field: "title" }));
    assert_eq!(session.overlay_count(), 0);
    assert_eq!(session.trap_depth(), 0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "invalid dialog configuration")]
fn test_incomplete_options_assert_when_strict() {
    let session = Session::new(page());
    let _ = session.context().show(ConfirmationDialog::new(
        options().confirm_button_content("  "),
        |_, _| {},
    ));
}

// ============================================================================
// Accessibility and rendering
// ============================================================================

#[test]
fn test_open_dialog_passes_audit() {
    let (session, _) = open(Some(ConfirmButtonType::Danger));
    assert_eq!(session.audit(), vec![]);
}

#[test]
fn test_render() {
    let (session, _) = open(None);
    let screen = session.render(60, 20).join("\n");

    assert!(screen.contains("Confirm"));
    assert!(screen.contains("Lorem ipsum dolor sit Pippin good dog."));
    assert!(screen.contains("[ Secondary ]"));
    assert!(screen.contains("[>Primary<]"));
}

#[test]
fn test_render_very_long_content() {
    let session = Session::with_config(page(), SessionConfig::new().lenient());
    let cx = session.context();
    cx.show(ConfirmationDialog::new(
        ConfirmOptions::new("Confirm", "x".repeat(65_534)),
        |_, _| {},
    ))
    .unwrap();

    let screen = session.render(80, 24);

    assert_eq!(screen.len(), 24);
    assert!(screen.iter().any(|line| line.contains("xxxxxxxx")));
}

// ============================================================================
// Mouse
// ============================================================================

fn mouse_down(column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Screen position of the first cell showing `text`.
fn locate(screen: &[String], text: &str) -> (u16, u16) {
    screen
        .iter()
        .enumerate()
        .find_map(|(row, line)| line.find(text).map(|col| (col as u16, row as u16)))
        .unwrap_or_else(|| panic!("{text:?} is not on screen"))
}

#[test]
fn test_mouse_press_on_dialog_text_keeps_it_open() {
    let (mut session, gestures) = open(None);
    let screen = session.render(80, 24);

    let (col, row) = locate(&screen, "Lorem");
    session.handle(&[mouse_down(col + 2, row)]);

    let (col, row) = locate(&screen, "Confirm");
    session.handle(&[mouse_down(col, row)]);

    assert_eq!(session.overlay_count(), 1);
    assert!(gestures.lock().unwrap().is_empty());
    assert_eq!(session.focused_text().as_deref(), Some("Primary"));
}

#[test]
fn test_mouse_press_on_border_keeps_dialog_open() {
    let (mut session, gestures) = open(None);
    let screen = session.render(80, 24);

    let (col, row) = locate(&screen, "+-");
    session.handle(&[mouse_down(col, row), mouse_down(col + 1, row + 1)]);

    assert_eq!(session.overlay_count(), 1);
    assert!(gestures.lock().unwrap().is_empty());
}

#[test]
fn test_mouse_press_on_buttons_and_backdrop() {
    let (mut session, gestures) = open(None);
    let screen = session.render(80, 24);

    let (col, row) = locate(&screen, "[ Secondary ]");
    session.handle(&[mouse_down(col + 2, row)]);
    assert_eq!(*gestures.lock().unwrap(), vec![CloseGesture::Cancel]);

    session.click_text("Show dialog");
    session.render(80, 24);
    session.handle(&[mouse_down(79, 23)]);

    assert_eq!(
        *gestures.lock().unwrap(),
        vec![CloseGesture::Cancel, CloseGesture::Dismiss]
    );
    assert_eq!(session.overlay_count(), 0);
}
