use crate::common::harness::ViewerTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use diffpane::app::{RenderMode, ViewerOptions};
use diffpane::view::theme::ThemeKind;

fn harness() -> ViewerTestHarness {
    ViewerTestHarness::with_texts(80, 12, "a\nb", "a\nb\nc", "text").unwrap()
}

#[test]
fn test_initial_screen_shows_labels_and_panes() {
    let harness = harness();
    harness.assert_screen_contains("diffpane");
    harness.assert_screen_contains("Original vs Modified");
    harness.assert_screen_contains("side-by-side");
    // Side-by-side shows raw documents without markers
    harness.assert_screen_not_contains("+ c");
}

#[test]
fn test_custom_labels() {
    let options = ViewerOptions {
        original_label: Some("before.txt".to_string()),
        modified_label: Some("after.txt".to_string()),
        ..ViewerOptions::new("x", "y", "text")
    };
    let harness = ViewerTestHarness::new(80, 12, options).unwrap();
    harness.assert_screen_contains("before.txt vs after.txt");
}

#[test]
fn test_toggle_inline_shows_markers() {
    let mut harness = harness();
    harness.type_keys("m").unwrap();

    assert_eq!(harness.viewer().state().render_mode, RenderMode::Inline);
    harness.assert_screen_contains("+ c");
    harness.assert_screen_contains("inline view");

    harness.type_keys("m").unwrap();
    assert_eq!(harness.viewer().state().render_mode, RenderMode::SideBySide);
    harness.assert_screen_not_contains("+ c");
}

#[test]
fn test_swap_in_inline_mode_inverts_markers() {
    let mut harness = harness();
    harness.type_keys("m").unwrap();
    harness.assert_screen_contains("+ c");

    harness.type_keys("s").unwrap();
    harness.assert_screen_contains("- c");
    harness.assert_screen_not_contains("+ c");
    harness.assert_screen_contains("Modified vs Original");
    harness.assert_screen_contains("Swapped: Modified is now the original");
}

#[test]
fn test_toggle_theme_repaints() {
    let mut harness = harness();
    let before = harness.background_at(79, 3);

    harness.type_keys("t").unwrap();
    assert_eq!(harness.viewer().state().theme, ThemeKind::Light);
    assert_ne!(harness.background_at(79, 3), before);
    harness.assert_screen_contains("light theme");
}

#[test]
fn test_help_overlay_opens_and_closes() {
    let mut harness = harness();
    harness.type_keys("?").unwrap();
    assert!(harness.app().is_help_visible());
    harness.assert_screen_contains("KEYBOARD SHORTCUTS");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(!harness.app().is_help_visible());
    assert!(!harness.app().should_quit());
    harness.assert_screen_not_contains("KEYBOARD SHORTCUTS");
}

#[test]
fn test_quit_keys() {
    let mut harness = harness();
    harness.type_keys("q").unwrap();
    assert!(harness.app().should_quit());

    let mut harness = self::harness();
    harness
        .send_key(KeyCode::Char('c'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.app().should_quit());
}

#[test]
fn test_scrolling_long_documents() {
    let text: String = (0..40).map(|i| format!("line {i}\n")).collect();
    let mut harness = ViewerTestHarness::with_texts(80, 12, &text, &text, "text").unwrap();
    harness.assert_screen_contains("line 0");

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("line 39");
    harness.assert_screen_not_contains("line 0 ");

    harness.type_keys("g").unwrap();
    assert_eq!(harness.viewer().view_state().scroll_row, 0);
    harness.assert_screen_contains("line 0");
}
