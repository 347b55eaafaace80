use crate::common::harness::ViewerTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn test_fullscreen_hides_host_chrome() {
    let mut harness =
        ViewerTestHarness::with_texts(80, 10, "let a = 1;", "let a = 2;", "rust").unwrap();
    harness.assert_screen_contains("diffpane");
    harness.assert_screen_contains("| row 1");

    harness.type_keys("f").unwrap();
    assert!(harness.viewer().state().is_fullscreen);
    harness.assert_screen_not_contains("diffpane");
    harness.assert_screen_not_contains("| row 1");
    assert!(harness.screen_row(0).contains("FULLSCREEN"));
}

#[test]
fn test_escape_leaves_fullscreen_then_quits() {
    let mut harness =
        ViewerTestHarness::with_texts(80, 10, "let a = 1;", "let a = 2;", "rust").unwrap();
    harness.type_keys("f").unwrap();

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(!harness.viewer().state().is_fullscreen);
    assert!(!harness.app().should_quit());
    harness.assert_screen_contains("diffpane");
    harness.assert_screen_not_contains("FULLSCREEN");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(harness.app().should_quit());
}

#[test]
fn test_fullscreen_survives_mode_toggle() {
    let mut harness = ViewerTestHarness::with_texts(80, 10, "a", "b", "text").unwrap();
    harness.type_keys("fm").unwrap();
    assert!(harness.viewer().state().is_fullscreen);
    assert!(harness.screen_row(0).contains("FULLSCREEN"));
    harness.assert_screen_contains("+ b");
}
