use crate::common::harness::ViewerTestHarness;
use diffpane::app::build_download_artifact;

#[test]
fn test_export_writes_both_documents() {
    let mut harness =
        ViewerTestHarness::with_texts(100, 10, "old line", "new line", "text").unwrap();
    harness.type_keys("d").unwrap();

    let entries: Vec<_> = std::fs::read_dir(harness.export_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("diff-") && name.ends_with(".txt"), "{name}");

    let written = std::fs::read(&entries[0]).unwrap();
    let expected =
        build_download_artifact(harness.viewer().original(), harness.viewer().modified());
    assert_eq!(written, expected);
    assert_eq!(
        String::from_utf8(written).unwrap(),
        "=== Original ===\nold line\n\n=== Modified ===\nnew line\n"
    );

    harness.assert_screen_contains("Exported to");
    assert!(harness.app().status_message().unwrap().starts_with("Exported to"));
}

#[test]
fn test_export_after_swap_follows_current_sides() {
    let mut harness = ViewerTestHarness::with_texts(100, 10, "left", "right", "text").unwrap();
    harness.type_keys("sd").unwrap();

    let path = std::fs::read_dir(harness.export_dir())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.starts_with("=== Modified ===\nright\n"));
    assert!(!harness.viewer().state().is_fullscreen);
}
