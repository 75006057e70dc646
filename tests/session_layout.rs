use std::path::PathBuf;

use chrono::TimeZone as _;
use slidecap::CaptureSession;

fn local(h: u32, m: u32, s: u32) -> chrono::DateTime<chrono::Local> {
    chrono::Local.with_ymd_and_hms(2024, 5, 17, h, m, s).unwrap()
}

#[test]
fn runs_get_unique_timestamped_sibling_roots() {
    let root = PathBuf::from("target").join("session_unique_roots");

    let first = CaptureSession::create(&root, local(10, 0, 0)).unwrap();
    let marker = first.write_screenshot(0, b"first-run").unwrap();

    let second = CaptureSession::create(&root, local(10, 0, 1)).unwrap();

    assert_ne!(first.root(), second.root());
    // The earlier sibling is left untouched.
    assert!(marker.exists());
    assert_eq!(std::fs::read(&marker).unwrap(), b"first-run");
}

#[test]
fn creation_is_idempotent() {
    let root = PathBuf::from("target").join("session_idempotent");

    let first = CaptureSession::create(&root, local(11, 0, 0)).unwrap();
    first.write_screenshot(2, b"still").unwrap();

    // Same instant again: directories already exist, nothing is recreated.
    let again = CaptureSession::create(&root, local(11, 0, 0)).unwrap();
    assert_eq!(first.root(), again.root());
    assert!(first.screenshot_path(2).exists());
}

#[test]
fn artifacts_are_keyed_by_slide_index() {
    let root = PathBuf::from("target").join("session_artifact_names");
    let session = CaptureSession::create(&root, local(12, 0, 0)).unwrap();

    assert!(
        session
            .screenshot_path(7)
            .ends_with(PathBuf::from("screenshots").join("7.png"))
    );
    assert!(
        session
            .recording_path(7)
            .ends_with(PathBuf::from("recordings").join("7.mp4"))
    );
}
