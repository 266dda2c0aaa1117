mod common;

use std::time::{Duration, Instant};

use common::{http_client, png_bytes, png_file, run, text_file, RecordingSaver};
use watermark_core::config::ClientConfig;
use watermark_core::controller::{Command, Controller, DropZoneState, Outcome};
use watermark_core::file::SelectedFile;

// Intake never touches the network; the client only backs `execute`.
const UNUSED_SERVER: &str = "http://127.0.0.1:1";

#[test]
fn test_non_image_is_rejected() {
    let mut controller = Controller::new(ClientConfig::default());
    controller.set_text("Sample");

    let cmd = controller.accept_file(text_file(), Instant::now());

    assert!(cmd.is_none());
    assert!(controller.selected_file().is_none());
    assert!(!controller.view().process_enabled);
    assert_eq!(
        controller.view().error_message(),
        Some("Please select an image file.")
    );
}

#[test]
fn test_non_image_keeps_previous_file() {
    let service = http_client(UNUSED_SERVER);
    let mut saver = RecordingSaver::default();
    let mut controller = Controller::new(ClientConfig::default());
    let cmd = controller.accept_file(png_file(4, 4), Instant::now()).unwrap();
    run(&mut controller, &service, cmd, &mut saver);
    controller.set_text("Sample");

    assert!(controller.accept_file(text_file(), Instant::now()).is_none());

    assert_eq!(controller.selected_file().unwrap().name, "photo.png");
    assert!(controller.view().process_enabled);
    assert!(controller.view().original_preview.is_some());
}

#[test]
fn test_image_produces_preview_and_enables_process() {
    let service = http_client(UNUSED_SERVER);
    let mut saver = RecordingSaver::default();
    let mut controller = Controller::new(ClientConfig::default());

    let cmd = controller.accept_file(png_file(8, 6), Instant::now()).unwrap();
    assert!(matches!(cmd, Command::DecodePreview { .. }));
    assert!(!controller.view().process_enabled, "no text yet");

    run(&mut controller, &service, cmd, &mut saver);
    let preview = controller.view().original_preview.as_ref().unwrap();
    assert_eq!((preview.width, preview.height), (8, 6));
    assert_eq!(preview.rgba.len(), 8 * 6 * 4);
    assert_eq!(controller.view().drop_zone, DropZoneState::HasFile);

    controller.set_text("Sample");
    assert!(controller.view().process_enabled);
}

#[test]
fn test_blank_text_keeps_process_disabled() {
    let service = http_client(UNUSED_SERVER);
    let mut controller = common::ready_controller(
        ClientConfig::default(),
        &service,
        png_file(4, 4),
        "   \t ",
    );
    assert!(!controller.view().process_enabled);
    assert!(controller.process().is_none());

    controller.set_text("\u{FEFF}\u{3000}");
    assert!(!controller.view().process_enabled);
    controller.set_text("\u{85}");
    assert!(controller.view().process_enabled);
}

#[test]
fn test_oversized_file_is_rejected() {
    let config = ClientConfig {
        max_upload_bytes: 16,
        ..ClientConfig::default()
    };
    let mut controller = Controller::new(config);

    let cmd = controller.accept_file(png_file(32, 32), Instant::now());

    assert!(cmd.is_none());
    assert!(controller.selected_file().is_none());
    assert!(controller
        .view()
        .error_message()
        .unwrap()
        .contains("too large"));
}

#[test]
fn test_undecodable_image_reports_error() {
    let service = http_client(UNUSED_SERVER);
    let mut saver = RecordingSaver::default();
    let mut controller = Controller::new(ClientConfig::default());
    let broken = SelectedFile::new("broken.png", "image/png", b"garbage".to_vec());

    let cmd = controller.accept_file(broken, Instant::now()).unwrap();
    run(&mut controller, &service, cmd, &mut saver);

    assert!(controller.view().original_preview.is_none());
    assert!(controller
        .view()
        .error_message()
        .unwrap()
        .starts_with("Could not read image"));
}

#[test]
fn test_stale_preview_is_ignored() {
    let mut controller = Controller::new(ClientConfig::default());
    let mut saver = RecordingSaver::default();
    let first = controller.accept_file(png_file(2, 2), Instant::now()).unwrap();
    let _second = controller.accept_file(png_file(3, 3), Instant::now()).unwrap();

    let Command::DecodePreview { generation, file } = first else {
        panic!("expected preview command");
    };
    let preview = watermark_core::preview::PreviewImage::decode(&file.bytes).unwrap();
    controller.apply(
        Outcome::PreviewDecoded {
            generation,
            result: Ok(preview),
        },
        &mut saver,
        Instant::now(),
    );

    assert!(controller.view().original_preview.is_none());
}

#[test]
fn test_drag_states() {
    let service = http_client(UNUSED_SERVER);
    let mut saver = RecordingSaver::default();
    let mut controller = Controller::new(ClientConfig::default());
    assert_eq!(controller.view().drop_zone, DropZoneState::Empty);

    controller.drag_over();
    assert_eq!(controller.view().drop_zone, DropZoneState::DragOver);
    controller.drag_leave();
    assert_eq!(controller.view().drop_zone, DropZoneState::Empty);

    controller.drag_over();
    let cmd = controller.accept_file(png_file(2, 2), Instant::now()).unwrap();
    assert_ne!(controller.view().drop_zone, DropZoneState::DragOver);
    run(&mut controller, &service, cmd, &mut saver);
    assert_eq!(controller.view().drop_zone, DropZoneState::HasFile);

    controller.drag_over();
    controller.drag_leave();
    assert_eq!(controller.view().drop_zone, DropZoneState::HasFile);
}

#[test]
fn test_error_clears_after_timeout() {
    let mut controller = Controller::new(ClientConfig::default());
    let t0 = Instant::now();
    controller.accept_file(text_file(), t0);
    assert!(controller.view().error.is_some());

    controller.tick(t0 + Duration::from_secs(4));
    assert!(controller.view().error.is_some());

    controller.tick(t0 + Duration::from_secs(5));
    assert!(controller.view().error.is_none());
}

#[test]
fn test_newer_error_replaces_older() {
    let mut controller = Controller::new(ClientConfig::default());
    let t0 = Instant::now();
    controller.show_error("first", t0);
    controller.show_error("second", t0 + Duration::from_secs(3));

    assert_eq!(controller.view().error_message(), Some("second"));
    controller.tick(t0 + Duration::from_secs(6));
    assert_eq!(controller.view().error_message(), Some("second"));
}

#[test]
fn test_accepting_image_clears_error() {
    let mut controller = Controller::new(ClientConfig::default());
    controller.accept_file(text_file(), Instant::now());
    assert!(controller.view().error.is_some());

    controller.accept_file(png_file(2, 2), Instant::now());
    assert!(controller.view().error.is_none());
}

#[test]
fn test_from_path_declares_media_type() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("shot.PNG");
    std::fs::write(&png, png_bytes(2, 2)).unwrap();
    let txt = dir.path().join("readme.txt");
    std::fs::write(&txt, "hi").unwrap();

    let f = SelectedFile::from_path(&png).unwrap();
    assert_eq!(f.name, "shot.PNG");
    assert_eq!(f.media_type, "image/png");
    assert!(f.is_image());

    let f = SelectedFile::from_path(&txt).unwrap();
    assert_eq!(f.media_type, "application/octet-stream");
    assert!(!f.is_image());
}
