#![allow(dead_code)]

use std::io::Cursor;
use std::time::Instant;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use watermark_core::client::{HttpClient, ProcessingService};
use watermark_core::config::ClientConfig;
use watermark_core::controller::{execute, Command, Controller, ObjectHandle, SaveTarget};
use watermark_core::error::{Result, WatermarkError};
use watermark_core::file::SelectedFile;

/// Encode a solid-color RGBA image as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

/// Encode a solid-color RGB image as JPEG, the server's output format.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 30, 30]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).expect("encode jpeg");
    buf.into_inner()
}

pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(jpeg_bytes(width, height))
    )
}

pub fn png_file(width: u32, height: u32) -> SelectedFile {
    SelectedFile::new("photo.png", "image/png", png_bytes(width, height))
}

pub fn text_file() -> SelectedFile {
    SelectedFile::new("notes.txt", "text/plain", b"not an image".to_vec())
}

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ClientConfig::default()
    }
}

pub fn http_client(base_url: &str) -> HttpClient {
    HttpClient::new(&config_for(base_url)).expect("build http client")
}

/// Save target that records every save and can be told to fail.
#[derive(Default)]
pub struct RecordingSaver {
    pub saves: Vec<SavedFile>,
    pub fail: bool,
}

pub struct SavedFile {
    pub filename: String,
    pub url: String,
    pub bytes: Vec<u8>,
}

impl SaveTarget for RecordingSaver {
    fn save(&mut self, filename: &str, object: ObjectHandle) -> Result<()> {
        self.saves.push(SavedFile {
            filename: filename.to_string(),
            url: object.url(),
            bytes: object.bytes().to_vec(),
        });
        if self.fail {
            return Err(WatermarkError::Save("disk full".into()));
        }
        Ok(())
    }
}

/// Execute a command inline and feed its outcome back.
pub fn run(
    controller: &mut Controller,
    service: &dyn ProcessingService,
    command: Command,
    saver: &mut RecordingSaver,
) {
    let outcome = execute(service, command);
    controller.apply(outcome, saver, Instant::now());
}

/// Controller with `file` accepted, its preview decoded, and `text` entered.
pub fn ready_controller(
    config: ClientConfig,
    service: &dyn ProcessingService,
    file: SelectedFile,
    text: &str,
) -> Controller {
    let mut controller = Controller::new(config);
    let mut saver = RecordingSaver::default();
    let cmd = controller
        .accept_file(file, Instant::now())
        .expect("image accepted");
    run(&mut controller, service, cmd, &mut saver);
    controller.set_text(text);
    controller
}
