//! Tests against real QR symbols
//!
//! Fixtures are rendered with the `qrcode` crate and read back through the
//! stock `rqrr` reader, covering every detection mode and one full run.

use image::{DynamicImage, GrayImage, Luma, RgbImage, imageops};
use qrcode::QrCode;
use scan_rename::utils::transform::rotate;
use scan_rename::{
    BarcodeDecoder, DetectionMode, DetectionResult, Detector, FileOutcome, MemorySink,
    RenameOptions, RqrrDecoder, RunConfig, process_directory,
};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const PAYLOAD: &str = "000123456789";

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Render `text` as a QR code centered on a white page
fn rendered_code(text: &str) -> RgbImage {
    let code = QrCode::new(text.as_bytes()).expect("payload should fit a QR code");
    let symbol = code
        .render::<Luma<u8>>()
        .module_dimensions(6, 6)
        .build();

    let margin = 80;
    let mut page = GrayImage::from_pixel(
        symbol.width() + 2 * margin,
        symbol.height() + 2 * margin,
        Luma([255]),
    );
    imageops::overlay(&mut page, &symbol, margin as i64, margin as i64);
    DynamicImage::ImageLuma8(page).to_rgb8()
}

fn scratch_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX epoch")
        .as_nanos();
    let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("scan_rename_qr_{label}_{nanos}_{sequence}"));
    fs::create_dir_all(&path).expect("failed to create scratch dir");
    path
}

#[test]
fn rqrr_reads_rendered_code() {
    let image = DynamicImage::ImageRgb8(rendered_code(PAYLOAD));
    let symbols = RqrrDecoder::new().decode(&image);

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].text(), Some(PAYLOAD));
}

#[test]
fn every_mode_finds_upright_code() {
    let image = DynamicImage::ImageRgb8(rendered_code(PAYLOAD));
    let detector = Detector::new();
    let expected = DetectionResult::Found {
        payload: PAYLOAD.to_string(),
        angle: 0,
        scale: 1.0,
    };

    for mode in [
        DetectionMode::Plain,
        DetectionMode::Grayscale,
        DetectionMode::ExhaustiveRotateScale,
    ] {
        let mut sink = MemorySink::new();
        assert_eq!(detector.detect(mode, &image, &mut sink), expected, "mode {}", mode.name());
    }
}

#[test]
fn exhaustive_mode_finds_rotated_code() {
    let tilted = DynamicImage::ImageRgb8(rotate(&rendered_code(PAYLOAD), 30));
    let mut sink = MemorySink::new();
    let result = Detector::new().detect_exhaustive(&tilted, &mut sink);

    assert_eq!(result.payload(), Some(PAYLOAD));
    assert_eq!(sink.count_containing(&format!("Found barcode {PAYLOAD}")), 1);
}

#[test]
fn process_directory_renames_real_scan() {
    let dir = scratch_dir("end_to_end");
    rendered_code(PAYLOAD)
        .save_with_format(dir.join("scan_0001.png"), image::ImageFormat::Png)
        .expect("failed to write fixture");

    let config = RunConfig::new(&dir).with_options(RenameOptions::new(true, false));
    let mut log = MemorySink::new();
    let summary = process_directory(&config, &mut log).expect("run should complete");

    assert_eq!(summary.renamed(), 1);
    assert!(matches!(
        &summary.entries[0].1,
        Ok(FileOutcome::Renamed { to, .. }) if to == "123456789.jpg"
    ));
    assert!(dir.join("123456789.jpg").is_file());
    assert!(!dir.join("scan_0001.png").exists());
    assert_eq!(log.count_containing("Renamed 'scan_0001.png' to '123456789.jpg'"), 1);

    let _ = fs::remove_dir_all(&dir);
}
