//! scan_rename - rename scanned images after the barcode they carry
//!
//! Point a [`FolderProcessor`] at a directory and every image in it is
//! decoded, the payload optionally trimmed, and the file renamed to
//! `<payload>.jpg`. Three detection strategies trade speed for recall:
//! plain, grayscale, and an exhaustive rotation/scale sweep over a
//! contrast-enhanced copy.
//!
//! ```no_run
//! use scan_rename::{DetectionMode, MemorySink, RenameOptions, RunConfig, process_directory};
//!
//! let config = RunConfig::new("/path/to/scans")
//!     .with_mode(DetectionMode::ExhaustiveRotateScale)
//!     .with_options(RenameOptions::new(true, false));
//! let mut log = MemorySink::new();
//! let _ = process_directory(&config, &mut log);
//! for line in log.lines() {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Barcode decode primitive and the stock QR reader
pub mod decoder;
/// Detection strategies and the exhaustive search order
pub mod detector;
/// Run-level and per-entry errors
pub mod error;
/// Image loading
pub mod loader;
/// Operator log sinks
pub mod log;
/// Core data structures (modes, options, results, outcomes)
pub mod models;
/// Payload to filename transforms
pub mod naming;
/// Directory walk and rename
pub mod processor;
/// Image processing helpers (grayscale, contrast, rotation, resize)
pub mod utils;

pub use decoder::{BarcodeDecoder, RqrrDecoder, Symbol};
pub use detector::Detector;
pub use error::{EntryError, RunError};
pub use log::{ConsoleSink, LogSink, MemorySink, TracingSink};
pub use models::{
    DetectionMode, DetectionResult, EntryReport, FileOutcome, RenameOptions, RunConfig, RunSummary,
};
pub use processor::{FolderProcessor, process_directory};
