//! Folder processing: detect, derive a name, rename
//!
//! A run lists the directory once, then handles every entry in listing
//! order (whatever order the platform returns, not sorted). Each entry ends
//! in exactly one report and one operator log line; a failing entry never
//! stops the run. Files renamed during the run are not revisited because
//! the listing is taken up front.

use crate::decoder::{BarcodeDecoder, RqrrDecoder};
use crate::detector::Detector;
use crate::error::{EntryError, Result, RunError};
use crate::loader::load_image;
use crate::log::LogSink;
use crate::models::{DetectionResult, EntryReport, FileOutcome, RunConfig, RunSummary};
use crate::naming::{target_file_name, transform_payload};
use std::fs;
use std::io;
use std::path::Path;

/// Renames every image of a directory after its barcode
#[derive(Debug, Clone, Default)]
pub struct FolderProcessor<D = RqrrDecoder> {
    detector: Detector<D>,
}

impl FolderProcessor<RqrrDecoder> {
    /// Processor using the stock QR reader
    pub fn new() -> Self {
        Self::with_detector(Detector::new())
    }
}

impl<D: BarcodeDecoder> FolderProcessor<D> {
    /// Processor around an existing detector
    pub fn with_detector(detector: Detector<D>) -> Self {
        Self { detector }
    }

    /// The detector used for every entry
    pub fn detector(&self) -> &Detector<D> {
        &self.detector
    }

    /// Process one directory to completion
    ///
    /// Only a missing directory (or one that cannot be listed) fails the
    /// run; it is logged before the error is returned.
    pub fn run(&self, config: &RunConfig, sink: &mut dyn LogSink) -> Result<RunSummary> {
        let dir = config.directory();
        if !dir.is_dir() {
            let err = RunError::NotADirectory(dir.to_path_buf());
            sink.append(&err.to_string());
            return Err(err);
        }

        sink.append(&format!("Processing directory: {}", dir.display()));
        tracing::info!(
            directory = %dir.display(),
            mode = config.mode().name(),
            strip_leading_zeros = config.options().strip_leading_zeros,
            strip_last_four_chars = config.options().strip_last_four_chars,
            "run started"
        );

        let listing = match fs::read_dir(dir) {
            Ok(entries) => entries.collect::<Vec<_>>(),
            Err(source) => {
                let err = RunError::Listing {
                    path: dir.to_path_buf(),
                    source,
                };
                sink.append(&err.to_string());
                return Err(err);
            }
        };

        let mut summary = RunSummary::default();
        for entry in listing {
            let (name, report) = match entry {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let report = self.process_entry(&entry.path(), &name, config, sink);
                    (name, report)
                }
                Err(err) => ("<unreadable entry>".to_string(), Err(EntryError::Io(err))),
            };
            sink.append(&describe(&name, &report));
            if let Err(err) = &report {
                tracing::warn!(entry = %name, error = %err, "entry failed");
            }
            summary.record(name, report);
        }

        sink.append(&format!(
            "Done: {} renamed, {} skipped, {} failed",
            summary.renamed(),
            summary.skipped(),
            summary.failed()
        ));
        tracing::info!(
            total = summary.total(),
            renamed = summary.renamed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "run finished"
        );
        Ok(summary)
    }

    fn process_entry(
        &self,
        path: &Path,
        name: &str,
        config: &RunConfig,
        sink: &mut dyn LogSink,
    ) -> EntryReport {
        if !path.is_file() {
            return Ok(FileOutcome::SkippedNotAFile);
        }

        let image = match load_image(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::debug!(entry = %name, error = %err, "not loadable as an image");
                return Ok(FileOutcome::SkippedNotAnImage);
            }
        };

        let payload = match self.detector.detect(config.mode(), &image, sink) {
            DetectionResult::Found { payload, angle, scale } => {
                tracing::debug!(entry = %name, %payload, angle, scale, "barcode found");
                payload
            }
            DetectionResult::NotFound => return Ok(FileOutcome::SkippedNoBarcode),
        };
        // A symbol with nothing in it names nothing
        if payload.is_empty() {
            return Ok(FileOutcome::SkippedNoBarcode);
        }

        let stem = transform_payload(&payload, &config.options());
        let new_name = target_file_name(stem)?;

        let target = path.with_file_name(&new_name);
        if is_taken_by_other(path, &target)? {
            return Err(EntryError::TargetExists { target });
        }

        fs::rename(path, &target).map_err(|source| EntryError::Rename {
            from: path.to_path_buf(),
            to: target.clone(),
            source,
        })?;

        Ok(FileOutcome::Renamed {
            from: name.to_string(),
            to: new_name,
        })
    }
}

/// Process `config.directory()` with the stock QR reader
pub fn process_directory(config: &RunConfig, sink: &mut dyn LogSink) -> Result<RunSummary> {
    FolderProcessor::new().run(config, sink)
}

/// Whether `target` is occupied by anything other than `path` itself
///
/// Symlinks are not followed: a link at the target name, dangling or not,
/// counts as occupied.
fn is_taken_by_other(path: &Path, target: &Path) -> std::result::Result<bool, EntryError> {
    let meta = match fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err.into()),
    };
    if path == target {
        return Ok(false);
    }
    if meta.file_type().is_symlink() {
        return Ok(true);
    }
    // Same file under another spelling
    Ok(fs::canonicalize(path)? != fs::canonicalize(target)?)
}

/// Operator log line for one entry report
pub fn describe(name: &str, report: &EntryReport) -> String {
    match report {
        Ok(FileOutcome::Renamed { from, to }) => format!("Renamed '{from}' to '{to}'"),
        Ok(FileOutcome::SkippedNotAFile) => format!("Skipping {name}: not a file"),
        Ok(FileOutcome::SkippedNotAnImage) => format!("Skipping {name}: not an image"),
        Ok(FileOutcome::SkippedNoBarcode) => format!("No barcode found in {name}"),
        Err(err) => format!("Error processing {name}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lines() {
        assert_eq!(
            describe(
                "scan1.png",
                &Ok(FileOutcome::Renamed {
                    from: "scan1.png".into(),
                    to: "123.jpg".into()
                })
            ),
            "Renamed 'scan1.png' to '123.jpg'"
        );
        assert_eq!(
            describe("sub", &Ok(FileOutcome::SkippedNotAFile)),
            "Skipping sub: not a file"
        );
        assert_eq!(
            describe("a.txt", &Ok(FileOutcome::SkippedNotAnImage)),
            "Skipping a.txt: not an image"
        );
        assert_eq!(
            describe("b.png", &Ok(FileOutcome::SkippedNoBarcode)),
            "No barcode found in b.png"
        );
        assert_eq!(
            describe("c.png", &Err(EntryError::EmptyName)),
            "Error processing c.png: payload is empty after name transforms"
        );
    }
}
