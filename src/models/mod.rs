pub mod config;
pub mod detection;
pub mod outcome;

pub use config::{RenameOptions, RunConfig};
pub use detection::{DetectionMode, DetectionResult};
pub use outcome::{EntryReport, FileOutcome, RunSummary};
