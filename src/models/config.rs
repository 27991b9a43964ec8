use super::DetectionMode;
use std::path::{Path, PathBuf};

/// Text transforms applied to a payload before it becomes a filename stem
///
/// Applied in declaration order: zeros first, then the last four characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameOptions {
    /// Remove every leading `'0'`
    pub strip_leading_zeros: bool,
    /// Remove the last four characters
    pub strip_last_four_chars: bool,
}

impl RenameOptions {
    /// Options with both transforms enabled or disabled individually
    pub fn new(strip_leading_zeros: bool, strip_last_four_chars: bool) -> Self {
        Self {
            strip_leading_zeros,
            strip_last_four_chars,
        }
    }
}

/// Everything one run needs, fixed at submission time
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    directory: PathBuf,
    mode: DetectionMode,
    options: RenameOptions,
}

impl RunConfig {
    /// Plain-mode run over `directory` with no text transforms
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            mode: DetectionMode::default(),
            options: RenameOptions::default(),
        }
    }

    /// Select the detection strategy
    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Select the payload transforms
    pub fn with_options(mut self, options: RenameOptions) -> Self {
        self.options = options;
        self
    }

    /// Directory whose entries get renamed
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Detection strategy for every entry
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Payload transforms
    pub fn options(&self) -> RenameOptions {
        self.options
    }
}
