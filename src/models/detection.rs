/// Strategy applied to every image of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionMode {
    /// Single decode pass on the image as loaded
    #[default]
    Plain,
    /// Convert to luminance, then a single decode pass
    Grayscale,
    /// Contrast enhancement followed by the rotation/scale sweep
    ExhaustiveRotateScale,
}

impl DetectionMode {
    /// Short operator-facing name
    pub fn name(&self) -> &'static str {
        match self {
            DetectionMode::Plain => "plain",
            DetectionMode::Grayscale => "grayscale",
            DetectionMode::ExhaustiveRotateScale => "exhaustive",
        }
    }
}

/// Outcome of running the detector on one image
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionResult {
    /// A payload was decoded
    Found {
        /// Decoded text
        payload: String,
        /// Rotation (degrees, counter-clockwise) at which it was read
        angle: u32,
        /// Resize factor at which it was read (1.0 for native scale)
        scale: f32,
    },
    /// No configuration produced a payload
    NotFound,
}

impl DetectionResult {
    /// Result for the single-pass modes, which never rotate or resize
    pub fn at_native(payload: String) -> Self {
        DetectionResult::Found {
            payload,
            angle: 0,
            scale: 1.0,
        }
    }

    /// Decoded payload, if any
    pub fn payload(&self) -> Option<&str> {
        match self {
            DetectionResult::Found { payload, .. } => Some(payload),
            DetectionResult::NotFound => None,
        }
    }

    /// Check whether a payload was found
    pub fn is_found(&self) -> bool {
        matches!(self, DetectionResult::Found { .. })
    }
}
