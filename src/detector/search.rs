//! Rotation/scale search order
//!
//! The exhaustive strategy tries, for each angle, the native-scale image and
//! then every resize factor. [`SearchPlan`] yields those steps lazily in that
//! fixed order and [`run_search`] consumes them until the first hit, so the
//! order can be checked without decoding a single image.

use crate::log::LogSink;
use crate::models::DetectionResult;

/// Rotation angles in degrees, tried in this order
pub const ANGLES: [u32; 12] = [0, 30, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330];

/// Resize factors tried after the native attempt at each angle
pub const SCALES: [f32; 4] = [0.5, 1.0, 1.5, 2.0];

/// Steps per angle: native plus one per scale factor
const STEPS_PER_ANGLE: usize = SCALES.len() + 1;

/// One decode attempt of the exhaustive search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStep {
    /// Rotation in degrees
    pub angle: u32,
    /// Resize factor, `None` for the rotated image as-is
    pub scale: Option<f32>,
}

impl SearchStep {
    /// Scale reported in a [`DetectionResult`]
    pub fn effective_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Operator log line for a hit at this step
    pub fn found_line(&self, payload: &str) -> String {
        match self.scale {
            None => format!("Found barcode {payload} at angle {} degrees", self.angle),
            Some(scale) => format!(
                "Found barcode {payload} at angle {} degrees and scale {scale:.1}",
                self.angle
            ),
        }
    }
}

/// Operator log line when every step missed
pub const NOT_FOUND_LINE: &str = "Barcode not found at any angle or scale";

/// Lazy sequence of all search steps in their fixed order
#[derive(Debug, Clone, Default)]
pub struct SearchPlan {
    position: usize,
}

impl SearchPlan {
    /// Start at angle 0, native scale
    pub fn new() -> Self {
        Self::default()
    }

    /// Worst-case number of decode attempts
    pub const fn total_steps() -> usize {
        ANGLES.len() * STEPS_PER_ANGLE
    }
}

impl Iterator for SearchPlan {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.position >= Self::total_steps() {
            return None;
        }
        let angle = ANGLES[self.position / STEPS_PER_ANGLE];
        let scale = match self.position % STEPS_PER_ANGLE {
            0 => None,
            k => Some(SCALES[k - 1]),
        };
        self.position += 1;
        Some(SearchStep { angle, scale })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = Self::total_steps().saturating_sub(self.position);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SearchPlan {}

/// Consume `steps` until `attempt` yields a payload
///
/// The first hit is logged and returned; if every step misses a single
/// not-found line is logged.
pub fn run_search<I, F>(steps: I, mut attempt: F, sink: &mut dyn LogSink) -> DetectionResult
where
    I: IntoIterator<Item = SearchStep>,
    F: FnMut(&SearchStep) -> Option<String>,
{
    for step in steps {
        let hit = attempt(&step);
        tracing::debug!(angle = step.angle, scale = ?step.scale, hit = hit.is_some(), "search step");
        if let Some(payload) = hit {
            sink.append(&step.found_line(&payload));
            return DetectionResult::Found {
                payload,
                angle: step.angle,
                scale: step.effective_scale(),
            };
        }
    }

    sink.append(NOT_FOUND_LINE);
    DetectionResult::NotFound
}
