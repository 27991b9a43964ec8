//! Barcode detection strategies
//!
//! A [`Detector`] wraps a decode primitive and offers three strategies of
//! increasing cost and recall:
//! - plain: one decode pass on the image as loaded
//! - grayscale: one decode pass on the luminance image
//! - exhaustive: contrast enhancement, then up to 60 passes over rotated
//!   and resized copies (see [`search`])
//!
//! Detection never fails: anything that cannot be read is `NotFound`.

/// Rotation/scale search order for the exhaustive strategy
pub mod search;

use crate::decoder::{BarcodeDecoder, RqrrDecoder, first_payload};
use crate::log::LogSink;
use crate::models::{DetectionMode, DetectionResult};
use crate::utils::contrast::{enhance_contrast, mean_luma};
use crate::utils::grayscale::to_luma_image;
use crate::utils::transform::{rotate, scale};
use image::DynamicImage;
use search::{SearchPlan, SearchStep, run_search};

/// Detector with a pluggable decode primitive
#[derive(Debug, Clone, Default)]
pub struct Detector<D = RqrrDecoder> {
    decoder: D,
}

impl Detector<RqrrDecoder> {
    /// Create a detector using the stock QR reader
    pub fn new() -> Self {
        Self::with_decoder(RqrrDecoder::new())
    }
}

impl<D: BarcodeDecoder> Detector<D> {
    /// Create a detector around any decode primitive
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// The wrapped decode primitive
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Run the strategy selected by `mode`
    ///
    /// Only the exhaustive strategy writes to `sink`.
    pub fn detect(
        &self,
        mode: DetectionMode,
        image: &DynamicImage,
        sink: &mut dyn LogSink,
    ) -> DetectionResult {
        match mode {
            DetectionMode::Plain => self.detect_plain(image),
            DetectionMode::Grayscale => self.detect_grayscale(image),
            DetectionMode::ExhaustiveRotateScale => self.detect_exhaustive(image, sink),
        }
    }

    /// One decode pass on the image as given
    pub fn detect_plain(&self, image: &DynamicImage) -> DetectionResult {
        match first_payload(&self.decoder, image) {
            Some(payload) => DetectionResult::at_native(payload),
            None => DetectionResult::NotFound,
        }
    }

    /// One decode pass on the single-channel intensity image
    pub fn detect_grayscale(&self, image: &DynamicImage) -> DetectionResult {
        let gray = DynamicImage::ImageLuma8(to_luma_image(image));
        self.detect_plain(&gray)
    }

    /// Contrast enhancement followed by the rotation/scale sweep
    ///
    /// Progress lines go to `sink`: one for the hit, or one when every
    /// step missed.
    pub fn detect_exhaustive(&self, image: &DynamicImage, sink: &mut dyn LogSink) -> DetectionResult {
        let enhanced = enhance_contrast(&image.to_rgb8());
        tracing::debug!(
            width = enhanced.width(),
            height = enhanced.height(),
            mean_luma = mean_luma(&enhanced),
            "contrast enhanced"
        );

        // Rotate once per angle; every scale step of that angle reuses it
        let mut rotated: Option<(u32, DynamicImage)> = None;
        let attempt = |step: &SearchStep| {
            if rotated.as_ref().map(|(angle, _)| *angle) != Some(step.angle) {
                let turned = rotate(&enhanced, step.angle);
                rotated = Some((step.angle, DynamicImage::ImageRgb8(turned)));
            }
            let (_, base) = rotated.as_ref()?;
            match (step.scale, base) {
                (Some(factor), DynamicImage::ImageRgb8(rgb)) => {
                    first_payload(&self.decoder, &DynamicImage::ImageRgb8(scale(rgb, factor)))
                }
                _ => first_payload(&self.decoder, base),
            }
        };

        run_search(SearchPlan::new(), attempt, sink)
    }
}
