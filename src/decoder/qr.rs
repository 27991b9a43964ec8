use super::{BarcodeDecoder, Symbol};
use crate::utils::grayscale::to_luma_image;
use image::DynamicImage;
use rqrr::PreparedImage;

/// QR code reader using `rqrr`
///
/// `rqrr` works on intensity only, so color input is reduced to luminance
/// before the grids are located.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self
    }
}

impl BarcodeDecoder for RqrrDecoder {
    fn decode(&self, image: &DynamicImage) -> Vec<Symbol> {
        let gray = to_luma_image(image);
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        if w == 0 || h == 0 {
            return Vec::new();
        }

        let mut prepared =
            PreparedImage::prepare_from_greyscale(w, h, |x, y| gray.as_raw()[y * w + x]);
        let grids = prepared.detect_grids();

        let mut symbols = Vec::with_capacity(grids.len());
        for grid in &grids {
            let mut payload = Vec::new();
            match grid.decode_to(&mut payload) {
                Ok(_) => symbols.push(Symbol::new(payload)),
                Err(err) => tracing::trace!(error = ?err, "grid located but not decodable"),
            }
        }
        symbols
    }
}
