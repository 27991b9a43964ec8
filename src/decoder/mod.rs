//! Barcode decode primitive
//!
//! The detector never reads bars itself. It hands an image to a
//! [`BarcodeDecoder`] and takes the first symbol reported. [`RqrrDecoder`]
//! is the stock implementation; anything else that can turn pixels into
//! payload bytes plugs in behind the same trait.

/// QR reader backed by the `rqrr` crate
pub mod qr;

pub use qr::RqrrDecoder;

use image::DynamicImage;

/// One symbol reported by a decode pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Raw payload bytes
    pub payload: Vec<u8>,
}

impl Symbol {
    /// Wrap raw payload bytes
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Payload as UTF-8 text, if it is valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Anything that can run one decode pass over an image
pub trait BarcodeDecoder {
    /// Return every symbol found, in the order the reader reports them
    fn decode(&self, image: &DynamicImage) -> Vec<Symbol>;
}

impl<D: BarcodeDecoder + ?Sized> BarcodeDecoder for &D {
    fn decode(&self, image: &DynamicImage) -> Vec<Symbol> {
        (**self).decode(image)
    }
}

impl<D: BarcodeDecoder + ?Sized> BarcodeDecoder for Box<D> {
    fn decode(&self, image: &DynamicImage) -> Vec<Symbol> {
        (**self).decode(image)
    }
}

/// Run one decode pass and keep the first symbol as text
///
/// A first symbol that is not valid UTF-8 counts as a miss.
pub fn first_payload<D: BarcodeDecoder + ?Sized>(decoder: &D, image: &DynamicImage) -> Option<String> {
    let symbols = decoder.decode(image);
    let first = symbols.first()?;
    match first.text() {
        Some(text) => Some(text.to_string()),
        None => {
            tracing::debug!(bytes = first.payload.len(), "first symbol is not UTF-8, ignoring");
            None
        }
    }
}
