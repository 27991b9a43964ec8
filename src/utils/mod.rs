//! Image processing helpers for barcode detection
//!
//! This module provides the pixel-level transforms the detector relies on:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Contrast enhancement (L*a*b* conversion and CLAHE)
//! - Rotation about the center and uniform resizing

pub mod contrast;
pub mod grayscale;
pub mod transform;
