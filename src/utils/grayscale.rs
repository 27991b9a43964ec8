//! Luminance conversion
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: i32 = 76;
const COEF_G: i32 = 150;
const COEF_B: i32 = 29;

/// Images smaller than this are converted on the calling thread
const PARALLEL_MIN_PIXELS: usize = 256 * 256;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as i32 + COEF_G * g as i32 + COEF_B * b as i32) >> 8;
    lum.min(255) as u8
}

/// Convert RGB bytes (3 per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert(rgb, width, height, 3)
}

/// Convert RGBA bytes (4 per pixel) to grayscale, ignoring alpha
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    convert(rgba, width, height, 4)
}

fn convert(pixels: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    if pixel_count == 0 {
        return gray;
    }

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = luma(pixels[idx], pixels[idx + 1], pixels[idx + 2]);
        }
    };

    // Process rows in parallel once the image is big enough to pay for it
    if pixel_count >= PARALLEL_MIN_PIXELS {
        gray.par_chunks_mut(width).enumerate().for_each(fill_row);
    } else {
        gray.chunks_mut(width).enumerate().for_each(fill_row);
    }

    gray
}

/// Single-channel intensity view of any decoded image
pub fn to_luma_image(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageRgb8(rgb) => {
            let (w, h) = rgb.dimensions();
            let gray = rgb_to_grayscale(rgb.as_raw(), w as usize, h as usize);
            GrayImage::from_raw(w, h, gray).unwrap_or_else(|| image.to_luma8())
        }
        DynamicImage::ImageRgba8(rgba) => {
            let (w, h) = rgba.dimensions();
            let gray = rgba_to_grayscale(rgba.as_raw(), w as usize, h as usize);
            GrayImage::from_raw(w, h, gray).unwrap_or_else(|| image.to_luma8())
        }
        other => {
            let rgb = other.to_rgb8();
            let (w, h) = rgb.dimensions();
            let gray = rgb_to_grayscale(rgb.as_raw(), w as usize, h as usize);
            GrayImage::from_raw(w, h, gray).unwrap_or_else(|| other.to_luma8())
        }
    }
}
