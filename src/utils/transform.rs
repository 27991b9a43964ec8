//! Rotation and resize used by the exhaustive search

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Rotate counter-clockwise by `degrees` about the canvas center
///
/// The canvas keeps its size: corners that leave it are clipped and
/// uncovered pixels are filled with black.
pub fn rotate(image: &RgbImage, degrees: u32) -> RgbImage {
    if degrees % 360 == 0 {
        return image.clone();
    }
    // imageproc rotates clockwise for positive theta
    let theta = -(degrees as f32).to_radians();
    rotate_about_center(image, theta, Interpolation::Bilinear, Rgb([0, 0, 0]))
}

/// Target dimensions for a uniform resize, never below one pixel
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let w = (width as f32 * factor).round().max(1.0) as u32;
    let h = (height as f32 * factor).round().max(1.0) as u32;
    (w, h)
}

/// Uniform resize with linear filtering
pub fn scale(image: &RgbImage, factor: f32) -> RgbImage {
    let (w, h) = scaled_dimensions(image.width(), image.height(), factor);
    if (w, h) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, w, h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(100, 50, 0.5), (50, 25));
        assert_eq!(scaled_dimensions(100, 50, 1.5), (150, 75));
        assert_eq!(scaled_dimensions(101, 51, 0.5), (51, 26));
        assert_eq!(scaled_dimensions(1, 1, 0.5), (1, 1));
    }

    #[test]
    fn test_scale_changes_dimensions() {
        let img = RgbImage::from_pixel(40, 20, Rgb([200, 100, 50]));
        assert_eq!(scale(&img, 2.0).dimensions(), (80, 40));
        assert_eq!(scale(&img, 0.5).dimensions(), (20, 10));
        assert_eq!(scale(&img, 1.0), img);
    }

    #[test]
    fn test_rotate_keeps_canvas() {
        let img = RgbImage::from_pixel(60, 30, Rgb([255, 255, 255]));
        let rotated = rotate(&img, 90);
        assert_eq!(rotated.dimensions(), (60, 30));
        // The center survives, the far corner falls outside the rotated content
        assert_eq!(rotated.get_pixel(30, 15), &Rgb([255, 255, 255]));
        assert_eq!(rotated.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_rotate_direction_is_counter_clockwise() {
        // Bright block right of center on a square canvas
        let mut img = RgbImage::new(21, 21);
        for y in 8..=12 {
            for x in 15..=19 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let rotated = rotate(&img, 90);
        // Counter-clockwise quarter turn moves it above the center
        let above = rotated.get_pixel(10, 4)[0];
        let below = rotated.get_pixel(10, 16)[0];
        assert!(above > below, "above={above} below={below}");
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let img = RgbImage::from_fn(5, 4, |x, y| Rgb([x as u8, y as u8, 7]));
        assert_eq!(rotate(&img, 0), img);
        assert_eq!(rotate(&img, 360), img);
    }
}
