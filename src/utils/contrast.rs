//! Local contrast enhancement
//!
//! The image is taken into CIE L*a*b*, the lightness plane is equalized with
//! CLAHE (contrast limited adaptive histogram equalization) and the result is
//! converted back. Chroma passes through unchanged, so colors keep their hue
//! while faint bars gain contrast against their local background.

use image::{Rgb, RgbImage};
use rayon::prelude::*;

/// Histogram clip limit used by the exhaustive search
pub const DEFAULT_CLIP_LIMIT: f32 = 3.0;
/// Tile grid (columns and rows) used by the exhaustive search
pub const DEFAULT_TILE_GRID: usize = 8;

const HIST_BINS: usize = 256;

// D65 reference white
const WHITE_X: f32 = 0.950_456;
const WHITE_Z: f32 = 1.088_754;

const LAB_EPSILON: f32 = 0.008_856;
const LAB_KAPPA: f32 = 903.3;

/// CLAHE parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheParams {
    /// Clip limit relative to a flat histogram (values <= 0 disable clipping)
    pub clip_limit: f32,
    /// Tile columns
    pub tiles_x: usize,
    /// Tile rows
    pub tiles_y: usize,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLIP_LIMIT,
            tiles_x: DEFAULT_TILE_GRID,
            tiles_y: DEFAULT_TILE_GRID,
        }
    }
}

/// Planar L*a*b* image; L is stored as 8-bit `L * 255 / 100`
#[derive(Debug, Clone)]
pub struct LabPlanes {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Lightness scaled to 0..=255
    pub l: Vec<u8>,
    /// Green-red axis
    pub a: Vec<f32>,
    /// Blue-yellow axis
    pub b: Vec<f32>,
}

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let v = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > LAB_EPSILON {
        cube
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

/// Convert one sRGB pixel to (L*, a*, b*) with L* in 0..=100
pub fn rgb_to_lab(px: [u8; 3]) -> (f32, f32, f32) {
    let r = srgb_to_linear(px[0]);
    let g = srgb_to_linear(px[1]);
    let b = srgb_to_linear(px[2]);

    let x = (0.412_453 * r + 0.357_580 * g + 0.180_423 * b) / WHITE_X;
    let y = 0.212_671 * r + 0.715_160 * g + 0.072_169 * b;
    let z = (0.019_334 * r + 0.119_193 * g + 0.950_227 * b) / WHITE_Z;

    let l = if y > LAB_EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        LAB_KAPPA * y
    };
    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    (l, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Convert (L*, a*, b*) back to an sRGB pixel
pub fn lab_to_rgb(l: f32, a: f32, b: f32) -> [u8; 3] {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let y = if l > LAB_KAPPA * LAB_EPSILON {
        fy * fy * fy
    } else {
        l / LAB_KAPPA
    };
    let x = lab_f_inv(fx) * WHITE_X;
    let z = lab_f_inv(fz) * WHITE_Z;

    let r = 3.240_479 * x - 1.537_150 * y - 0.498_535 * z;
    let g = -0.969_256 * x + 1.875_991 * y + 0.041_556 * z;
    let bl = 0.055_648 * x - 0.204_043 * y + 1.057_311 * z;

    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(bl)]
}

impl LabPlanes {
    /// Split an RGB image into L*a*b* planes
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let converted: Vec<(u8, f32, f32)> = image
            .as_raw()
            .par_chunks_exact(3)
            .map(|px| {
                let (l, a, b) = rgb_to_lab([px[0], px[1], px[2]]);
                let l8 = (l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8;
                (l8, a, b)
            })
            .collect();

        let mut l = Vec::with_capacity(converted.len());
        let mut a = Vec::with_capacity(converted.len());
        let mut b = Vec::with_capacity(converted.len());
        for (lv, av, bv) in converted {
            l.push(lv);
            a.push(av);
            b.push(bv);
        }
        Self {
            width,
            height,
            l,
            a,
            b,
        }
    }

    /// Recombine the planes into an RGB image
    pub fn to_rgb(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width as u32, self.height as u32);
        out.par_chunks_exact_mut(3).enumerate().for_each(|(i, px)| {
            let l = self.l[i] as f32 * 100.0 / 255.0;
            let rgb = lab_to_rgb(l, self.a[i], self.b[i]);
            px.copy_from_slice(&rgb);
        });
        out
    }
}

/// Contrast enhancement applied before the rotation/scale sweep
pub fn enhance_contrast(image: &RgbImage) -> RgbImage {
    enhance_contrast_with(image, ClaheParams::default())
}

/// Equalize the lightness plane only, with explicit CLAHE parameters
pub fn enhance_contrast_with(image: &RgbImage, params: ClaheParams) -> RgbImage {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }
    let mut lab = LabPlanes::from_rgb(image);
    lab.l = clahe(&lab.l, lab.width, lab.height, params);
    lab.to_rgb()
}

/// Tile layout over a `width` x `height` plane
#[derive(Debug, Clone, Copy)]
struct TileGrid {
    tiles_x: usize,
    tiles_y: usize,
    tile_w: f32,
    tile_h: f32,
}

impl TileGrid {
    fn new(width: usize, height: usize, params: &ClaheParams) -> Self {
        // Never more tiles than pixels along an axis, so no tile is empty
        let tiles_x = params.tiles_x.clamp(1, width);
        let tiles_y = params.tiles_y.clamp(1, height);
        Self {
            tiles_x,
            tiles_y,
            tile_w: width as f32 / tiles_x as f32,
            tile_h: height as f32 / tiles_y as f32,
        }
    }

    fn bounds(&self, tx: usize, ty: usize, width: usize, height: usize) -> (usize, usize, usize, usize) {
        let x0 = (tx as f32 * self.tile_w) as usize;
        let y0 = (ty as f32 * self.tile_h) as usize;
        let x1 = if tx + 1 == self.tiles_x {
            width
        } else {
            ((tx + 1) as f32 * self.tile_w) as usize
        };
        let y1 = if ty + 1 == self.tiles_y {
            height
        } else {
            ((ty + 1) as f32 * self.tile_h) as usize
        };
        (x0, y0, x1.max(x0 + 1), y1.max(y0 + 1))
    }
}

/// Build the clipped-histogram equalization LUT for one tile
fn tile_lut(
    plane: &[u8],
    width: usize,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
    clip_limit: f32,
) -> [u8; HIST_BINS] {
    let mut hist = [0u32; HIST_BINS];
    for y in y0..y1 {
        for &v in &plane[y * width + x0..y * width + x1] {
            hist[v as usize] += 1;
        }
    }
    let area = ((x1 - x0) * (y1 - y0)) as u32;

    if clip_limit > 0.0 {
        let clip = ((clip_limit * area as f32 / HIST_BINS as f32) as u32).max(1);
        let mut excess = 0u32;
        for bin in hist.iter_mut() {
            if *bin > clip {
                excess += *bin - clip;
                *bin = clip;
            }
        }

        let redist = excess / HIST_BINS as u32;
        let mut residual = excess - redist * HIST_BINS as u32;
        for bin in hist.iter_mut() {
            *bin += redist;
        }
        if residual > 0 {
            let step = (HIST_BINS / residual as usize).max(1);
            let mut i = 0;
            while i < HIST_BINS && residual > 0 {
                hist[i] += 1;
                residual -= 1;
                i += step;
            }
        }
    }

    let scale = 255.0 / area as f32;
    let mut lut = [0u8; HIST_BINS];
    let mut sum = 0u32;
    for (out, &count) in lut.iter_mut().zip(hist.iter()) {
        sum += count;
        *out = (sum as f32 * scale).round().min(255.0) as u8;
    }
    lut
}

/// Contrast limited adaptive histogram equalization of an 8-bit plane
///
/// Each tile gets its own equalization LUT; every output pixel is the
/// bilinear blend of the LUTs of the four nearest tile centers.
pub fn clahe(plane: &[u8], width: usize, height: usize, params: ClaheParams) -> Vec<u8> {
    if width == 0 || height == 0 {
        return plane.to_vec();
    }

    let grid = TileGrid::new(width, height, &params);
    let luts: Vec<[u8; HIST_BINS]> = (0..grid.tiles_x * grid.tiles_y)
        .into_par_iter()
        .map(|t| {
            let bounds = grid.bounds(t % grid.tiles_x, t / grid.tiles_x, width, height);
            tile_lut(plane, width, bounds, params.clip_limit)
        })
        .collect();

    // Neighboring tile pair and blend weight along one axis
    let neighbors = |pos: usize, tile: f32, count: usize| -> (usize, usize, f32) {
        let f = (pos as f32 + 0.5) / tile - 0.5;
        let lo = f.floor();
        let weight = f - lo;
        let lo = lo as isize;
        let first = lo.max(0) as usize;
        let second = ((lo + 1).max(0) as usize).min(count - 1);
        (first.min(count - 1), second, weight)
    };

    let columns: Vec<(usize, usize, f32)> = (0..width)
        .map(|x| neighbors(x, grid.tile_w, grid.tiles_x))
        .collect();

    let mut out = vec![0u8; width * height];
    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let (ty1, ty2, ya) = neighbors(y, grid.tile_h, grid.tiles_y);
        let src = &plane[y * width..(y + 1) * width];
        for (x, dst) in row.iter_mut().enumerate() {
            let (tx1, tx2, xa) = columns[x];
            let v = src[x] as usize;
            let top = luts[ty1 * grid.tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty1 * grid.tiles_x + tx2][v] as f32 * xa;
            let bottom = luts[ty2 * grid.tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty2 * grid.tiles_x + tx2][v] as f32 * xa;
            *dst = (top * (1.0 - ya) + bottom * ya).round().clamp(0.0, 255.0) as u8;
        }
    });

    out
}

/// Mean lightness of an RGB image, for diagnostics
pub fn mean_luma(image: &RgbImage) -> f32 {
    let pixels = image.width() as usize * image.height() as usize;
    if pixels == 0 {
        return 0.0;
    }
    let sum: u64 = image
        .pixels()
        .map(|Rgb([r, g, b])| (*r as u64 * 76 + *g as u64 * 150 + *b as u64 * 29) >> 8)
        .sum();
    sum as f32 / pixels as f32
}
