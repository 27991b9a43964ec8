use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, RgbImage};
use scan_rename::utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale, to_luma_image};

fn bench_rgb_to_grayscale_small(c: &mut Criterion) {
    let image = vec![128u8; 100 * 100 * 3];
    c.bench_function("rgb_to_grayscale_100x100", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(100), black_box(100)))
    });
}

fn bench_rgb_to_grayscale_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 3];
    c.bench_function("rgb_to_grayscale_640x480", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rgb_to_grayscale_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_rgba_to_grayscale_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 4];
    c.bench_function("rgba_to_grayscale_640x480", |b| {
        b.iter(|| rgba_to_grayscale(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_to_luma_image_scan(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(RgbImage::new(2480, 3508));
    c.bench_function("to_luma_image_a4_300dpi", |b| {
        b.iter(|| to_luma_image(black_box(&image)))
    });
}

criterion_group!(
    benches,
    bench_rgb_to_grayscale_small,
    bench_rgb_to_grayscale_medium,
    bench_rgb_to_grayscale_large,
    bench_rgba_to_grayscale_medium,
    bench_to_luma_image_scan
);
criterion_main!(benches);
