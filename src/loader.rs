//! Image loading

use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageError};
use std::path::Path;

/// Load and decode an image, sniffing the format from the file contents
///
/// The extension is only a hint: a JPEG saved without one still loads,
/// and a text file named `.jpg` is rejected.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::open(path.as_ref())?.with_guessed_format()?;
    reader.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("scan_rename_loader_{nanos}_{sequence}_{name}"))
    }

    #[test]
    fn test_load_png_without_extension() {
        let png = temp_path("image.png");
        RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]))
            .save(&png)
            .expect("failed to write png");
        let bare = temp_path("noext");
        fs::rename(&png, &bare).expect("failed to rename fixture");

        let image = load_image(&bare).expect("png content should load");
        assert_eq!((image.width(), image.height()), (3, 2));
        let _ = fs::remove_file(bare);
    }

    #[test]
    fn test_text_file_is_not_an_image() {
        let path = temp_path("notes.jpg");
        fs::write(&path, "not really a jpeg").expect("failed to write fixture");
        assert!(load_image(&path).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_image(temp_path("missing.png")).is_err());
    }
}
