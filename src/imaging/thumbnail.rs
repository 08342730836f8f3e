use iced::widget::image::Handle;
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::{GalleryError, GalleryResult};
use crate::state::thumbnails::ThumbKey;

/// Dimensions of a `width x height` image scaled to fit inside
/// `max_width x max_height` with its aspect ratio preserved.
///
/// Images that already fit are left at their size (never upscaled), and
/// neither output dimension drops below 1.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);

    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    let fitted_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let fitted_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (fitted_width, fitted_height)
}

/// Decode `path` and shrink it to fit a `size x size` box
pub fn make_thumbnail(path: &Path, size: u32) -> GalleryResult<RgbaImage> {
    let img = image::open(path).map_err(|e| GalleryError::from_image(path, e))?;

    let (width, height) = fit_within(img.width(), img.height(), size, size);
    if (width, height) == (img.width(), img.height()) {
        return Ok(img.to_rgba8());
    }

    Ok(img.thumbnail_exact(width, height).to_rgba8())
}

/// Generate the thumbnail for `key` in the background, waiting for a
/// permit from `permits` first.
///
/// The key is returned alongside the result so the cache can discard
/// results that arrive after a folder or size change.
pub async fn load_thumbnail(
    key: ThumbKey,
    permits: Arc<Semaphore>,
) -> (ThumbKey, GalleryResult<Handle>) {
    let path = key.path.clone();
    let size = key.size;

    let result = super::decode_limited(permits, move || make_thumbnail(&path, size))
        .await
        .map(super::to_handle);

    (key, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([200, 30, 30, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn fit_landscape_into_square() {
        assert_eq!(fit_within(400, 200, 100, 100), (100, 50));
    }

    #[test]
    fn fit_portrait_into_square() {
        assert_eq!(fit_within(300, 900, 150, 150), (50, 150));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_within(40, 30, 150, 150), (40, 30));
        assert_eq!(fit_within(150, 150, 150, 150), (150, 150));
    }

    #[test]
    fn fit_keeps_extreme_ratios_visible() {
        assert_eq!(fit_within(10_000, 2, 100, 100), (100, 1));
        assert_eq!(fit_within(3, 9_000, 64, 64), (1, 64));
    }

    #[test]
    fn fit_into_wide_box() {
        assert_eq!(fit_within(1000, 1000, 800, 600), (600, 600));
    }

    #[test]
    fn thumbnail_fits_requested_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        write_png(&path, 320, 160);

        let thumb = make_thumbnail(&path, 64).unwrap();
        assert_eq!(thumb.dimensions(), (64, 32));
    }

    #[test]
    fn small_image_is_not_enlarged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tiny.png");
        write_png(&path, 20, 10);

        let thumb = make_thumbnail(&path, 150).unwrap();
        assert_eq!(thumb.dimensions(), (20, 10));
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = make_thumbnail(&path, 100).unwrap_err();
        assert!(matches!(err, GalleryError::Decode { .. }));
    }

    #[tokio::test]
    async fn load_returns_key_and_releases_permit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("square.png");
        write_png(&path, 100, 100);
        let permits = Arc::new(Semaphore::new(1));
        let key = ThumbKey { path, size: 64 };

        let (returned, result) = load_thumbnail(key.clone(), permits.clone()).await;

        assert_eq!(returned, key);
        assert!(result.is_ok());
        assert_eq!(permits.available_permits(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = make_thumbnail(&tmp.path().join("gone.jpg"), 100).unwrap_err();
        assert!(matches!(err, GalleryError::Io { .. }));
    }
}
