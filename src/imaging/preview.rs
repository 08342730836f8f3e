/// Viewer-sized image generation
///
/// The viewer shows one image at a time, shrunk to fit the window.
use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};

use super::thumbnail::fit_within;
use crate::error::{GalleryError, GalleryResult};

/// Decode `path` and shrink it to fit `max_width x max_height`.
/// Images smaller than the box keep their size.
pub fn make_preview(path: &Path, max_width: u32, max_height: u32) -> GalleryResult<RgbaImage> {
    let img = image::open(path).map_err(|e| GalleryError::from_image(path, e))?;

    let (width, height) = fit_within(img.width(), img.height(), max_width, max_height);
    if (width, height) == (img.width(), img.height()) {
        return Ok(img.to_rgba8());
    }

    Ok(img.resize_exact(width, height, FilterType::Lanczos3).to_rgba8())
}

/// Generate the viewer image for gallery position `index` in the background
pub async fn load_preview(
    index: usize,
    path: PathBuf,
    max_width: u32,
    max_height: u32,
) -> (usize, GalleryResult<Handle>) {
    let result = tokio::task::spawn_blocking(move || make_preview(&path, max_width, max_height))
        .await
        .map_err(|e| GalleryError::Task(e.to_string()))
        .and_then(|inner| inner)
        .map(super::to_handle);

    (index, result)
}
