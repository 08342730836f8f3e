/// Folder scanning
///
/// Lists the image files directly inside a folder. Subfolders are not
/// descended into.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GalleryError, GalleryResult};

/// Supported image extensions (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Check whether a path looks like a supported image by its extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the images in `folder`, sorted ascending by path.
///
/// Entries that cannot be inspected are skipped. Fails only if the folder
/// itself cannot be read.
pub fn scan_folder(folder: &Path) -> GalleryResult<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(GalleryError::Folder {
            path: folder.to_path_buf(),
            message: "not a directory".into(),
        });
    }

    // Surface permission problems on the folder itself instead of
    // silently returning an empty gallery
    std::fs::read_dir(folder).map_err(|e| GalleryError::Folder {
        path: folder.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_image_path(path))
        .collect();

    images.sort();

    log::info!("🔍 Found {} images in {}", images.len(), folder.display());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_image_path(Path::new("a.jpg")));
        assert!(is_image_path(Path::new("b.JPEG")));
        assert!(is_image_path(Path::new("/x/c.Png")));
        assert!(is_image_path(Path::new("d.bmp")));
        assert!(is_image_path(Path::new("e.webp")));
        assert!(!is_image_path(Path::new("f.gif")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("jpg")));
    }

    #[test]
    fn scan_keeps_only_images_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.png", "a.JPG", "b.webp", "readme.txt", "d.gif"] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }

        let images = scan_folder(tmp.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.webp", "c.png"]);
    }

    #[test]
    fn scan_does_not_recurse_or_list_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("album.jpg")).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("inner.png"), b"x").unwrap();
        fs::write(tmp.path().join("top.png"), b"x").unwrap();

        let images = scan_folder(tmp.path()).unwrap();
        assert_eq!(images, vec![tmp.path().join("top.png")]);
    }

    #[test]
    fn scan_empty_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_folder(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_missing_folder_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let err = scan_folder(&missing).unwrap_err();
        assert!(matches!(err, GalleryError::Folder { .. }));
    }
}
