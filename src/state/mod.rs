/// State management module
///
/// This module holds all application state that doesn't depend on the GUI:
/// - Folder scanning (folder.rs)
/// - The ordered image list (gallery.rs)
/// - The thumbnail cache (thumbnails.rs)
/// - Viewer navigation (viewer.rs)
/// - Slider debouncing (debounce.rs)

pub mod debounce;
pub mod folder;
pub mod gallery;
pub mod thumbnails;
pub mod viewer;
