use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

use super::folder;
use crate::error::GalleryResult;

/// Ordering requested from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// A-Z
    Ascending,
    /// Z-A
    Descending,
}

/// The currently opened folder and its images in display order
#[derive(Debug, Default)]
pub struct Gallery {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
}

impl Gallery {
    /// Open `folder`, replacing the current contents.
    ///
    /// On error the gallery is left unchanged.
    pub fn open(&mut self, folder: &Path) -> GalleryResult<()> {
        let images = folder::scan_folder(folder)?;
        self.folder = Some(folder.to_path_buf());
        self.images = images;
        Ok(())
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => self.images.sort(),
            SortOrder::Descending => self.images.sort_by(|a, b| b.cmp(a)),
        }
    }

    /// Put the images in a uniformly random order
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.images.shuffle(rng);
    }
}
