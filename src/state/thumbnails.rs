/// In-memory thumbnail cache
///
/// One slot per image in the current folder, all at a single size. The
/// cache is rebuilt whenever the folder or the thumbnail size changes;
/// there is no eviction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identifies one generated thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbKey {
    pub path: PathBuf,
    pub size: u32,
}

/// State of a single image's thumbnail
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<H> {
    /// Decode requested, result not yet delivered
    Pending,
    /// Decoded and ready to draw
    Ready(H),
    /// Could not be decoded; skipped in the grid
    Failed,
}

/// Counts of slots by state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub ready: usize,
    pub failed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.ready + self.failed == self.total
    }
}

#[derive(Debug)]
pub struct ThumbnailCache<H> {
    size: u32,
    slots: HashMap<PathBuf, Slot<H>>,
}

impl<H> ThumbnailCache<H> {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            slots: HashMap::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Drop everything and mark each of `paths` pending at `size`.
    ///
    /// Returns the keys that need decoding.
    pub fn rebuild<'a>(
        &mut self,
        size: u32,
        paths: impl IntoIterator<Item = &'a PathBuf>,
    ) -> Vec<ThumbKey> {
        self.size = size;
        self.slots.clear();

        let keys: Vec<ThumbKey> = paths
            .into_iter()
            .map(|path| {
                self.slots.insert(path.clone(), Slot::Pending);
                ThumbKey {
                    path: path.clone(),
                    size,
                }
            })
            .collect();

        log::debug!("Thumbnail cache rebuilt: {} slots at {}px", keys.len(), size);
        keys
    }

    /// Record a decode result.
    ///
    /// Results for another size, or for a path no longer in the cache, are
    /// discarded and `false` is returned.
    pub fn complete<E>(&mut self, key: &ThumbKey, result: Result<H, E>) -> bool {
        if key.size != self.size {
            log::debug!("Dropping stale {}px thumbnail for {}", key.size, key.path.display());
            return false;
        }

        match self.slots.get_mut(&key.path) {
            Some(slot) => {
                *slot = match result {
                    Ok(handle) => Slot::Ready(handle),
                    Err(_) => Slot::Failed,
                };
                true
            }
            None => {
                log::debug!("Dropping thumbnail for unknown path {}", key.path.display());
                false
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Slot<H>> {
        self.slots.get(path)
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress {
            total: self.slots.len(),
            ..Progress::default()
        };
        for slot in self.slots.values() {
            match slot {
                Slot::Ready(_) => progress.ready += 1,
                Slot::Failed => progress.failed += 1,
                Slot::Pending => {}
            }
        }
        progress
    }
}
