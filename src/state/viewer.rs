/// Position of the full-window viewer within the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    index: usize,
    len: usize,
}

impl ViewerState {
    /// Open the viewer at `index` of a list of `len` images.
    /// Returns `None` if the index is out of range.
    pub fn open(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step back one image. Returns `false` at the first image.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one image. Returns `false` at the last image.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_out_of_range() {
        assert!(ViewerState::open(0, 0).is_none());
        assert!(ViewerState::open(3, 3).is_none());
        assert_eq!(ViewerState::open(2, 3).unwrap().index(), 2);
    }

    #[test]
    fn prev_stops_at_first() {
        let mut viewer = ViewerState::open(1, 3).unwrap();
        assert!(viewer.prev());
        assert_eq!(viewer.index(), 0);
        assert!(!viewer.prev());
        assert_eq!(viewer.index(), 0);
    }

    #[test]
    fn next_stops_at_last() {
        let mut viewer = ViewerState::open(1, 3).unwrap();
        assert!(viewer.next());
        assert_eq!(viewer.index(), 2);
        assert!(!viewer.next());
        assert_eq!(viewer.index(), 2);
    }

    #[test]
    fn single_image_cannot_move() {
        let mut viewer = ViewerState::open(0, 1).unwrap();
        assert!(!viewer.prev());
        assert!(!viewer.next());
        assert_eq!(viewer.index(), 0);
    }
}
