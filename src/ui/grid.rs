/// Thumbnail grid
///
/// Lays the gallery out row-major in display order. The column count is
/// derived from the available width so the grid reflows on resize.
use iced::widget::image::Handle;
use iced::widget::{self, button, container, text, Column, Row};
use iced::{Element, Length};
use std::path::PathBuf;

use crate::state::thumbnails::{Slot, ThumbnailCache};
use crate::Message;

/// Horizontal room reserved around each thumbnail
pub const CELL_MARGIN: u32 = 20;

/// Gap between cells, and around the grid
const SPACING: f32 = 10.0;

/// How many thumbnails of `thumb_size` fit across `width` (at least one)
pub fn grid_columns(width: f32, thumb_size: u32) -> usize {
    let cell = (thumb_size + CELL_MARGIN) as f32;
    ((width / cell).floor() as usize).max(1)
}

/// The cells to draw, as (gallery index, thumbnail if ready).
///
/// Failed images are left out; pending ones get an empty cell.
pub fn visible_cells<'a, H>(
    images: &'a [PathBuf],
    cache: &'a ThumbnailCache<H>,
) -> Vec<(usize, Option<&'a H>)> {
    images
        .iter()
        .enumerate()
        .filter_map(|(index, path)| match cache.get(path) {
            Some(Slot::Ready(handle)) => Some((index, Some(handle))),
            Some(Slot::Failed) => None,
            Some(Slot::Pending) | None => Some((index, None)),
        })
        .collect()
}

/// Build the grid for a viewport `width` pixels wide
pub fn view<'a>(
    images: &'a [PathBuf],
    cache: &'a ThumbnailCache<Handle>,
    width: f32,
) -> Element<'a, Message> {
    let size = cache.size();
    let columns = grid_columns(width, size);
    let cells = visible_cells(images, cache);

    let rows = cells.chunks(columns).map(|chunk| {
        Row::with_children(
            chunk
                .iter()
                .map(|&(index, handle)| cell(index, handle, size)),
        )
        .spacing(SPACING)
        .into()
    });

    Column::with_children(rows)
        .spacing(SPACING)
        .padding(SPACING)
        .into()
}

fn cell<'a>(index: usize, handle: Option<&Handle>, size: u32) -> Element<'a, Message> {
    let content: Element<'a, Message> = match handle {
        Some(handle) => widget::image(handle.clone()).into(),
        None => text("…").size(24).into(),
    };

    let edge = Length::Fixed(size as f32);

    button(container(content).center_x(edge).center_y(edge))
        .padding(0)
        .on_press(Message::OpenViewer(index))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_width() {
        assert_eq!(grid_columns(1200.0, 150), 7);
        assert_eq!(grid_columns(1200.0, 64), 14);
        assert_eq!(grid_columns(1200.0, 300), 3);
    }

    #[test]
    fn at_least_one_column() {
        assert_eq!(grid_columns(0.0, 150), 1);
        assert_eq!(grid_columns(100.0, 300), 1);
    }

    #[test]
    fn failed_images_are_skipped_but_keep_their_index() {
        let images: Vec<PathBuf> = ["/a.png", "/b.png", "/c.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let mut cache = ThumbnailCache::new(100);
        let keys = cache.rebuild(100, &images);
        cache.complete::<()>(&keys[0], Ok("a"));
        cache.complete(&keys[1], Err(()));

        let cells = visible_cells(&images, &cache);
        assert_eq!(cells, vec![(0, Some(&"a")), (2, None)]);
    }
}
