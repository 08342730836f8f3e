/// Widget trees for the two screens: the thumbnail grid and the viewer

pub mod grid;
pub mod viewer;
