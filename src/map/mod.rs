//! Tile geometry and the read-only map seam.

pub mod direction;
pub mod tile;
pub mod view;

pub use direction::*;
pub use tile::*;
pub use view::*;
