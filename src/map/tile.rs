use bevy_ecs_tilemap::prelude::TilePos;

use crate::map::direction::DiagDirection;

/// Tile arithmetic used by the placement code.
pub trait TilePosExt {
    /// Offset by a non-negative amount; used for tile corners, which may sit
    /// one past the last tile.
    fn add_xy(&self, dx: u32, dy: u32) -> TilePos;

    /// Signed offset, `None` when it would leave the map on the low side.
    fn offset(&self, dx: i32, dy: i32) -> Option<TilePos>;

    /// Neighbour across the given edge.
    fn step(&self, dir: DiagDirection) -> Option<TilePos>;

    fn manhattan(&self, other: &TilePos) -> u32;

    /// Linear index for a map `map_width` tiles wide.
    fn map_index(&self, map_width: u32) -> u32;
}

impl TilePosExt for TilePos {
    fn add_xy(&self, dx: u32, dy: u32) -> TilePos {
        TilePos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    fn offset(&self, dx: i32, dy: i32) -> Option<TilePos> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(TilePos { x, y })
    }

    fn step(&self, dir: DiagDirection) -> Option<TilePos> {
        let (dx, dy) = dir.offset();
        self.offset(dx, dy)
    }

    fn manhattan(&self, other: &TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    fn map_index(&self, map_width: u32) -> u32 {
        self.y * map_width + self.x
    }
}

/// Inverse of [`TilePosExt::map_index`].
pub fn tile_from_index(index: u32, map_width: u32) -> TilePos {
    let width = map_width.max(1);
    TilePos {
        x: index % width,
        y: index / width,
    }
}

/// Axis-aligned rectangle of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileArea {
    pub origin: TilePos,
    pub w: u32,
    pub h: u32,
}

impl TileArea {
    pub fn new(origin: TilePos, w: u32, h: u32) -> Self {
        Self { origin, w, h }
    }

    /// Smallest area spanning both corner tiles, in any order.
    pub fn from_corners(a: TilePos, b: TilePos) -> Self {
        let origin = TilePos {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
        };
        Self {
            origin,
            w: a.x.abs_diff(b.x) + 1,
            h: a.y.abs_diff(b.y) + 1,
        }
    }

    pub fn single(tile: TilePos) -> Self {
        Self::new(tile, 1, 1)
    }

    pub fn contains(&self, tile: TilePos) -> bool {
        tile.x >= self.origin.x
            && tile.y >= self.origin.y
            && tile.x < self.origin.x + self.w
            && tile.y < self.origin.y + self.h
    }

    /// Row-major iteration starting at the origin.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.h).flat_map(move |dy| (0..self.w).map(move |dx| self.origin.add_xy(dx, dy)))
    }

    /// Grow by `distance` tiles on every side, clamped to the map origin.
    pub fn expanded(&self, distance: u32) -> Self {
        let x = self.origin.x.saturating_sub(distance);
        let y = self.origin.y.saturating_sub(distance);
        Self {
            origin: TilePos { x, y },
            w: self.origin.x - x + self.w + distance,
            h: self.origin.y - y + self.h + distance,
        }
    }
}
