//! Tile selection state the viewport renders and drives.
//!
//! The toolbar only writes intent here (what kind of object is being placed,
//! how a drag is sized, where the polyline snaps). Drawing the highlight and
//! tracking the mouse belong to the host viewport, which reports finished
//! drags back as [`PlaceDrag`]s.

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::TilePos;

use crate::map::{TilePosExt, Track, Trackdir};

/// Orientation of a straight-line highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDir {
    X,
    Y,
    Horizontal,
    Vertical,
}

/// What the cursor highlight looks like while a tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    #[default]
    None,
    Line(LineDir),
    /// Single track piece under the cursor.
    Rail,
    /// Rail piece that extends a polyline.
    Poly,
    Rect,
    DiagonalRect,
    /// Tunnel preview.
    Special,
    /// Outline of the blueprint being pasted.
    BlueprintPlace,
}

/// How the viewport constrains a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceMethod {
    XAndY,
    XAndYLimited,
    XOrY,
    XLimited,
    YLimited,
    FixX,
    FixY,
    FixHorizontal,
    FixVertical,
    RailDirs,
    SignalDirs,
}

/// What a finished drag is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragProcess {
    PlaceRail,
    BuildSignals,
    BuildBridge,
    DemolishArea,
    ConvertRail,
    BuildStation,
    RemoveStation,
    BlueprintArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceSizing {
    pub start: TilePos,
    pub method: PlaceMethod,
    /// The drag follows rail directions instead of a plain rectangle.
    pub rail_dirs: bool,
    pub process: DragProcess,
}

/// Shape of the highlight when the mouse was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStyle {
    Rect,
    /// One track piece on a single tile.
    Rail(Track),
    /// A line of track across several tiles.
    Line(Track),
}

/// A drag the viewport finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceDrag {
    pub method: PlaceMethod,
    pub process: DragProcess,
    pub start: TilePos,
    pub end: TilePos,
    pub style: DrawStyle,
    /// Cursor position inside the end tile, 0..16 on each axis.
    pub fract: (u8, u8),
    /// Direction of the polyline segment, when the polyline tool drew it.
    pub poly_dir: Option<Trackdir>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RailSnapMode {
    #[default]
    NoSnap,
    SnapToRail,
}

/// Where the next polyline segment may start, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSnapPoint {
    pub tile: TilePos,
    pub dir: Trackdir,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileHighlight {
    pub mode: HighlightMode,
    pub sizing: Option<PlaceSizing>,
    /// Longest side a drag may reach; `None` is unlimited.
    pub sizing_limit: Option<u8>,
    /// Fixed footprint for click placement.
    pub select_size: (u32, u32),
    /// Catchment outline radius around the selection.
    pub coverage_radius: Option<u8>,
    /// Draw the selection in red, used while removing.
    pub red_selection: bool,
    pub red_error_square: Option<TilePos>,
    /// Extent shown before the tool is used, e.g. a tunnel's far end.
    pub presize: Option<(TilePos, TilePos)>,
    pub snap_mode: RailSnapMode,
    pub snap_points: Vec<LineSnapPoint>,
    /// Level land under polyline diagonals.
    pub poly_terraform: bool,
}

impl Default for TileHighlight {
    fn default() -> Self {
        Self {
            mode: HighlightMode::None,
            sizing: None,
            sizing_limit: None,
            select_size: (1, 1),
            coverage_radius: None,
            red_selection: false,
            red_error_square: None,
            presize: None,
            snap_mode: RailSnapMode::NoSnap,
            snap_points: Vec::new(),
            poly_terraform: false,
        }
    }
}

impl TileHighlight {
    pub fn is_placing(&self) -> bool {
        self.mode != HighlightMode::None
    }

    pub fn set_object_to_place(&mut self, mode: HighlightMode) {
        self.mode = mode;
        self.sizing = None;
        self.sizing_limit = None;
        self.select_size = (1, 1);
        self.presize = None;
    }

    /// Back to plain cursor. Snap points survive so that a polyline can be
    /// resumed.
    pub fn reset(&mut self) {
        self.set_object_to_place(HighlightMode::None);
        self.red_selection = false;
        self.coverage_radius = None;
        self.poly_terraform = false;
    }

    pub fn start_sizing(
        &mut self,
        start: TilePos,
        method: PlaceMethod,
        rail_dirs: bool,
        process: DragProcess,
    ) {
        self.sizing = Some(PlaceSizing {
            start,
            method,
            rail_dirs,
            process,
        });
    }

    pub fn set_select_size(&mut self, w: u32, h: u32) {
        self.select_size = (w, h);
    }

    /// Remember the ends of a freshly placed segment so the next polyline
    /// segment can continue from either of them.
    ///
    /// With `bidirectional` unset only the far end is kept.
    pub fn store_rail_placement_endpoints(
        &mut self,
        start: TilePos,
        end: TilePos,
        track: Track,
        bidirectional: bool,
    ) {
        let (start_point, end_point) = rail_endpoints(start, end, track);
        self.snap_points.clear();
        if bidirectional {
            self.snap_points.push(start_point);
        }
        self.snap_points.push(end_point);
    }
}

/// Outward-facing snap points at both ends of a straight segment.
///
/// At the start the direction points away from the segment; at the end it
/// continues past it. Diagonal lines alternate half-tile pieces, so an odd
/// distance lands on the other piece.
pub fn rail_endpoints(start: TilePos, end: TilePos, track: Track) -> (LineSnapPoint, LineSnapPoint) {
    let mut outward = Trackdir::from_track(track);
    let mut onward = outward.reverse();
    if start != end {
        let distance = start.manhattan(&end);
        let stepped = start
            .step(outward.exit_dir())
            .map(|tile| tile.manhattan(&end));
        if stepped.is_some_and(|d| d < distance) {
            std::mem::swap(&mut outward, &mut onward);
        }
        if distance % 2 != 0 {
            onward = onward.next();
        }
    }
    (
        LineSnapPoint {
            tile: start,
            dir: outward,
        },
        LineSnapPoint {
            tile: end,
            dir: onward,
        },
    )
}
