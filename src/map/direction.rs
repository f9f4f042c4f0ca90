use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

/// One of the four tile edges, named after the compass direction it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagDirection {
    Ne = 0,
    Se = 1,
    Sw = 2,
    Nw = 3,
}

impl DiagDirection {
    pub const ALL: [DiagDirection; 4] = [
        DiagDirection::Ne,
        DiagDirection::Se,
        DiagDirection::Sw,
        DiagDirection::Nw,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tile offset of the neighbour across this edge.
    pub fn offset(self) -> (i32, i32) {
        match self {
            DiagDirection::Ne => (-1, 0),
            DiagDirection::Se => (0, 1),
            DiagDirection::Sw => (1, 0),
            DiagDirection::Nw => (0, -1),
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn reverse(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    pub fn axis(self) -> Axis {
        match self {
            DiagDirection::Ne | DiagDirection::Sw => Axis::X,
            DiagDirection::Se | DiagDirection::Nw => Axis::Y,
        }
    }

    /// Tracks a train moving in this direction can enter on the next tile,
    /// i.e. the tracks touching the edge it crosses.
    pub fn reaches_tracks(self) -> TrackBits {
        match self {
            DiagDirection::Ne => TrackBits::X | TrackBits::LOWER | TrackBits::LEFT,
            DiagDirection::Se => TrackBits::Y | TrackBits::UPPER | TrackBits::LEFT,
            DiagDirection::Sw => TrackBits::X | TrackBits::UPPER | TrackBits::RIGHT,
            DiagDirection::Nw => TrackBits::Y | TrackBits::LOWER | TrackBits::RIGHT,
        }
    }
}

/// Set of edge directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiagDirections(u8);

impl DiagDirections {
    pub const NONE: DiagDirections = DiagDirections(0);

    pub fn insert(&mut self, dir: DiagDirection) {
        self.0 |= 1 << dir.index();
    }

    pub fn contains(self, dir: DiagDirection) -> bool {
        self.0 & (1 << dir.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = DiagDirection> {
        DiagDirection::ALL
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X = 0,
    Y = 1,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A single piece of track within a tile.
///
/// `X` and `Y` run along the tile axes; the four half-tile pieces connect
/// two adjacent edges and are named after the corner they hug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    X = 0,
    Y = 1,
    Upper = 2,
    Lower = 3,
    Left = 4,
    Right = 5,
}

impl Track {
    pub const ALL: [Track; 6] = [
        Track::X,
        Track::Y,
        Track::Upper,
        Track::Lower,
        Track::Left,
        Track::Right,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn bit(self) -> TrackBits {
        TrackBits(1 << self as u8)
    }

    pub fn from_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Track::X,
            Axis::Y => Track::Y,
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate_right(self) -> Self {
        match self {
            Track::X => Track::Y,
            Track::Y => Track::X,
            Track::Upper => Track::Right,
            Track::Right => Track::Lower,
            Track::Lower => Track::Left,
            Track::Left => Track::Upper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackBits(pub u8);

impl TrackBits {
    pub const NONE: TrackBits = TrackBits(0);
    pub const X: TrackBits = TrackBits(1 << 0);
    pub const Y: TrackBits = TrackBits(1 << 1);
    pub const UPPER: TrackBits = TrackBits(1 << 2);
    pub const LOWER: TrackBits = TrackBits(1 << 3);
    pub const LEFT: TrackBits = TrackBits(1 << 4);
    pub const RIGHT: TrackBits = TrackBits(1 << 5);
    pub const HORZ: TrackBits = TrackBits(Self::UPPER.0 | Self::LOWER.0);
    pub const VERT: TrackBits = TrackBits(Self::LEFT.0 | Self::RIGHT.0);
    pub const ALL: TrackBits = TrackBits(0x3F);

    pub fn is_empty(self) -> bool {
        self.0 & Self::ALL.0 == 0
    }

    pub fn intersects(self, other: TrackBits) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, track: Track) -> bool {
        self.intersects(track.bit())
    }

    /// Lowest-numbered track present in the set.
    pub fn first_track(self) -> Option<Track> {
        Track::ALL.into_iter().find(|track| self.contains(*track))
    }

    pub fn tracks(self) -> impl Iterator<Item = Track> {
        Track::ALL
            .into_iter()
            .filter(move |track| self.contains(*track))
    }
}

impl BitOr for TrackBits {
    type Output = TrackBits;

    fn bitor(self, rhs: Self) -> Self::Output {
        TrackBits(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrackBits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TrackBits {
    type Output = TrackBits;

    fn bitand(self, rhs: Self) -> Self::Output {
        TrackBits(self.0 & rhs.0)
    }
}

impl Not for TrackBits {
    type Output = TrackBits;

    fn not(self) -> Self::Output {
        TrackBits(!self.0 & Self::ALL.0)
    }
}

/// A track together with a travel direction along it.
///
/// The numbering leaves a gap at 6 and 7 so that reversing a direction is a
/// flip of bit 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trackdir {
    XNe = 0,
    YSe = 1,
    UpperE = 2,
    LowerE = 3,
    LeftS = 4,
    RightS = 5,
    XSw = 8,
    YNw = 9,
    UpperW = 10,
    LowerW = 11,
    LeftN = 12,
    RightN = 13,
}

impl Trackdir {
    pub const ALL: [Trackdir; 12] = [
        Trackdir::XNe,
        Trackdir::YSe,
        Trackdir::UpperE,
        Trackdir::LowerE,
        Trackdir::LeftS,
        Trackdir::RightS,
        Trackdir::XSw,
        Trackdir::YNw,
        Trackdir::UpperW,
        Trackdir::LowerW,
        Trackdir::LeftN,
        Trackdir::RightN,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| *dir as u32 == index)
    }

    /// The direction with the same number as `track`.
    pub fn from_track(track: Track) -> Self {
        match track {
            Track::X => Trackdir::XNe,
            Track::Y => Trackdir::YSe,
            Track::Upper => Trackdir::UpperE,
            Track::Lower => Trackdir::LowerE,
            Track::Left => Trackdir::LeftS,
            Track::Right => Trackdir::RightS,
        }
    }

    pub fn track(self) -> Track {
        match self {
            Trackdir::XNe | Trackdir::XSw => Track::X,
            Trackdir::YSe | Trackdir::YNw => Track::Y,
            Trackdir::UpperE | Trackdir::UpperW => Track::Upper,
            Trackdir::LowerE | Trackdir::LowerW => Track::Lower,
            Trackdir::LeftS | Trackdir::LeftN => Track::Left,
            Trackdir::RightS | Trackdir::RightN => Track::Right,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Trackdir::XNe => Trackdir::XSw,
            Trackdir::YSe => Trackdir::YNw,
            Trackdir::UpperE => Trackdir::UpperW,
            Trackdir::LowerE => Trackdir::LowerW,
            Trackdir::LeftS => Trackdir::LeftN,
            Trackdir::RightS => Trackdir::RightN,
            Trackdir::XSw => Trackdir::XNe,
            Trackdir::YNw => Trackdir::YSe,
            Trackdir::UpperW => Trackdir::UpperE,
            Trackdir::LowerW => Trackdir::LowerE,
            Trackdir::LeftN => Trackdir::LeftS,
            Trackdir::RightN => Trackdir::RightS,
        }
    }

    /// Quarter turn clockwise, keeping the travel direction on the map.
    pub fn rotate_right(self) -> Self {
        match self {
            Trackdir::XNe => Trackdir::YSe,
            Trackdir::XSw => Trackdir::YNw,
            Trackdir::YSe => Trackdir::XSw,
            Trackdir::YNw => Trackdir::XNe,
            Trackdir::UpperE => Trackdir::RightS,
            Trackdir::UpperW => Trackdir::RightN,
            Trackdir::RightS => Trackdir::LowerW,
            Trackdir::RightN => Trackdir::LowerE,
            Trackdir::LowerE => Trackdir::LeftS,
            Trackdir::LowerW => Trackdir::LeftN,
            Trackdir::LeftS => Trackdir::UpperW,
            Trackdir::LeftN => Trackdir::UpperE,
        }
    }

    /// Edge through which a train following this direction leaves the tile.
    pub fn exit_dir(self) -> DiagDirection {
        match self {
            Trackdir::XNe | Trackdir::UpperE | Trackdir::RightN => DiagDirection::Ne,
            Trackdir::YSe | Trackdir::LowerE | Trackdir::RightS => DiagDirection::Se,
            Trackdir::LeftS | Trackdir::XSw | Trackdir::LowerW => DiagDirection::Sw,
            Trackdir::YNw | Trackdir::UpperW | Trackdir::LeftN => DiagDirection::Nw,
        }
    }

    /// Direction on the following tile when continuing a straight line.
    ///
    /// Diagonal lines alternate between the two half-tile pieces, axis lines
    /// keep their direction.
    pub fn next(self) -> Self {
        match self {
            Trackdir::UpperE => Trackdir::LowerE,
            Trackdir::LowerE => Trackdir::UpperE,
            Trackdir::LeftS => Trackdir::RightS,
            Trackdir::RightS => Trackdir::LeftS,
            Trackdir::UpperW => Trackdir::LowerW,
            Trackdir::LowerW => Trackdir::UpperW,
            Trackdir::LeftN => Trackdir::RightN,
            Trackdir::RightN => Trackdir::LeftN,
            straight => straight,
        }
    }

    /// True for the half-tile pieces that form diagonal lines.
    pub fn is_diagonal(self) -> bool {
        !matches!(self.track(), Track::X | Track::Y)
    }
}
