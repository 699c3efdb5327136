//! World object and room categories.

use std::fmt;
use std::str::FromStr;

use crate::AbbeyError;

// ── PropKind ──────────────────────────────────────────────────────────────────

/// A static object occupying a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKind {
    Wall,
    Floor,
    Door,
    StonePillar,
    /// Marker left on a tile that has a construction job queued against it.
    PendingJob,
    /// A tilled farm field.
    Field,
}

impl PropKind {
    /// Whether agents may not share a tile with this prop.
    #[inline]
    pub fn blocks_movement(self) -> bool {
        matches!(self, PropKind::Wall | PropKind::StonePillar)
    }

    /// Character used by the ASCII map loader and debug dumps.
    pub fn glyph(self) -> char {
        match self {
            PropKind::Wall        => '#',
            PropKind::Floor       => '_',
            PropKind::Door        => '+',
            PropKind::StonePillar => 'O',
            PropKind::PendingJob  => '?',
            PropKind::Field       => '"',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropKind::Wall        => "wall",
            PropKind::Floor       => "floor",
            PropKind::Door        => "door",
            PropKind::StonePillar => "stone_pillar",
            PropKind::PendingJob  => "pending_job",
            PropKind::Field       => "field",
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RoomKind ──────────────────────────────────────────────────────────────────

/// Functional category of a room.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoomKind {
    /// Choir of the church; where services are sung.
    Quire,
    ChapterHouse,
    Refectory,
    Cellarium,
    Dormitory,
    Farm,
}

impl RoomKind {
    pub const ALL: [RoomKind; 6] = [
        RoomKind::Quire,
        RoomKind::ChapterHouse,
        RoomKind::Refectory,
        RoomKind::Cellarium,
        RoomKind::Dormitory,
        RoomKind::Farm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomKind::Quire        => "quire",
            RoomKind::ChapterHouse => "chapter_house",
            RoomKind::Refectory    => "refectory",
            RoomKind::Cellarium    => "cellarium",
            RoomKind::Dormitory    => "dormitory",
            RoomKind::Farm         => "farm",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomKind {
    type Err = AbbeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        RoomKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| AbbeyError::Parse(format!("unknown room kind {needle:?}")))
    }
}
