//! ASCII layout loader.
//!
//! # Format
//!
//! One text line per map row; all rows must be the same width.  Empty lines
//! are skipped.
//!
//! | Glyph | Tile                                   |
//! |-------|----------------------------------------|
//! | `.`   | open ground                            |
//! | ` `   | void (unwalkable)                      |
//! | `#`   | wall prop, unwalkable                  |
//! | `O`   | stone pillar (walkable, blocking prop) |
//! | `+`   | door                                   |
//! | `_`   | laid floor                             |
//! | `Q`   | quire                                  |
//! | `C`   | chapter house                          |
//! | `R`   | refectory                              |
//! | `L`   | cellarium                              |
//! | `D`   | dormitory                              |
//! | `F`   | farm                                   |
//!
//! Each room letter becomes one room covering the bounding box of every
//! tile carrying that letter.
//!
//! ```text
//! ##########
//! #QQQ.DDDD#
//! #QQQ.DDDD#
//! #...+....#
//! ##########
//! ```

use abbey_core::{Point, PropKind, RoomKind};

use crate::{RoomRegistry, TileMap, WorldError, WorldResult};

fn room_for(glyph: char) -> Option<RoomKind> {
    match glyph {
        'Q' => Some(RoomKind::Quire),
        'C' => Some(RoomKind::ChapterHouse),
        'R' => Some(RoomKind::Refectory),
        'L' => Some(RoomKind::Cellarium),
        'D' => Some(RoomKind::Dormitory),
        'F' => Some(RoomKind::Farm),
        _ => None,
    }
}

/// Parse a text layout into a map and its rooms.
pub fn parse_ascii_map(text: &str) -> WorldResult<(TileMap, RoomRegistry)> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().collect())
        .collect();

    let width = rows.first().map(Vec::len).ok_or(WorldError::EmptyMap)?;
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(WorldError::RaggedMap { row, expected: width, got: cells.len() });
        }
    }

    let mut map = TileMap::new(width as u32, rows.len() as u32);
    // Bounding boxes per room kind, in first-seen order.
    let mut bounds: Vec<(RoomKind, Point, Point)> = Vec::new();

    for (y, cells) in rows.iter().enumerate() {
        for (x, &glyph) in cells.iter().enumerate() {
            let p = Point::new(x as i32, y as i32);
            match glyph {
                '.' => {}
                ' ' => map.set_walkable(p, false)?,
                '#' => map.build_wall(p)?,
                'O' => map.spawn_prop(PropKind::StonePillar, p)?,
                '+' => map.spawn_prop(PropKind::Door, p)?,
                '_' => map.spawn_prop(PropKind::Floor, p)?,
                g => {
                    let kind = room_for(g).ok_or(WorldError::UnknownGlyph { glyph: g, at: p })?;
                    match bounds.iter_mut().find(|(k, _, _)| *k == kind) {
                        Some((_, min, max)) => {
                            *min = Point::new(min.x.min(p.x), min.y.min(p.y));
                            *max = Point::new(max.x.max(p.x), max.y.max(p.y));
                        }
                        None => bounds.push((kind, p, p)),
                    }
                }
            }
        }
    }

    let mut rooms = RoomRegistry::new();
    for (kind, min, max) in bounds {
        rooms.add(kind, min, max);
    }
    Ok((map, rooms))
}
