//! Item categories and spatial offsets
//!
//! Categories are value-like grouping keys. Items lying somewhere other than
//! under the user get a *naturalized* category whose id, name and rank carry
//! the direction and distance of the spot they were found on.

use serde::{Deserialize, Serialize};

/// A named, rank-ordered grouping key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_rank: i32,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sort_rank: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sort_rank,
        }
    }

    /// Category for items found at `offset` from the user.
    ///
    /// Returns `None` for a zero offset: those items keep the base category.
    pub fn naturalized(&self, offset: Offset) -> Option<Self> {
        let dist = offset.distance();
        if dist == 0 {
            return None;
        }
        let suffix = offset.suffix();
        Some(Self {
            id: format!("{}_{}", self.id, suffix),
            name: format!("{} {}", self.name, suffix),
            sort_rank: self.sort_rank + dist,
        })
    }
}

/// Position relative to the user, in map cells (`y` grows southwards)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Roguelike distance: the larger of the two axis distances
    pub fn distance(&self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Eight-way compass direction, `None` at the origin
    pub fn direction(&self) -> Option<Direction> {
        if self.x == 0 && self.y == 0 {
            return None;
        }
        // Octants are centred on the compass points, east = 0 going clockwise.
        let angle = (self.y as f64).atan2(self.x as f64).to_degrees();
        let octant = ((angle + 360.0 + 22.5) / 45.0) as usize % 8;
        Some(Direction::CLOCKWISE[octant])
    }

    /// Short descriptor such as `2NE`
    pub fn suffix(&self) -> String {
        match self.direction() {
            Some(dir) => format!("{}{}", self.distance(), dir.short_name()),
            None => String::new(),
        }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    const CLOCKWISE: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::North => "N",
            Direction::NorthEast => "NE",
        }
    }
}
