//! Immutable grid positions.

use core::fmt;

use crate::common::BoardError;
use crate::ship::Orientation;

/// A cell on the grid. Both components are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    x: u32,
    y: u32,
}

impl Coordinate {
    /// Build a coordinate from signed input, rejecting negative components.
    pub fn new(x: i64, y: i64) -> Result<Self, BoardError> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self { x, y }),
            _ if x < 0 || y < 0 => Err(BoardError::InvalidCoordinate { x, y }),
            // too large to be on any board
            _ => Err(BoardError::OutOfBounds(Self {
                x: x.min(u32::MAX as i64) as u32,
                y: y.min(u32::MAX as i64) as u32,
            })),
        }
    }

    /// Build a coordinate from components that are already unsigned.
    pub const fn at(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// The cell `steps` away along `orientation`, or `None` on overflow.
    pub fn step(&self, orientation: Orientation, steps: u32) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => self.x.checked_add(steps).map(|x| Self { x, y: self.y }),
            Orientation::Vertical => self.y.checked_add(steps).map(|y| Self { x: self.x, y }),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
