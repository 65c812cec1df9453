//! Ship types, placed ships and their serializable snapshots.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::{BoardError, GameError};
use crate::coordinate::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Orientation {
    /// Extends along x.
    Horizontal,
    /// Extends along y.
    Vertical,
}

/// The five kinds of ship in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    /// Canonical identifier, e.g. `"Carrier"`.
    pub const fn id(&self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Cruiser => "Cruiser",
            ShipType::Submarine => "Submarine",
            ShipType::Destroyer => "Destroyer",
        }
    }

    /// Number of cells the ship occupies.
    pub const fn length(&self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser | ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    /// Case-insensitive lookup by identifier.
    pub fn from_id(id: &str) -> Result<Self, GameError> {
        crate::config::ship_type_by_id(id).ok_or_else(|| GameError::UnknownShipType(id.to_string()))
    }
}

impl FromStr for ShipType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipType::from_id(s)
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A ship placed on a board. Health only ever goes down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    cells: Vec<Coordinate>,
    health: usize,
}

impl Ship {
    /// Build an undamaged ship occupying `cells`, in order.
    pub fn new(ship_type: ShipType, cells: Vec<Coordinate>) -> Result<Self, BoardError> {
        if cells.len() != ship_type.length() {
            return Err(BoardError::InvalidShip);
        }
        for (i, c) in cells.iter().enumerate() {
            if cells[..i].contains(c) {
                return Err(BoardError::InvalidShip);
            }
        }
        Ok(Self {
            ship_type,
            health: cells.len(),
            cells,
        })
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Identifier shared with the ship's type.
    pub fn id(&self) -> &'static str {
        self.ship_type.id()
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn health(&self) -> usize {
        self.health
    }

    pub fn is_sunk(&self) -> bool {
        self.health == 0
    }

    /// Cells in placement order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        self.cells.contains(&c)
    }

    /// Remove one point of health, flooring at zero. Returns `true` once sunk.
    pub(crate) fn take_damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.is_sunk()
    }
}

/// Serializable ship record for saving games.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    pub id: String,
    pub size: usize,
    pub health: usize,
    pub sunk: bool,
    pub coordinates: Vec<Coordinate>,
}

impl From<&Ship> for ShipState {
    fn from(ship: &Ship) -> Self {
        ShipState {
            id: ship.id().to_string(),
            size: ship.size(),
            health: ship.health,
            sunk: ship.is_sunk(),
            coordinates: ship.cells.clone(),
        }
    }
}

impl TryFrom<ShipState> for Ship {
    type Error = BoardError;

    fn try_from(state: ShipState) -> Result<Self, Self::Error> {
        let ship_type = crate::config::ship_type_by_id(&state.id)
            .ok_or(BoardError::CorruptState("unknown ship type"))?;
        if state.size != ship_type.length() {
            return Err(BoardError::CorruptState("ship size does not match its type"));
        }
        if state.health > state.size || state.sunk != (state.health == 0) {
            return Err(BoardError::CorruptState("ship health out of range"));
        }
        let mut ship = Ship::new(ship_type, state.coordinates)?;
        ship.health = state.health;
        Ok(ship)
    }
}
